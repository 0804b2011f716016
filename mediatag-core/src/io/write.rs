// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirror-image of [`super::ReadBytes`] for the tag-rewrite path.

use crate::errors::Result;

/// `WriteBytes` provides methods to write little- or big-endian unsigned integers and
/// floating-point values of standard widths to a byte sink.
///
/// Method names deliberately match their [`super::ReadBytes`] counterparts so call sites read
/// the same way on the encode side as they do on the decode side.
pub trait WriteBytes {
    /// Writes a single byte.
    fn write_byte(&mut self, value: u8) -> Result<()>;

    /// Writes a slice of bytes verbatim.
    fn write_buf(&mut self, buf: &[u8]) -> Result<()>;

    #[inline(always)]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_byte(value)
    }

    #[inline(always)]
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_byte(value as u8)
    }

    #[inline(always)]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_buf(&value.to_le_bytes())
    }

    #[inline(always)]
    fn write_be_u16(&mut self, value: u16) -> Result<()> {
        self.write_buf(&value.to_be_bytes())
    }

    #[inline(always)]
    fn write_u24(&mut self, value: u32) -> Result<()> {
        self.write_buf(&value.to_le_bytes()[0..3])
    }

    #[inline(always)]
    fn write_be_u24(&mut self, value: u32) -> Result<()> {
        self.write_buf(&value.to_be_bytes()[1..4])
    }

    #[inline(always)]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_buf(&value.to_le_bytes())
    }

    #[inline(always)]
    fn write_be_u32(&mut self, value: u32) -> Result<()> {
        self.write_buf(&value.to_be_bytes())
    }

    #[inline(always)]
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_buf(&value.to_le_bytes())
    }

    #[inline(always)]
    fn write_be_u64(&mut self, value: u64) -> Result<()> {
        self.write_buf(&value.to_be_bytes())
    }

    #[inline(always)]
    fn write_be_f32(&mut self, value: f32) -> Result<()> {
        self.write_buf(&value.to_be_bytes())
    }

    #[inline(always)]
    fn write_be_f64(&mut self, value: f64) -> Result<()> {
        self.write_buf(&value.to_be_bytes())
    }
}

impl WriteBytes for Vec<u8> {
    #[inline(always)]
    fn write_byte(&mut self, value: u8) -> Result<()> {
        self.push(value);
        Ok(())
    }

    #[inline(always)]
    fn write_buf(&mut self, buf: &[u8]) -> Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}
