// Symphonia
// Copyright (c) 2019-2023 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::marker::PhantomData;

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::io::ReadBytes;
use mediatag_core::meta::{StandardTagKey, Tag, TagField, TagKind, TagTarget, TagValue};

use log::info;

pub trait ParseChunkTag: Sized {
    fn parse_tag(tag: [u8; 4], len: u32) -> Option<Self>;
}

/// `ChunksReader` reads chunks from a byte stream. It is generic over a type, usually an enum,
/// implementing `ParseChunkTag`. When a new chunk is encountered, `parse_tag` is called to return
/// an object capable of parsing that chunk, or `None` if the chunk should be skipped.
pub struct ChunksReader<T: ParseChunkTag> {
    len: u32,
    consumed: u32,
    phantom: PhantomData<T>,
}

impl<T: ParseChunkTag> ChunksReader<T> {
    pub fn new(len: u32) -> Self {
        ChunksReader { len, consumed: 0, phantom: PhantomData }
    }

    pub fn next<B: ReadBytes>(&mut self, reader: &mut B) -> Result<Option<T>> {
        loop {
            // Align to the next 2-byte boundary if not currently aligned.
            if self.consumed & 0x1 == 1 {
                reader.read_u8()?;
                self.consumed += 1;
            }

            // Check if there are enough bytes for another chunk header.
            if self.consumed + 8 > self.len {
                return Ok(None);
            }

            let tag = reader.read_quad_bytes()?;
            let len = reader.read_be_u32()?;
            self.consumed += 8;

            // Warning: len is untrusted input and may overflow if added to anything.
            if self.len - self.consumed < len {
                // ffmpeg streams to stdout with unknown-length riff/data chunks set to 0xffffffff.
                if !(self.len == len && len == u32::MAX) {
                    return decode_error("riff: chunk length exceeds parent chunk length");
                }
            }

            self.consumed = self.consumed.saturating_add(len);

            match T::parse_tag(tag, len) {
                Some(chunk) => return Ok(Some(chunk)),
                None => {
                    // As per the RIFF spec, unknown chunks are to be ignored.
                    info!(
                        "ignoring unknown chunk: tag={}, len={}",
                        String::from_utf8_lossy(&tag),
                        len
                    );
                    reader.ignore_bytes(u64::from(len))?
                }
            }
        }
    }

    pub fn finish<B: ReadBytes>(&mut self, reader: &mut B) -> Result<()> {
        if self.consumed < self.len {
            let remaining = self.len - self.consumed;
            reader.ignore_bytes(u64::from(remaining))?;
            self.consumed += remaining;
        }

        if self.len & 0x1 == 1 {
            reader.read_u8()?;
        }

        Ok(())
    }
}

/// Common trait implemented for all chunks parsed by a `ChunkParser`.
pub trait ParseChunk: Sized {
    fn parse<B: ReadBytes>(reader: &mut B, tag: [u8; 4], len: u32) -> Result<Self>;
}

/// `ChunkParser` is a utility struct for unifying the parsing of chunks.
pub struct ChunkParser<P: ParseChunk> {
    tag: [u8; 4],
    len: u32,
    phantom: PhantomData<P>,
}

impl<P: ParseChunk> ChunkParser<P> {
    fn new(tag: [u8; 4], len: u32) -> Self {
        ChunkParser { tag, len, phantom: PhantomData }
    }

    pub fn parse<B: ReadBytes>(&self, reader: &mut B) -> Result<P> {
        P::parse(reader, self.tag, self.len)
    }
}

/// The PCM encoding family named by a WAVE `fmt ` chunk's `wFormatTag` field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaveFormat {
    Pcm,
    IeeeFloat,
    ALaw,
    MuLaw,
    Extensible,
    Other(u16),
}

impl WaveFormat {
    fn from_tag(tag: u16) -> Self {
        match tag {
            0x0001 => WaveFormat::Pcm,
            0x0003 => WaveFormat::IeeeFloat,
            0x0006 => WaveFormat::ALaw,
            0x0007 => WaveFormat::MuLaw,
            0xfffe => WaveFormat::Extensible,
            other => WaveFormat::Other(other),
        }
    }
}

/// The WAVE `fmt ` chunk.
pub struct WaveFormatChunk {
    pub format: WaveFormat,
    pub n_channels: u16,
    pub sample_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl ParseChunk for WaveFormatChunk {
    fn parse<B: ReadBytes>(reader: &mut B, _tag: [u8; 4], len: u32) -> Result<Self> {
        if len < 16 {
            return decode_error("wav: malformed fmt chunk");
        }

        let format = WaveFormat::from_tag(reader.read_u16()?);
        let n_channels = reader.read_u16()?;
        let sample_rate = reader.read_u32()?;
        let _avg_bytes_per_sec = reader.read_u32()?;
        let block_align = reader.read_u16()?;
        let bits_per_sample = reader.read_u16()?;

        // Skip any extension bytes (cbSize + extension data in WAVEFORMATEX/EXTENSIBLE).
        if len > 16 {
            reader.ignore_bytes(u64::from(len - 16))?;
        }

        Ok(WaveFormatChunk { format, n_channels, sample_rate, block_align, bits_per_sample })
    }
}

/// The WAVE `data` chunk. Parsing only records the length; the bulk of the chunk is not read.
pub struct DataChunk {
    pub len: u32,
}

impl ParseChunk for DataChunk {
    fn parse<B: ReadBytes>(_reader: &mut B, _tag: [u8; 4], len: u32) -> Result<Self> {
        Ok(DataChunk { len })
    }
}

/// The WAVE `LIST` chunk, which may carry an `INFO` sub-list of descriptive tags.
pub struct ListChunk {
    pub form: [u8; 4],
    pub len: u32,
}

impl ParseChunk for ListChunk {
    fn parse<B: ReadBytes>(reader: &mut B, _tag: [u8; 4], len: u32) -> Result<Self> {
        if len < 4 {
            return decode_error("wav: malformed LIST chunk");
        }
        let form = reader.read_quad_bytes()?;
        Ok(ListChunk { form, len: len - 4 })
    }
}

pub enum RiffWaveChunks {
    Format(ChunkParser<WaveFormatChunk>),
    Data(ChunkParser<DataChunk>),
    List(ChunkParser<ListChunk>),
}

macro_rules! parser {
    ($class:expr, $result:ty, $tag:expr, $len:expr) => {
        Some($class(ChunkParser::<$result>::new($tag, $len)))
    };
}

impl ParseChunkTag for RiffWaveChunks {
    fn parse_tag(tag: [u8; 4], len: u32) -> Option<Self> {
        match &tag {
            b"fmt " => parser!(RiffWaveChunks::Format, WaveFormatChunk, tag, len),
            b"data" => parser!(RiffWaveChunks::Data, DataChunk, tag, len),
            b"LIST" => parser!(RiffWaveChunks::List, ListChunk, tag, len),
            _ => None,
        }
    }
}

/// Map a 4-character RIFF INFO list field ID to a standard tag key.
fn info_key_to_standard(id: &[u8; 4]) -> Option<StandardTagKey> {
    match id {
        b"IART" => Some(StandardTagKey::Artist),
        b"INAM" => Some(StandardTagKey::TrackTitle),
        b"IPRD" => Some(StandardTagKey::Album),
        b"ICRD" => Some(StandardTagKey::Date),
        b"IGNR" => Some(StandardTagKey::Genre),
        b"ICMT" | b"COMM" => Some(StandardTagKey::Comment),
        b"ICOP" => Some(StandardTagKey::Copyright),
        b"ITRK" | b"IPRT" => Some(StandardTagKey::TrackNumber),
        b"TRCK" => Some(StandardTagKey::TrackNumber),
        b"IENC" | b"ISFT" => Some(StandardTagKey::Encoder),
        _ => None,
    }
}

/// Read the sub-chunks of a RIFF INFO list into a `Tag`.
pub fn read_info_list<B: ReadBytes>(reader: &mut B, len: u32) -> Result<Tag> {
    let mut tag = Tag::new(TagKind::RiffInfo, TagTarget::File);

    let mut remaining = len;

    while remaining >= 8 {
        let id = reader.read_quad_bytes()?;
        let field_len = reader.read_u32()?;
        remaining -= 8;

        if field_len > remaining {
            return decode_error("wav: INFO sub-chunk length exceeds LIST length");
        }

        let mut buf = vec![0u8; field_len as usize];
        reader.read_buf_exact(&mut buf)?;
        remaining -= field_len;

        // Sub-chunks are padded to a 2-byte boundary.
        if field_len & 0x1 == 1 {
            reader.read_u8()?;
            if remaining > 0 {
                remaining -= 1;
            }
        }

        // Trim the trailing null terminator and any padding bytes.
        let text_len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        let text = String::from_utf8_lossy(&buf[..text_len]).into_owned();

        let key = format!("{}{}{}{}", id[0] as char, id[1] as char, id[2] as char, id[3] as char);
        let std_key = info_key_to_standard(&id);

        tag.push(TagField::new(std_key, &key, TagValue::from(text)));
    }

    Ok(tag)
}
