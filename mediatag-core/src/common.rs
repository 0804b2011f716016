// Symphonia
// Copyright (c) 2019-2024 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `common` module defines common enums, structs, types, etc.

use std::fmt;

/// Describes the relative preference of a registered container or metadata reader if multiple
/// registered implementations support the same format.
#[derive(Copy, Clone)]
pub enum Tier {
    /// Prefer over others.
    Preferred,
    /// Standard tier: neither preferred nor a fallback. First-party readers are registered at
    /// this level.
    Standard,
    /// Use as a fallback if nothing else is available.
    Fallback,
}

/// A four-character-code, used to compactly and uniquely identify a container or metadata format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Create a new `FourCc` from 4 ASCII bytes.
    pub const fn new(cc: [u8; 4]) -> Self {
        FourCc(cc)
    }

    /// Get the raw bytes of the `FourCc`.
    pub const fn get(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "{:x?}", self.0),
        }
    }
}
