// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, StsdAtom};

/// Sample table atom.
///
/// Only the sample description (`stsd`) is read; the sample-to-chunk, sample size, chunk offset,
/// and timing tables describe where samples live in the media data and are out of scope here.
#[derive(Debug)]
pub struct StblAtom {
    pub stsd: StsdAtom,
}

impl Atom for StblAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut stsd = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::SampleDescription => {
                    stsd = Some(iter.read_atom::<StsdAtom>()?);
                }
                _ => (),
            }
        }

        if stsd.is_none() {
            return decode_error("isomp4 (stbl): missing stsd atom");
        }

        Ok(StblAtom { stsd: stsd.unwrap() })
    }
}
