// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, StblAtom};

/// Media information atom.
#[derive(Debug)]
pub struct MinfAtom {
    /// Sample table atom.
    pub stbl: StblAtom,
}

impl Atom for MinfAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut stbl = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::SampleTable => {
                    stbl = Some(iter.read_atom::<StblAtom>()?);
                }
                _ => (),
            }
        }

        if stbl.is_none() {
            return decode_error("isomp4 (minf): missing stbl atom");
        }

        Ok(MinfAtom { stbl: stbl.unwrap() })
    }
}
