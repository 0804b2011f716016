// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, MdiaAtom, TkhdAtom};

/// Track atom.
#[derive(Debug)]
pub struct TrakAtom {
    /// Track header atom.
    pub tkhd: TkhdAtom,
    /// Media atom.
    pub mdia: MdiaAtom,
}

impl Atom for TrakAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut tkhd = None;
        let mut mdia = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::TrackHeader => {
                    tkhd = Some(iter.read_atom::<TkhdAtom>()?);
                }
                AtomType::Media => {
                    mdia = Some(iter.read_atom::<MdiaAtom>()?);
                }
                _ => (),
            }
        }

        if tkhd.is_none() {
            return decode_error("isomp4: missing tkhd atom");
        }

        if mdia.is_none() {
            return decode_error("isomp4: missing mdia atom");
        }

        Ok(TrakAtom { tkhd: tkhd.unwrap(), mdia: mdia.unwrap() })
    }
}
