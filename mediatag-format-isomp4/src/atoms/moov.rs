// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, MvhdAtom, TrakAtom, UdtaAtom};

/// Movie atom.
#[derive(Debug)]
pub struct MoovAtom {
    /// Movie header atom.
    pub mvhd: MvhdAtom,
    /// Trak atoms.
    pub traks: Vec<TrakAtom>,
    /// User data (usually metadata).
    pub udta: Option<UdtaAtom>,
}

impl Atom for MoovAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut mvhd = None;
        let mut traks = Vec::new();
        let mut udta = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::MovieHeader => {
                    mvhd = Some(iter.read_atom::<MvhdAtom>()?);
                }
                AtomType::Track => {
                    traks.push(iter.read_atom::<TrakAtom>()?);
                }
                AtomType::UserData => {
                    udta = Some(iter.read_atom::<UdtaAtom>()?);
                }
                _ => (),
            }
        }

        if mvhd.is_none() {
            return decode_error("isomp4: missing mvhd atom");
        }

        Ok(MoovAtom { mvhd: mvhd.unwrap(), traks, udta })
    }
}
