// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::Result;
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, MetaAtom};

/// User data atom.
#[derive(Debug)]
pub struct UdtaAtom {
    /// Metadata atom.
    pub meta: Option<MetaAtom>,
}

impl Atom for UdtaAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut meta = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::Meta => {
                    meta = Some(iter.read_atom::<MetaAtom>()?);
                }
                _ => (),
            }
        }

        Ok(UdtaAtom { meta })
    }
}
