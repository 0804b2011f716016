// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::Result;
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType, IlstAtom};

/// Metadata atom.
#[derive(Debug)]
pub struct MetaAtom {
    /// Metadata tag list, if present.
    pub ilst: Option<IlstAtom>,
}

impl Atom for MetaAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let mut iter = AtomIterator::new(reader, header);

        let mut ilst = None;

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::MetaList => {
                    ilst = Some(iter.read_atom::<IlstAtom>()?);
                }
                _ => (),
            }
        }

        Ok(MetaAtom { ilst })
    }
}
