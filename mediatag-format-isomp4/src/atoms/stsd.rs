// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::Result;
use mediatag_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType};

/// A single entry of a sample description atom. Only the fields useful for populating a `Track`
/// are retained; codec-specific configuration boxes (`esds`, `avcC`, `dfLa`, ...) are not parsed.
#[derive(Debug)]
pub struct SampleEntry {
    pub atom_type: AtomType,
    pub channels: Option<u16>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u16>,
}

impl SampleEntry {
    fn read<B: ReadBytes>(reader: &mut B, header: &AtomHeader, is_audio: bool) -> Result<Self> {
        // Common `SampleEntry` prefix: 6 reserved bytes, then a 2-byte data reference index.
        reader.ignore_bytes(6)?;
        let _data_ref_index = reader.read_be_u16()?;

        let mut channels = None;
        let mut sample_rate = None;
        let mut bit_depth = None;

        if is_audio {
            // `AudioSampleEntry`: version/revision/vendor (8 bytes), channel count, sample size,
            // a pre-defined/packet-size field, and a 16.16 fixed-point sample rate.
            reader.ignore_bytes(8)?;
            channels = Some(reader.read_be_u16()?);
            bit_depth = Some(reader.read_be_u16()?);
            reader.ignore_bytes(4)?;
            sample_rate = Some(reader.read_be_u32()? >> 16);
        }

        // Ignore any remaining payload (codec configuration boxes for this entry).
        if let Some(unread) = header.data_unread_at(reader.pos()) {
            reader.ignore_bytes(unread)?;
        }

        Ok(SampleEntry { atom_type: header.atom_type(), channels, sample_rate, bit_depth })
    }
}

/// Sample description atom.
#[derive(Debug)]
pub struct StsdAtom {
    pub entries: Vec<SampleEntry>,
}

impl StsdAtom {
    /// Returns the first sample entry, if any.
    pub fn primary(&self) -> Option<&SampleEntry> {
        self.entries.first()
    }
}

impl Atom for StsdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let num_entries = reader.read_be_u32()?;

        let mut entries = Vec::with_capacity(num_entries as usize);

        for _ in 0..num_entries {
            let entry_header = AtomHeader::read(reader)?;

            let is_audio = matches!(
                entry_header.atom_type(),
                AtomType::AudioSampleEntryAc3
                    | AtomType::AudioSampleEntryAlac
                    | AtomType::AudioSampleEntryALaw
                    | AtomType::AudioSampleEntryEc3
                    | AtomType::AudioSampleEntryF32
                    | AtomType::AudioSampleEntryF64
                    | AtomType::AudioSampleEntryFlac
                    | AtomType::AudioSampleEntryLpcm
                    | AtomType::AudioSampleEntryMp3
                    | AtomType::AudioSampleEntryMp4a
                    | AtomType::AudioSampleEntryMuLaw
                    | AtomType::AudioSampleEntryOpus
                    | AtomType::AudioSampleEntryQtWave
                    | AtomType::AudioSampleEntryS16Be
                    | AtomType::AudioSampleEntryS16Le
                    | AtomType::AudioSampleEntryS24
                    | AtomType::AudioSampleEntryS32
                    | AtomType::AudioSampleEntryU8
            );

            entries.push(SampleEntry::read(reader, &entry_header, is_audio)?);
        }

        // Any remaining atoms (rarely present, e.g. vendor extensions) are ignored.
        let mut iter = AtomIterator::new(reader, header);
        while iter.next()?.is_some() {
            iter.consume_atom();
        }

        Ok(StsdAtom { entries })
    }
}
