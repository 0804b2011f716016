// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::common::FourCc;
use mediatag_core::errors::{unsupported_error, Result};
use mediatag_core::formats::prelude::*;
use mediatag_core::io::*;
use mediatag_core::meta::{Tag, TagKind, TagTarget};
use mediatag_core::probe::{Probeable, ProbeDescriptor, Score};
use mediatag_core::support_format;

use crate::atoms::hdlr::{HandlerType, HdlrAtom};
use crate::atoms::mdia::MdiaAtom;
use crate::atoms::trak::TrakAtom;
use crate::atoms::{Atom, AtomIterator, AtomType, FtypAtom, MoovAtom};

const ISOMP4_FORMAT_INFO: FormatInfo = FormatInfo {
    format: FormatId::new(FourCc::new(*b"isom")),
    short_name: "isomp4",
    long_name: "ISO Base Media File Format (MP4)",
};

fn fnv1a32(bytes: &[u8]) -> u32 {
    const PRIME: u32 = 0x0100_0193;
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Maps a sample entry's atom type to a stable family identifier, using the 4-character code the
/// entry was originally tagged with where one is known.
fn sample_entry_family(atom_type: AtomType) -> u32 {
    let fourcc: &[u8] = match atom_type {
        AtomType::AudioSampleEntryAc3 => b"ac-3",
        AtomType::AudioSampleEntryAlac => b"alac",
        AtomType::AudioSampleEntryALaw => b"alaw",
        AtomType::AudioSampleEntryEc3 => b"ec-3",
        AtomType::AudioSampleEntryF32 => b"fl32",
        AtomType::AudioSampleEntryF64 => b"fl64",
        AtomType::AudioSampleEntryFlac => b"fLaC",
        AtomType::AudioSampleEntryLpcm => b"lpcm",
        AtomType::AudioSampleEntryMp3 => b".mp3",
        AtomType::AudioSampleEntryMp4a => b"mp4a",
        AtomType::AudioSampleEntryMuLaw => b"ulaw",
        AtomType::AudioSampleEntryOpus => b"Opus",
        AtomType::AudioSampleEntryQtWave => b"wave",
        AtomType::AudioSampleEntryS16Be => b"twos",
        AtomType::AudioSampleEntryS16Le => b"sowt",
        AtomType::AudioSampleEntryS24 => b"in24",
        AtomType::AudioSampleEntryS32 => b"in32",
        AtomType::AudioSampleEntryU8 => b"raw ",
        AtomType::VisualSampleEntryAv1 => b"av01",
        AtomType::VisualSampleEntryAvc1 => b"avc1",
        AtomType::VisualSampleEntryDvh1 => b"dvh1",
        AtomType::VisualSampleEntryDvhe => b"dvhe",
        AtomType::VisualSampleEntryHev1 => b"hev1",
        AtomType::VisualSampleEntryHvc1 => b"hvc1",
        AtomType::VisualSampleEntryMp4v => b"mp4v",
        AtomType::VisualSampleEntryVp8 => b"vp08",
        AtomType::VisualSampleEntryVp9 => b"vp09",
        AtomType::Other(ref fourcc) => fourcc,
        _ => return 0,
    };

    fnv1a32(fourcc)
}

/// ISO base media file format (MP4, M4A, M4B, ...) atom-tree reader.
///
/// `IsoMp4Reader` walks the `moov` atom tree, collecting track and metadata information from
/// `trak`/`mdia`/`stbl`/`stsd` and `udta`/`meta`/`ilst`. It does not descend into `mdat`, since
/// sample data is out of scope.
pub struct IsoMp4Reader {
    reader: MediaSourceStream,
    tracks: Vec<Track>,
    tags: Vec<Tag>,
}

impl Probeable for IsoMp4Reader {
    fn probe_descriptor() -> &'static [ProbeDescriptor] {
        &[support_format!(
            ISOMP4_FORMAT_INFO,
            &["mp4", "m4a", "m4b", "m4p", "m4r", "m4v", "mov"],
            &["video/mp4", "audio/mp4", "video/quicktime"],
            &[b"ftyp"]
        )]
    }

    fn score(_src: ScopedStream<&mut MediaSourceStream>) -> Result<Score> {
        Ok(Score::Supported(255))
    }
}

impl ContainerReader for IsoMp4Reader {
    fn try_new(mut source: MediaSourceStream, _options: &FormatOptions) -> Result<Self> {
        let mut ftyp = None;
        let mut moov = None;

        let mut iter = AtomIterator::new_root(&mut source, None);

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::FileType => ftyp = Some(iter.read_atom::<FtypAtom>()?),
                AtomType::Movie => moov = Some(iter.read_atom::<MoovAtom>()?),
                _ => iter.consume_atom(),
            }
        }

        if ftyp.is_none() {
            return unsupported_error("isomp4: missing ftyp atom");
        }

        let moov = match moov {
            Some(moov) => moov,
            None => return unsupported_error("isomp4: missing moov atom"),
        };

        let MoovAtom { mvhd: _, traks, udta } = moov;

        let tracks = traks.into_iter().map(track_from_trak).collect();
        let tags = tags_from_udta(udta);

        Ok(IsoMp4Reader { reader: source, tracks, tags })
    }

    fn format_info(&self) -> &FormatInfo {
        &ISOMP4_FORMAT_INFO
    }

    fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn into_inner(self: Box<Self>) -> MediaSourceStream {
        self.reader
    }
}

fn track_from_trak(trak: TrakAtom) -> Track {
    let TrakAtom { tkhd, mdia } = trak;
    let MdiaAtom { mdhd, hdlr, minf } = mdia;
    let HdlrAtom { handler_type, name } = hdlr;

    let track_type = match handler_type {
        HandlerType::Video => TrackType::Video,
        HandlerType::Sound => TrackType::Audio,
        HandlerType::Subtitle | HandlerType::Text => TrackType::Subtitle,
        HandlerType::Metadata | HandlerType::Other(_) => TrackType::Unknown,
    };

    let mut track = Track::new(tkhd.id, track_type);

    track.timescale = Some(mdhd.timescale);

    if mdhd.timescale > 0 && mdhd.duration != u64::MAX {
        track.duration = Some(mdhd.duration.saturating_mul(1_000_000_000) / u64::from(mdhd.timescale));
    }

    if !mdhd.language.is_empty() {
        track.language = Some(mdhd.language);
    }

    if !name.is_empty() {
        track.name = Some(name);
    }

    if let Some(entry) = minf.stbl.stsd.entries.into_iter().next() {
        track.format.family = sample_entry_family(entry.atom_type);

        if track_type == TrackType::Audio {
            track.channels = entry.channels.map(u32::from);
            track.sample_rate = entry.sample_rate;
            track.bit_depth = entry.bit_depth.map(u32::from);
        }
    }

    track
}

fn tags_from_udta(udta: Option<crate::atoms::UdtaAtom>) -> Vec<Tag> {
    let fields = match udta.and_then(|udta| udta.meta).and_then(|meta| meta.ilst) {
        Some(ilst) => ilst.fields,
        None => return Vec::new(),
    };

    if fields.is_empty() {
        return Vec::new();
    }

    let mut tag = Tag::new(TagKind::Mp4, TagTarget::File);
    for field in fields {
        tag.push(field);
    }

    vec![tag]
}
