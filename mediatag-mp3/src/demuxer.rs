// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::common::FourCc;
use mediatag_core::errors::Result;
use mediatag_core::formats::prelude::*;
use mediatag_core::io::*;
use mediatag_core::meta::Tag;
use mediatag_core::probe::{Probeable, ProbeDescriptor, Score};
use mediatag_core::support_format;

use super::header;

const MP3_FORMAT_INFO: FormatInfo =
    FormatInfo { format: FormatId::new(FourCc::new(*b"mp3 ")), short_name: "mp3", long_name: "MPEG Audio Layer 3 Native" };

/// MPEG1 and MPEG2 audio frame reader.
///
/// `Mp3Reader` locates the first MPEG audio frame to confirm the stream is MP3, and exposes the
/// single resulting audio track. No frame decoding is performed; frame-level metadata (ID3v1,
/// ID3v2) is read by `mediatag-metadata` before this reader is instantiated.
pub struct Mp3Reader {
    reader: MediaSourceStream,
    tracks: Vec<Track>,
    tags: Vec<Tag>,
}

impl Probeable for Mp3Reader {
    fn probe_descriptor() -> &'static [ProbeDescriptor] {
        &[support_format!(
            MP3_FORMAT_INFO,
            &["mp3"],
            &["audio/mp3", "audio/mpeg"],
            &[
                &[0xff, 0xfa], &[0xff, 0xfb], // MPEG 1
                &[0xff, 0xf2], &[0xff, 0xf3], // MPEG 2
                &[0xff, 0xe2], &[0xff, 0xe3], // MPEG 2.5
            ]
        )]
    }

    fn score(_src: ScopedStream<&mut MediaSourceStream>) -> Result<Score> {
        Ok(Score::Supported(255))
    }
}

impl ContainerReader for Mp3Reader {
    fn try_new(mut source: MediaSourceStream, _options: &FormatOptions) -> Result<Self> {
        // Parse the header of the first MPEG frame to confirm this is an MP3 stream and to
        // populate the track's technical fields.
        let header = header::parse_frame_header(source.read_be_u32()?)?;

        source.rewind(std::mem::size_of::<u32>());

        let mut track = Track::new(0, TrackType::Audio);
        track.sample_rate = Some(header.sample_rate);
        track.channels = Some(header.n_channels());
        track.bitrate = Some(header.bitrate);

        Ok(Mp3Reader { reader: source, tracks: vec![track], tags: Vec::new() })
    }

    fn format_info(&self) -> &FormatInfo {
        &MP3_FORMAT_INFO
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
