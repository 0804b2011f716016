// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use mediatag_core::common::FourCc;
use mediatag_core::errors::{unsupported_error, Result};
use mediatag_core::formats::prelude::*;
use mediatag_core::io::*;
use mediatag_core::meta::Tag;
use mediatag_core::probe::{Probeable, ProbeDescriptor, Score};
use mediatag_core::support_format;

use crate::logical::LogicalStream;
use crate::page::PageReader;

const OGG_FORMAT_INFO: FormatInfo =
    FormatInfo { format: FormatId::new(FourCc::new(*b"ogg ")), short_name: "ogg", long_name: "OGG" };

/// Xiph OGG page reader.
///
/// `OggReader` groups pages by serial number into logical (encapsulated) bitstreams, identifies
/// each stream's codec from its identification packet, and collects the Vorbis comment header
/// carried by each recognized stream. It stops scanning each logical stream as soon as its
/// comment header (or, for FLAC, its final metadata block) has been read, since sample data is
/// out of scope.
pub struct OggReader {
    reader: MediaSourceStream,
    tracks: Vec<Track>,
    tags: Vec<Tag>,
}

impl Probeable for OggReader {
    fn probe_descriptor() -> &'static [ProbeDescriptor] {
        &[support_format!(
            OGG_FORMAT_INFO,
            &["ogg", "ogv", "oga", "ogx", "ogm", "spx", "opus"],
            &["video/ogg", "audio/ogg", "application/ogg"],
            &[b"OggS"]
        )]
    }

    fn score(_src: ScopedStream<&mut MediaSourceStream>) -> Result<Score> {
        Ok(Score::Supported(255))
    }
}

impl ContainerReader for OggReader {
    fn try_new(mut source: MediaSourceStream, _options: &FormatOptions) -> Result<Self> {
        let mut pages = PageReader::try_new(&mut source)?;

        if !pages.header().is_first_page {
            return unsupported_error("ogg: page is not marked as first");
        }

        let mut streams: BTreeMap<u32, LogicalStream> = BTreeMap::new();

        // The first page of each logical stream in the opening group is marked as a first page
        // and carries only the identification packet.
        loop {
            let header = pages.header();

            if !header.is_first_page {
                break;
            }

            if let Some(pkt) = pages.first_packet() {
                streams.insert(header.serial, LogicalStream::detect(header.serial, pkt));
            }

            if pages.try_next_page(&mut source).is_err() {
                break;
            }
        }

        // Subsequent pages carry comment (and, for formats that have one, setup) headers. Keep
        // reading until every identified stream has consumed its comment header.
        while !streams.is_empty() && !streams.values().all(LogicalStream::is_done) {
            let page = pages.page();

            if let Some(stream) = streams.get_mut(&page.header.serial) {
                stream.read_header_page(&page);
            }

            if pages.try_next_page(&mut source).is_err() {
                break;
            }
        }

        if streams.is_empty() {
            return unsupported_error("ogg: no logical streams detected");
        }

        let mut tracks = Vec::with_capacity(streams.len());
        let mut tags = Vec::new();

        for (_, stream) in streams {
            let (track, tag) = stream.into_parts();
            tracks.push(track);
            tags.extend(tag);
        }

        Ok(OggReader { reader: source, tracks, tags })
    }

    fn format_info(&self) -> &FormatInfo {
        &OGG_FORMAT_INFO
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
