// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all Symphonia crates. Please see clippy.toml for their
// justification.
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

use mediatag_core::common::FourCc;
use mediatag_core::errors::{decode_error, unsupported_error, Result};
use mediatag_core::formats::prelude::*;
use mediatag_core::io::*;
use mediatag_core::meta::Tag;
use mediatag_core::probe::{Probeable, ProbeDescriptor, Score};
use mediatag_core::support_format;

use log::{debug, error};

mod chunks;

use chunks::{read_info_list, ChunksReader, RiffWaveChunks, WaveFormat};

/// WAVE is a RIFF stream, with a "RIFF" ASCII stream marker.
const WAVE_STREAM_MARKER: [u8; 4] = *b"RIFF";
/// The only RIFF form this reader supports.
const WAVE_RIFF_FORM: [u8; 4] = *b"WAVE";

const WAVE_FORMAT_INFO: FormatInfo =
    FormatInfo { format: FormatId::new(FourCc::new(*b"wave")), short_name: "wave", long_name: "Waveform Audio File Format" };

/// Waveform Audio File Format (WAV) container reader.
///
/// `RiffReader` walks a RIFF/WAVE file's top-level chunk list, recording the `fmt ` chunk's
/// technical parameters as the file's single track and collecting any `LIST`/`INFO` chunk's
/// fields into a `Tag`. AIFF is not supported; `FORM`-marked streams are rejected.
pub struct RiffReader {
    reader: MediaSourceStream,
    tracks: Vec<Track>,
    tags: Vec<Tag>,
}

impl Probeable for RiffReader {
    fn probe_descriptor() -> &'static [ProbeDescriptor] {
        &[support_format!(
            WAVE_FORMAT_INFO,
            &["wav", "wave"],
            &["audio/wav", "audio/x-wav", "audio/vnd.wave"],
            &[b"RIFF"]
        )]
    }

    fn score(_src: ScopedStream<&mut MediaSourceStream>) -> Result<Score> {
        Ok(Score::Supported(255))
    }
}

impl ContainerReader for RiffReader {
    fn try_new(mut source: MediaSourceStream, _options: &FormatOptions) -> Result<Self> {
        let marker = source.read_quad_bytes()?;
        if marker != WAVE_STREAM_MARKER {
            return unsupported_error("riff: missing riff stream marker");
        }

        let riff_len = source.read_be_u32()?;
        let riff_form = source.read_quad_bytes()?;

        if riff_form != WAVE_RIFF_FORM {
            error!("riff form is not wave ({})", String::from_utf8_lossy(&riff_form));
            return unsupported_error("riff: riff form is not wave");
        }

        let riff_data_len = if riff_len >= 4 { riff_len - 4 } else { 0 };
        let mut riff_chunks = ChunksReader::<RiffWaveChunks>::new(riff_data_len);

        let mut track = Track::new(0, TrackType::Audio);
        let mut tags = Vec::new();
        let mut saw_format = false;
        let mut saw_data = false;

        while let Some(chunk) = riff_chunks.next(&mut source)? {
            match chunk {
                RiffWaveChunks::Format(fmt) => {
                    let format = fmt.parse(&mut source)?;
                    track.sample_rate = Some(format.sample_rate);
                    track.channels = Some(u32::from(format.n_channels));
                    track.bit_depth = Some(u32::from(format.bits_per_sample));
                    track.format.family = match format.format {
                        WaveFormat::Pcm => u32::from_be_bytes(*b"pcm "),
                        WaveFormat::IeeeFloat => u32::from_be_bytes(*b"flt "),
                        WaveFormat::ALaw => u32::from_be_bytes(*b"alaw"),
                        WaveFormat::MuLaw => u32::from_be_bytes(*b"ulaw"),
                        WaveFormat::Extensible => u32::from_be_bytes(*b"pcmx"),
                        WaveFormat::Other(tag) => u32::from(tag),
                    };
                    track.bitrate = format
                        .sample_rate
                        .checked_mul(u32::from(format.n_channels))
                        .and_then(|v| v.checked_mul(u32::from(format.bits_per_sample)));
                    saw_format = true;
                }
                RiffWaveChunks::Data(data) => {
                    if !saw_format {
                        return decode_error("wav: data chunk before format chunk");
                    }
                    if let Some(bits) = track.bit_depth {
                        if let Some(channels) = track.channels {
                            let block_align = channels * bits / 8;
                            if block_align > 0 {
                                track.sample_count = Some(u64::from(data.len) / u64::from(block_align));
                            }
                        }
                    }
                    saw_data = true;
                }
                RiffWaveChunks::List(list) => {
                    if &list.form == b"INFO" {
                        debug!("parsing RIFF INFO list ({} bytes)", list.len);
                        tags.push(read_info_list(&mut source, list.len)?);
                    }
                    else {
                        source.ignore_bytes(u64::from(list.len))?;
                    }
                }
            }
        }

        if !saw_data {
            return unsupported_error("riff: missing data chunk");
        }

        Ok(RiffReader { reader: source, tracks: vec![track], tags })
    }

    fn format_info(&self) -> &FormatInfo {
        &WAVE_FORMAT_INFO
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
