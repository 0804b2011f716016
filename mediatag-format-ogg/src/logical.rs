// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Result};
use mediatag_core::formats::{Track, TrackType};
use mediatag_core::io::{BufReader, ReadBytes};
use mediatag_core::meta::{Tag, TagField, TagKind, TagTarget};

use crate::page::Page;
use crate::vorbis_comment;

fn fnv1a32(bytes: &[u8]) -> u32 {
    const PRIME: u32 = 0x0100_0193;
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[derive(Copy, Clone)]
enum Codec {
    Vorbis,
    Opus,
    Flac,
    Unknown,
}

/// Per-serial state accumulated while scanning the header packets of one logical (encapsulated)
/// bitstream. Only the identification and comment headers are examined; setup headers and the
/// first audio packet are skipped since sample decoding is out of scope.
pub struct LogicalStream {
    codec: Codec,
    track: Track,
    tag: Option<Tag>,
    packet_index: u32,
    partial: Vec<u8>,
    done: bool,
}

impl LogicalStream {
    /// Attempts to identify the codec of a logical stream from its first page's sole packet, the
    /// identification packet. Returns `None` if the packet looks truncated (callers should not
    /// register a logical stream for it), falling back to `Codec::Unknown` for anything else so
    /// that every serial seen in the stream is still represented by a track.
    pub fn detect(serial: u32, ident_packet: &[u8]) -> Self {
        detect_vorbis(serial, ident_packet)
            .or_else(|| detect_opus(serial, ident_packet))
            .or_else(|| detect_flac(serial, ident_packet))
            .unwrap_or_else(|| LogicalStream {
                codec: Codec::Unknown,
                track: Track::new(serial, TrackType::Unknown),
                tag: None,
                packet_index: 1,
                partial: Vec::new(),
                done: true,
            })
    }

    /// Returns `true` once the comment header (or, for streams with no known mapping, nothing at
    /// all) has been consumed and no further pages need to be examined for this stream.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn into_parts(self) -> (Track, Option<Tag>) {
        (self.track, self.tag)
    }

    /// Feeds a page's packets into the header scan. Reassembles a packet that spans a page
    /// boundary before handing it to `handle_header_packet`.
    pub fn read_header_page(&mut self, page: &Page<'_>) {
        if self.done {
            return;
        }

        let mut iter = page.packets();

        for buf in &mut iter {
            self.packet_index += 1;

            if self.partial.is_empty() {
                self.handle_header_packet(buf);
            }
            else {
                self.partial.extend_from_slice(buf);
                let packet = std::mem::take(&mut self.partial);
                self.handle_header_packet(&packet);
            }

            if self.done {
                return;
            }
        }

        if let Some(rest) = iter.partial_packet() {
            self.partial.extend_from_slice(rest);
        }
    }

    fn handle_header_packet(&mut self, packet: &[u8]) {
        match self.codec {
            Codec::Vorbis => {
                if self.packet_index == 2 {
                    if let Ok(fields) = read_vorbis_style_comment(packet) {
                        self.push_tag(fields);
                    }
                    self.done = true;
                }
            }
            Codec::Opus => {
                if self.packet_index == 2 {
                    if packet.len() >= 8 && &packet[..8] == b"OpusTags" {
                        if let Ok(fields) =
                            vorbis_comment::read_comment_fields(&mut BufReader::new(&packet[8..]))
                        {
                            self.push_tag(fields);
                        }
                    }
                    self.done = true;
                }
            }
            Codec::Flac => {
                if let Some((is_last, is_comment_block, body)) = split_flac_metadata_block(packet) {
                    if is_comment_block {
                        if let Ok(fields) = vorbis_comment::read_comment_fields(&mut BufReader::new(body)) {
                            self.push_tag(fields);
                        }
                    }
                    if is_last || self.tag.is_some() {
                        self.done = true;
                    }
                }
                else {
                    self.done = true;
                }
            }
            Codec::Unknown => self.done = true,
        }
    }

    fn push_tag(&mut self, fields: Vec<TagField>) {
        if fields.is_empty() {
            return;
        }
        let mut tag = Tag::new(TagKind::VorbisComment, TagTarget::Track(u64::from(self.track.id)));
        for field in fields {
            tag.push(field);
        }
        self.tag = Some(tag);
    }
}

fn read_vorbis_style_comment(packet: &[u8]) -> Result<Vec<TagField>> {
    let mut reader = BufReader::new(packet);

    let packet_type = reader.read_u8()?;
    if packet_type != 3 {
        return decode_error("ogg: unexpected vorbis comment packet type");
    }

    let mut sig = [0u8; 6];
    reader.read_buf_exact(&mut sig)?;
    if sig != *b"vorbis" {
        return decode_error("ogg: vorbis comment signature mismatch");
    }

    vorbis_comment::read_comment_fields(&mut reader)
}

/// Splits a native FLAC metadata block packet into `(is_last, is_vorbis_comment, body)`. Returns
/// `None` if the packet is too short to contain a block header.
fn split_flac_metadata_block(packet: &[u8]) -> Option<(bool, bool, &[u8])> {
    if packet.len() < 4 {
        return None;
    }

    let header = packet[0];
    let is_last = (header & 0x80) != 0;
    let block_type = header & 0x7f;
    let block_len = ((packet[1] as usize) << 16) | ((packet[2] as usize) << 8) | packet[3] as usize;

    let body = packet.get(4..4 + block_len)?;

    Some((is_last, block_type == 4, body))
}

fn detect_vorbis(serial: u32, buf: &[u8]) -> Option<LogicalStream> {
    if buf.len() != 30 {
        return None;
    }

    let mut reader = BufReader::new(buf);

    if reader.read_u8().ok()? != 1 {
        return None;
    }

    let mut sig = [0u8; 6];
    reader.read_buf_exact(&mut sig).ok()?;
    if sig != *b"vorbis" {
        return None;
    }

    if reader.read_u32().ok()? != 0 {
        return None;
    }

    let channels = reader.read_u8().ok()?;
    if channels == 0 {
        return None;
    }

    let sample_rate = reader.read_u32().ok()?;
    if sample_rate == 0 {
        return None;
    }

    let mut track = Track::new(serial, TrackType::Audio);
    track.format.family = fnv1a32(b"vorb");
    track.channels = Some(u32::from(channels));
    track.sample_rate = Some(sample_rate);

    Some(LogicalStream {
        codec: Codec::Vorbis,
        track,
        tag: None,
        packet_index: 1,
        partial: Vec::new(),
        done: false,
    })
}

fn detect_opus(serial: u32, buf: &[u8]) -> Option<LogicalStream> {
    if buf.len() < 19 || &buf[..8] != b"OpusHead" {
        return None;
    }

    let mut reader = BufReader::new(&buf[8..]);

    let _version = reader.read_u8().ok()?;
    let channels = reader.read_u8().ok()?;
    if channels == 0 {
        return None;
    }

    let _pre_skip = reader.read_u16().ok()?;
    let _input_sample_rate = reader.read_u32().ok()?;

    let mut track = Track::new(serial, TrackType::Audio);
    track.format.family = fnv1a32(b"Opus");
    track.channels = Some(u32::from(channels));
    // Opus always decodes at a fixed 48kHz regardless of the input sample rate above.
    track.sample_rate = Some(48_000);

    Some(LogicalStream {
        codec: Codec::Opus,
        track,
        tag: None,
        packet_index: 1,
        partial: Vec::new(),
        done: false,
    })
}

fn detect_flac(serial: u32, buf: &[u8]) -> Option<LogicalStream> {
    if buf.len() != 51 {
        return None;
    }

    let mut reader = BufReader::new(buf);

    if reader.read_u8().ok()? != 0x7f {
        return None;
    }

    let mut sig = [0u8; 4];
    reader.read_buf_exact(&mut sig).ok()?;
    if sig != *b"FLAC" {
        return None;
    }

    if reader.read_u8().ok()? != 1 {
        return None;
    }
    let _minor = reader.read_u8().ok()?;
    let _num_header_packets = reader.read_be_u16().ok()?;

    let mut native_sig = [0u8; 4];
    reader.read_buf_exact(&mut native_sig).ok()?;
    if native_sig != *b"fLaC" {
        return None;
    }

    // STREAMINFO metadata block header (4 bytes) + body (34 bytes).
    let header = reader.read_u8().ok()?;
    if header & 0x7f != 0 {
        return None;
    }
    let _block_len = reader.read_be_u24().ok()?;

    let mut stream_info = [0u8; 34];
    reader.read_buf_exact(&mut stream_info).ok()?;

    // Sample rate (20 bits), channels minus 1 (3 bits), and bits per sample minus 1 (5 bits) start
    // at bit offset 10 bytes in (after the two 16-bit block size fields and two 24-bit frame size
    // fields).
    let sample_rate = (u32::from(stream_info[10]) << 12)
        | (u32::from(stream_info[11]) << 4)
        | (u32::from(stream_info[12]) >> 4);
    let channels = ((stream_info[12] >> 1) & 0x07) + 1;
    let bit_depth = (((stream_info[12] & 0x01) << 4) | (stream_info[13] >> 4)) + 1;

    let mut track = Track::new(serial, TrackType::Audio);
    track.format.family = fnv1a32(b"fLaC");
    track.channels = Some(u32::from(channels));
    track.sample_rate = Some(sample_rate);
    track.bit_depth = Some(u32::from(bit_depth));

    Some(LogicalStream {
        codec: Codec::Flac,
        track,
        tag: None,
        packet_index: 1,
        partial: Vec::new(),
        done: false,
    })
}
