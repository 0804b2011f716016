// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `formats` module provides the traits and support structures necessary to implement
//! container readers: parsers that walk a container's element tree to enumerate tracks, tags,
//! chapters, and attachments.

use std::fmt;

use crate::common::FourCc;
use crate::errors::Result;
use crate::io::MediaSourceStream;
use crate::meta::{ChapterGroup, Tag, Visual};

pub mod prelude {
    //! The `formats` module prelude for container reader implementers.

    pub use super::{
        Attachment, ContainerReader, FileAttachment, FormatId, FormatInfo, FormatOptions, Track,
        TrackType,
    };
}

/// A unique identifier for a container format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormatId(u32);

impl FormatId {
    /// Create a new format ID from a `FourCc`.
    pub const fn new(cc: FourCc) -> FormatId {
        Self(0x8000_0000 | u32::from_be_bytes(cc.get()))
    }
}

impl From<FourCc> for FormatId {
    fn from(value: FourCc) -> Self {
        FormatId::new(value)
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Basic information about a container format.
#[derive(Copy, Clone)]
pub struct FormatInfo {
    /// The `FormatId` identifier.
    pub format: FormatId,
    /// A short ASCII-only string identifying the format.
    pub short_name: &'static str,
    /// A longer, more descriptive, string identifying the format.
    pub long_name: &'static str,
}

/// `FormatOptions` is a common set of options all container readers use.
#[derive(Copy, Clone, Debug)]
pub struct FormatOptions {
    /// If set, a reader that encounters a non-fatal inconsistency (e.g. a size field that
    /// disagrees with an actual child-element boundary) will still attempt to recover and continue
    /// rather than aborting with a fatal error. Default: `true`.
    pub tolerant: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { tolerant: true }
    }
}

/// The media type of a `Track`.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackType {
    Audio,
    Video,
    Subtitle,
    /// A hint track (e.g. an MP4 hint track) that carries no directly playable media.
    Hint,
    Unknown,
}

/// A `FormatDescriptor` identifies the codec family (and, where applicable, subtype) carried by a
/// `Track`, without attempting to fully parse codec-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FormatDescriptor {
    /// A numeric or FourCC-derived family identifier (e.g. an MP4 `stsd` sample entry FourCC, or
    /// a Matroska `CodecID` string hashed into a stable numeric form).
    pub family: u32,
    /// An optional subtype distinguishing variants within `family`.
    pub subtype: Option<u32>,
    /// A bitmask of extension flags whose meaning is family-specific.
    pub extension_mask: u32,
}

/// A `Track` is an independently coded media bitstream within a container. A container may hold
/// multiple tracks. Technical fields are populated on a best-effort basis: the exact subset filled
/// in depends on the media type and container format.
#[derive(Clone, Debug, Default)]
pub struct Track {
    /// A unique identifier for the track within its container.
    pub id: u32,
    /// The media type carried by the track.
    pub track_type: TrackType,
    /// The codec family/subtype descriptor.
    pub format: FormatDescriptor,
    /// The duration of the track, in nanoseconds, if known.
    pub duration: Option<u64>,
    /// The nominal bitrate, in bits per second.
    pub bitrate: Option<u32>,
    /// The maximum bitrate, in bits per second, for variable-bitrate streams.
    pub max_bitrate: Option<u32>,
    /// The audio sample rate, in Hz.
    pub sample_rate: Option<u32>,
    /// The number of audio channels.
    pub channels: Option<u32>,
    /// The audio or video sample bit depth.
    pub bit_depth: Option<u32>,
    /// The video frame rate, in frames per second.
    pub fps: Option<f64>,
    /// The number of timescale units per second, used to interpret format-native timestamps.
    pub timescale: Option<u32>,
    /// The track's ISO-639 (3-letter) language code, if known.
    pub language: Option<String>,
    /// A human-readable track name.
    pub name: Option<String>,
    /// Whether the track is enabled for playback by default.
    pub enabled: bool,
    /// Whether the track is the default track for its media type.
    pub default: bool,
    /// Whether the track should always be played regardless of language preference.
    pub forced: bool,
    /// Whether samples in the track use lacing (multiple frames packed into one container frame).
    pub lacing: bool,
    /// Whether the track's samples are encrypted.
    pub encrypted: bool,
    /// The display width and height, in pixels, for video tracks.
    pub display_dimensions: Option<(u32, u32)>,
    /// The pixel aspect ratio, as a (numerator, denominator) pair, for video tracks.
    pub pixel_aspect_ratio: Option<(u32, u32)>,
    /// A short identifier for the track's color space (e.g. `"bt709"`).
    pub color_space: Option<String>,
    /// The total number of samples/frames in the track, if known.
    pub sample_count: Option<u64>,
}

impl Track {
    /// Instantiate a new, otherwise empty, track with the given id and type.
    pub fn new(id: u32, track_type: TrackType) -> Self {
        Track { id, track_type, enabled: true, ..Default::default() }
    }
}

impl Default for TrackType {
    fn default() -> Self {
        TrackType::Unknown
    }
}

/// A file attachment: an arbitrary named blob carried alongside a container (e.g. a Matroska
/// attached font or cover-art file distinct from a tag's embedded `Visual`).
pub struct FileAttachment {
    /// The file name.
    pub name: String,
    /// An optional description of the file.
    pub description: Option<String>,
    /// An optional media-type describing the file data.
    pub media_type: Option<String>,
    /// The file data.
    pub data: Box<[u8]>,
}

/// Additional data carried along with the container format, distinct from a track or a tag.
pub enum Attachment {
    /// A named file.
    File(FileAttachment),
    /// An embedded picture, surfaced as an attachment rather than via a tag (e.g. a Matroska
    /// attached cover image with no associated `SimpleTag`).
    Visual(Visual),
}

/// A `ContainerReader` parses a media container's element tree and exposes its tracks, tags,
/// chapters, and attachments. It performs no sample decoding: reading stops at locating and
/// interpreting container-level structure and metadata.
pub trait ContainerReader: Send + Sync {
    /// Attempt to instantiate a `ContainerReader`, reading just enough of the stream to confirm
    /// format support and enumerate its tracks and metadata.
    fn try_new(source: MediaSourceStream, options: &FormatOptions) -> Result<Self>
    where
        Self: Sized;

    /// Get basic information about the container format.
    fn format_info(&self) -> &FormatInfo;

    /// Gets a list of tracks in the container.
    fn tracks(&self) -> &[Track];

    /// Gets a list of tags read from the container.
    fn tags(&self) -> &[Tag];

    /// Gets a list of visuals (e.g. embedded cover art) read from the container.
    ///
    /// # For implementations
    ///
    /// The default implementation returns an empty slice; most formats instead surface visuals as
    /// fields of a `Tag` (e.g. ID3v2 APIC, MP4 `covr`).
    fn visuals(&self) -> &[Visual] {
        &[]
    }

    /// Gets a list of attachments carried by the container.
    ///
    /// # For implementations
    ///
    /// The default implementation returns an empty slice.
    fn attachments(&self) -> &[Attachment] {
        &[]
    }

    /// Gets the chapter tree, if the container has one.
    ///
    /// # For implementations
    ///
    /// The default implementation returns `None`.
    fn chapters(&self) -> Option<&ChapterGroup> {
        None
    }

    /// Destroys the `ContainerReader` and returns the underlying media source stream.
    fn into_inner(self: Box<Self>) -> MediaSourceStream;
}
