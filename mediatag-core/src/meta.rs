// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `meta` module defines metadata elements (tags, pictures, chapters) and the management
//! structures used to read and mutate them.

use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::convert::From;
use std::fmt;
use std::num::NonZeroU32;
use std::ops::Deref;

use crate::common::FourCc;
use crate::errors::Result;
use crate::io::MediaSourceStream;

/// Limit defines how a container or metadata reader should handle resource allocation when the
/// amount of that resource to allocate is dictated by the untrusted stream. Limits are used to
/// prevent denial-of-service attacks whereby the stream requests a reader to allocate large
/// amounts of a resource, usually memory. A limit will place an upper-bound on this allocation at
/// the risk of breaking potentially valid streams.
///
/// All limits can be defaulted to a reasonable value specific to the situation. These defaults will
/// generally not break any normal stream.
#[derive(Copy, Clone)]
pub enum Limit {
    /// Do not impose any limit.
    None,
    /// Use the (reasonable) default specified by the reader.
    Default,
    /// Specify the upper limit of the resource. Units are use-case specific.
    Maximum(usize),
}

impl Limit {
    /// Gets the numeric limit of the limit, or default value. If there is no limit, None is
    /// returned.
    pub fn limit_or_default(&self, default: usize) -> Option<usize> {
        match self {
            Limit::None => None,
            Limit::Default => Some(default),
            Limit::Maximum(max) => Some(*max),
        }
    }
}

/// `MetadataOptions` is a common set of options that all metadata readers use.
#[derive(Copy, Clone)]
pub struct MetadataOptions {
    /// The maximum size limit in bytes that a tag may occupy in memory once decoded. Tags exceeding
    /// this limit will be skipped by the reader. Take note that tags in-memory are stored as UTF-8
    /// and therefore may occupy more than one byte per character.
    pub limit_metadata_bytes: Limit,
    /// The maximum size limit in bytes that a visual (picture) may occupy.
    pub limit_visual_bytes: Limit,
}

impl Default for MetadataOptions {
    fn default() -> Self {
        MetadataOptions {
            limit_metadata_bytes: Limit::Default,
            limit_visual_bytes: Limit::Default,
        }
    }
}

/// A unique identifier for a metadata format, analogous to `formats::FormatId`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetadataId(u32);

impl MetadataId {
    /// Create a new metadata ID from a `FourCc`.
    pub const fn new(cc: FourCc) -> MetadataId {
        Self(0x8000_0000 | u32::from_be_bytes(cc.get()))
    }
}

impl From<FourCc> for MetadataId {
    fn from(value: FourCc) -> Self {
        MetadataId::new(value)
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Basic information about a metadata format.
#[derive(Copy, Clone)]
pub struct MetadataInfo {
    /// The `MetadataId` identifier.
    pub metadata: MetadataId,
    /// A short ASCII-only string identifying the format.
    pub short_name: &'static str,
    /// A longer, more descriptive, string identifying the format.
    pub long_name: &'static str,
}

/// `StandardVisualKey` is an enumeration providing standardized keys for common visual dispositions.
/// A reader may assign a `StandardVisualKey` to a `Visual` if the disposition of the attached
/// visual is known and can be mapped to a standard key.
///
/// The visual types listed here are derived from, though do not entirely cover, the ID3v2 APIC
/// frame specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandardVisualKey {
    FileIcon,
    OtherIcon,
    FrontCover,
    BackCover,
    Leaflet,
    Media,
    LeadArtistPerformerSoloist,
    ArtistPerformer,
    Conductor,
    BandOrchestra,
    Composer,
    Lyricist,
    RecordingLocation,
    RecordingSession,
    Performance,
    ScreenCapture,
    Illustration,
    BandArtistLogo,
    PublisherStudioLogo,
}

/// `StandardTagKey` is an enumeration providing standardized keys for common tag types.
/// A tag reader may assign a `StandardTagKey` to a `TagField` if the field's key is generally
/// accepted to map to a specific usage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandardTagKey {
    AcoustidFingerprint,
    AcoustidId,
    Album,
    AlbumArtist,
    Arranger,
    Artist,
    Bpm,
    Comment,
    Compilation,
    Composer,
    Conductor,
    ContentGroup,
    Copyright,
    Date,
    Description,
    DiscNumber,
    DiscSubtitle,
    DiscTotal,
    EncodedBy,
    Encoder,
    EncoderSettings,
    EncodingDate,
    Engineer,
    Ensemble,
    Genre,
    IdentAsin,
    IdentBarcode,
    IdentCatalogNumber,
    IdentEanUpn,
    IdentIsrc,
    IdentPn,
    IdentPodcast,
    IdentUpc,
    Label,
    Language,
    License,
    Lyricist,
    Lyrics,
    MediaFormat,
    MixDj,
    MixEngineer,
    Mood,
    MovementName,
    MovementNumber,
    MusicBrainzAlbumArtistId,
    MusicBrainzAlbumId,
    MusicBrainzArtistId,
    MusicBrainzDiscId,
    MusicBrainzGenreId,
    MusicBrainzLabelId,
    MusicBrainzOriginalAlbumId,
    MusicBrainzOriginalArtistId,
    MusicBrainzRecordingId,
    MusicBrainzReleaseGroupId,
    MusicBrainzReleaseStatus,
    MusicBrainzReleaseTrackId,
    MusicBrainzReleaseType,
    MusicBrainzTrackId,
    MusicBrainzWorkId,
    Opus,
    OriginalAlbum,
    OriginalArtist,
    OriginalDate,
    OriginalFile,
    OriginalWriter,
    Owner,
    Part,
    PartTotal,
    Performer,
    Podcast,
    PodcastCategory,
    PodcastDescription,
    PodcastKeywords,
    Producer,
    PurchaseDate,
    Rating,
    ReleaseCountry,
    ReleaseDate,
    Remixer,
    ReplayGainAlbumGain,
    ReplayGainAlbumPeak,
    ReplayGainTrackGain,
    ReplayGainTrackPeak,
    Script,
    SortAlbum,
    SortAlbumArtist,
    SortArtist,
    SortComposer,
    SortTrackTitle,
    TaggingDate,
    TrackNumber,
    TrackSubtitle,
    TrackTitle,
    TrackTotal,
    TvEpisode,
    TvEpisodeTitle,
    TvNetwork,
    TvSeason,
    TvShowTitle,
    Url,
    UrlArtist,
    UrlCopyright,
    UrlInternetRadio,
    UrlLabel,
    UrlOfficial,
    UrlPayment,
    UrlPodcast,
    UrlPurchase,
    UrlSource,
    Version,
    Writer,
}

/// The declared character encoding of a `TagValue::Text`.
///
/// The encoding is retained (rather than eagerly normalized to UTF-8) so that lossless
/// round-tripping is possible for formats, such as ID3v2, that permit multiple text encodings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Latin1,
}

/// A position within a set, e.g. "3/12" for track 3 of 12.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// The 1-based index within the set.
    pub index: u32,
    /// The total number of items in the set, if known.
    pub total: Option<u32>,
}

/// A genre, which may be identified by a numeric code (e.g. the legacy ID3v1 genre list), a
/// free-form string, or both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    /// A numeric genre code, if the source format uses one.
    pub id: Option<u8>,
    /// A free-form genre name, if present or resolved from `id`.
    pub name: Option<String>,
}

/// A discriminated `TagField` value.
///
/// Note: the data types in this enumeration are a generalization. Depending on the particular tag
/// format, an actual field's value may have a lesser width or encoding than the data type here.
/// Conversions between encodings are explicit operations on the value, never implicit, so that
/// byte-identical round-tripping is possible where the source format permits it.
pub enum TagValue {
    /// No value; the presence of the field alone is meaningful.
    Empty,
    /// A boolean value.
    Boolean(bool),
    /// A signed integer.
    SignedInt(i64),
    /// An unsigned integer.
    UnsignedInt(u64),
    /// An array of signed integers (e.g. a multi-valued numeric field).
    IntArray(Vec<i64>),
    /// A floating point number.
    Float(f64),
    /// Text with a declared character encoding.
    Text {
        encoding: TextEncoding,
        text: String,
    },
    /// A binary buffer, optionally described by a MIME/media type.
    Binary {
        media_type: Option<String>,
        data: Box<[u8]>,
    },
    /// A date, time, or date-time. Kept as the format-native text representation (e.g. ID3v2's
    /// `YYYY-MM-DD`) rather than parsed into a calendar type, since precision varies by format.
    DateTime(String),
    /// A position within a set, e.g. track or disc number.
    Position(Position),
    /// A genre.
    Genre(Genre),
    /// An embedded picture.
    Picture(Visual),
}

macro_rules! impl_from_for_tag_value {
    ($value:ident, $from:ty, $conv:expr) => {
        impl From<$from> for TagValue {
            fn from($value: $from) -> Self {
                $conv
            }
        }
    };
}

impl_from_for_tag_value!(v, &[u8], TagValue::Binary { media_type: None, data: Box::from(v) });
impl_from_for_tag_value!(v, bool, TagValue::Boolean(v));
impl_from_for_tag_value!(v, f32, TagValue::Float(f64::from(v)));
impl_from_for_tag_value!(v, f64, TagValue::Float(v));
impl_from_for_tag_value!(v, i8, TagValue::SignedInt(i64::from(v)));
impl_from_for_tag_value!(v, i16, TagValue::SignedInt(i64::from(v)));
impl_from_for_tag_value!(v, i32, TagValue::SignedInt(i64::from(v)));
impl_from_for_tag_value!(v, i64, TagValue::SignedInt(v));
impl_from_for_tag_value!(v, u8, TagValue::UnsignedInt(u64::from(v)));
impl_from_for_tag_value!(v, u16, TagValue::UnsignedInt(u64::from(v)));
impl_from_for_tag_value!(v, u32, TagValue::UnsignedInt(u64::from(v)));
impl_from_for_tag_value!(v, u64, TagValue::UnsignedInt(v));
impl_from_for_tag_value!(v, &str, TagValue::Text { encoding: TextEncoding::Utf8, text: String::from(v) });
impl_from_for_tag_value!(v, String, TagValue::Text { encoding: TextEncoding::Utf8, text: v });
impl_from_for_tag_value!(
    v,
    Cow<'_, str>,
    TagValue::Text { encoding: TextEncoding::Utf8, text: String::from(v) }
);

fn buffer_to_hex_string(buf: &[u8]) -> String {
    let mut output = String::with_capacity(5 * buf.len());

    for ch in buf {
        let u = (ch & 0xf0) >> 4;
        let l = ch & 0x0f;
        output.push_str("\\0x");
        output.push(if u < 10 { (b'0' + u) as char } else { (b'a' + u - 10) as char });
        output.push(if l < 10 { (b'0' + l) as char } else { (b'a' + l - 10) as char });
    }

    output
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Empty => write!(f, "<empty>"),
            TagValue::Boolean(b) => fmt::Display::fmt(b, f),
            TagValue::SignedInt(i) => fmt::Display::fmt(i, f),
            TagValue::UnsignedInt(u) => fmt::Display::fmt(u, f),
            TagValue::IntArray(arr) => write!(f, "{:?}", arr),
            TagValue::Float(v) => fmt::Display::fmt(v, f),
            TagValue::Text { text, .. } => fmt::Display::fmt(text, f),
            TagValue::Binary { data, .. } => f.write_str(&buffer_to_hex_string(data)),
            TagValue::DateTime(s) => fmt::Display::fmt(s, f),
            TagValue::Position(Position { index, total: Some(total) }) => write!(f, "{}/{}", index, total),
            TagValue::Position(Position { index, total: None }) => fmt::Display::fmt(index, f),
            TagValue::Genre(Genre { name: Some(name), .. }) => fmt::Display::fmt(name, f),
            TagValue::Genre(Genre { id: Some(id), .. }) => fmt::Display::fmt(id, f),
            TagValue::Genre(_) => write!(f, "<unknown genre>"),
            TagValue::Picture(_) => write!(f, "<picture>"),
        }
    }
}

/// One metadata item within a `Tag`. Carries a typed `TagValue`, an identifier, and optional
/// sub-identifiers (e.g. an ID3v2 COMM frame's language and description, or an MP4 `----` atom's
/// mean/name pair). A field may itself carry nested fields (e.g. a Matroska `SimpleTag`'s child
/// `SimpleTag`s); at least one of `value`/`nested` is populated.
pub struct TagField {
    /// If this field's key string is commonly associated with a typical type, meaning, or purpose,
    /// then if recognized a `StandardTagKey` is assigned.
    ///
    /// This is a best effort guess since not all metadata formats have a well defined or specified
    /// tag mapping. Consumers should prefer `std_key` over `key`, if provided.
    pub std_key: Option<StandardTagKey>,
    /// A key string indicating the type, meaning, or purpose of the field's value.
    ///
    /// The meaning of `key` is dependent on the underlying metadata format.
    pub key: String,
    /// Additional, format-specific sub-identifiers qualifying `key` (e.g. a frame's language and
    /// content-description, or a freeform atom's reverse-DNS mean string).
    pub sub_keys: Vec<String>,
    /// The value of the field.
    pub value: TagValue,
    /// Nested fields, for formats that permit hierarchical tag structures.
    pub nested: Vec<TagField>,
}

impl TagField {
    /// Create a new `TagField`.
    pub fn new(std_key: Option<StandardTagKey>, key: &str, value: TagValue) -> TagField {
        TagField { std_key, key: key.to_string(), sub_keys: Vec::new(), value, nested: Vec::new() }
    }

    /// Attach a sub-identifier to this field.
    pub fn with_sub_key(mut self, sub_key: &str) -> Self {
        self.sub_keys.push(sub_key.to_string());
        self
    }

    /// Attach a nested field.
    pub fn with_nested(mut self, field: TagField) -> Self {
        self.nested.push(field);
        self
    }

    /// Returns true if the field's key string was recognized and a `StandardTagKey` was assigned.
    pub fn is_known(&self) -> bool {
        self.std_key.is_some()
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.std_key {
            Some(ref std_key) => {
                write!(f, "{{ std_key={:?}, key=\"{}\", value={} }}", std_key, self.key, self.value)
            }
            None => write!(f, "{{ key=\"{}\", value={} }}", self.key, self.value),
        }
    }
}

/// The scope a `Tag`'s fields apply to. Matroska generalizes this to arbitrary targets; other
/// formats always use `TagTarget::File`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TagTarget {
    /// The tag applies to the whole file.
    #[default]
    File,
    /// The tag applies to a specific track, identified by UID.
    Track(u64),
    /// The tag applies to a specific chapter, identified by UID.
    Chapter(u64),
    /// The tag applies to a specific edition, identified by UID.
    Edition(u64),
    /// The tag applies to a specific attachment, identified by UID.
    Attachment(u64),
}

/// The concrete tag format a `Tag` bundle was read from, or will be written as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagKind {
    Id3v1,
    Id3v2,
    Mp4,
    Matroska,
    VorbisComment,
    RiffInfo,
}

/// A container-scoped bundle of metadata fields.
///
/// Field identifiers within a tag are tag-type-specific (4-byte ID3v2 frame IDs, 4-byte MP4 atom
/// names, Vorbis uppercase ASCII keys, EBML element ids under a Matroska `SimpleTag`).
pub struct Tag {
    /// The concrete tag format this bundle was read from.
    pub kind: TagKind,
    /// The scope this tag's fields apply to.
    pub target: TagTarget,
    fields: Vec<TagField>,
}

impl Tag {
    /// Create an empty `Tag` of the given kind and target.
    pub fn new(kind: TagKind, target: TagTarget) -> Self {
        Tag { kind, target, fields: Vec::new() }
    }

    /// Gets an immutable slice to the fields in this tag.
    pub fn fields(&self) -> &[TagField] {
        &self.fields
    }

    /// Appends a field, without regard for whether a field with the same key already exists.
    pub fn push(&mut self, field: TagField) {
        self.fields.push(field);
    }

    /// Sets a field, replacing the first existing field with a matching `key` (and, if present,
    /// matching `sub_keys`), or appending it if no such field exists.
    pub fn set(&mut self, field: TagField) {
        if let Some(existing) =
            self.fields.iter_mut().find(|f| f.key == field.key && f.sub_keys == field.sub_keys)
        {
            *existing = field;
        }
        else {
            self.fields.push(field);
        }
    }

    /// Removes all fields matching `key`, returning how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| f.key != key);
        before - self.fields.len()
    }
}

/// A 2 dimensional (width and height) size type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
}

/// `ColorMode` indicates how the color of a pixel is encoded in a `Visual`.
#[derive(Copy, Clone, Debug)]
pub enum ColorMode {
    /// Each pixel in the `Visual` stores its own color information.
    Discrete,
    /// Each pixel in the `Visual` stores an index into a color palette containing the color
    /// information. The value stored by this variant indicates the number of colors in the color
    /// palette.
    Indexed(NonZeroU32),
}

/// A `Visual` is any 2 dimensional graphic embedded in a container or tag.
pub struct Visual {
    /// The Media Type (MIME Type) used to encode the `Visual`.
    pub media_type: String,
    /// A free-form description of the visual.
    pub description: Option<String>,
    /// The dimensions of the `Visual`.
    ///
    /// Note: this value may not be accurate as it comes from metadata, not the embedded graphic
    /// itself. Consider it only a hint.
    pub dimensions: Option<Size>,
    /// The number of bits-per-pixel (aka bit-depth) of the unencoded image.
    ///
    /// Note: this value may not be accurate as it comes from metadata, not the embedded graphic
    /// itself. Consider it only a hint.
    pub bits_per_pixel: Option<NonZeroU32>,
    /// The color mode of the `Visual`.
    pub color_mode: Option<ColorMode>,
    /// The usage and/or content of the `Visual`.
    pub usage: Option<StandardVisualKey>,
    /// Any tags associated with the `Visual`.
    pub tags: Vec<TagField>,
    /// The data of the `Visual`, encoded as per `media_type`.
    pub data: Box<[u8]>,
}

/// `VendorData` is any binary metadata that is proprietary to a certain application or vendor.
pub struct VendorData {
    /// A text representation of the vendor's application identifier.
    pub ident: String,
    /// The vendor data.
    pub data: Box<[u8]>,
}

/// A single chapter: a named, timestamped region of the container, optionally further described
/// by its own tags (e.g. a chapter title).
pub struct Chapter {
    /// The starting timestamp, in nanoseconds from the start of the container.
    pub start_ts: u64,
    /// The ending timestamp, in nanoseconds, if known.
    pub end_ts: Option<u64>,
    /// Tags describing the chapter (e.g. title).
    pub tags: Vec<Tag>,
}

/// A member of a `ChapterGroup`: either a leaf `Chapter` or a nested `ChapterGroup`, allowing
/// chapters to be organized hierarchically (as Matroska editions/chapter atoms permit).
pub enum ChapterGroupItem {
    Chapter(Chapter),
    Group(ChapterGroup),
}

/// An ordered group of chapters, optionally tagged itself (e.g. an edition's name).
#[derive(Default)]
pub struct ChapterGroup {
    /// Tags describing the group as a whole.
    pub tags: Vec<Tag>,
    /// The chapters, or nested groups, contained within this group, in presentation order.
    pub items: Vec<ChapterGroupItem>,
}

/// `Metadata` is a container for a single discrete revision of metadata information.
#[derive(Default)]
pub struct Metadata {
    tags: Vec<Tag>,
    visuals: Vec<Visual>,
    vendor_data: Vec<VendorData>,
    chapters: Option<ChapterGroup>,
}

impl Metadata {
    /// Gets an immutable slice to the `Tag`s in this revision.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Gets a mutable slice to the `Tag`s in this revision.
    pub fn tags_mut(&mut self) -> &mut [Tag] {
        &mut self.tags
    }

    /// Gets an immutable slice to the `Visual`s in this revision.
    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    /// Gets an immutable slice to the `VendorData` in this revision.
    pub fn vendor_data(&self) -> &[VendorData] {
        &self.vendor_data
    }

    /// Gets the chapter tree for this revision, if the container has one.
    pub fn chapters(&self) -> Option<&ChapterGroup> {
        self.chapters.as_ref()
    }
}

/// `MetadataBuilder` is the builder for `Metadata` revisions.
#[derive(Default)]
pub struct MetadataBuilder {
    metadata: Metadata,
}

impl MetadataBuilder {
    /// Instantiate a new `MetadataBuilder`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a `Tag` to the metadata.
    pub fn add_tag(&mut self, tag: Tag) -> &mut Self {
        self.metadata.tags.push(tag);
        self
    }

    /// Add a `Visual` to the metadata.
    pub fn add_visual(&mut self, visual: Visual) -> &mut Self {
        self.metadata.visuals.push(visual);
        self
    }

    /// Add `VendorData` to the metadata.
    pub fn add_vendor_data(&mut self, vendor_data: VendorData) -> &mut Self {
        self.metadata.vendor_data.push(vendor_data);
        self
    }

    /// Set the chapter tree for the metadata.
    pub fn set_chapters(&mut self, chapters: ChapterGroup) -> &mut Self {
        self.metadata.chapters = Some(chapters);
        self
    }

    /// Yield the constructed `Metadata` revision.
    pub fn metadata(self) -> Metadata {
        self.metadata
    }
}

/// An immutable reference to a `Metadata` revision.
pub struct MetadataRef<'a> {
    guard: Ref<'a, VecDeque<Metadata>>,
}

impl<'a> Deref for MetadataRef<'a> {
    type Target = Metadata;

    fn deref(&self) -> &Metadata {
        // MetadataQueue never hands out a MetadataRef if there is no Metadata enqueued.
        self.guard.front().unwrap()
    }
}

/// `MetadataQueue` is a container for time-ordered `Metadata` revisions, used while chained
/// metadata (e.g. an ID3v2 header preceding an MP3 bitstream) is read ahead of a container format.
#[derive(Default)]
pub struct MetadataQueue {
    queue: RefCell<VecDeque<Metadata>>,
}

impl MetadataQueue {
    /// Returns `true` if the current metadata revision is the newest, `false` otherwise.
    pub fn is_latest(&self) -> bool {
        self.queue.borrow().len() < 2
    }

    /// Gets an immutable reference to the current, and therefore oldest, revision of the metadata.
    pub fn current(&self) -> Option<MetadataRef> {
        let queue = self.queue.borrow();

        if !queue.is_empty() {
            Some(MetadataRef { guard: queue })
        }
        else {
            None
        }
    }

    /// If there are newer `Metadata` revisions, advances the `MetadataQueue` by discarding the
    /// current revision and replacing it with the next revision, returning the discarded
    /// `Metadata`. When there are no newer revisions, `None` is returned. As such, `pop` will never
    /// completely empty the queue.
    pub fn pop(&self) -> Option<Metadata> {
        let mut queue = self.queue.borrow_mut();

        if queue.len() > 1 {
            queue.pop_front()
        }
        else {
            None
        }
    }

    /// Pushes a new `Metadata` revision onto the queue.
    pub fn push(&mut self, rev: Metadata) {
        self.queue.borrow_mut().push_back(rev);
    }
}

pub trait MetadataReader: Send {
    /// Instantiates the `MetadataReader` with the provided `MetadataOptions`.
    fn new(options: &MetadataOptions) -> Self
    where
        Self: Sized;

    /// Read all metadata and return it if successful.
    fn read_all(&mut self, reader: &mut MediaSourceStream) -> Result<Metadata>;
}
