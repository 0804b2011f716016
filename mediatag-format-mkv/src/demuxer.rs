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
use mediatag_core::meta::{
    Chapter, ChapterGroup, ChapterGroupItem, StandardTagKey, Tag, TagField, TagKind, TagTarget, TagValue,
};
use mediatag_core::probe::{Probeable, ProbeDescriptor, Score};
use mediatag_core::support_format;

use crate::ebml::{Element, ElementHeader, ElementIterator};
use crate::element_ids::ElementType;

const MKV_FORMAT_INFO: FormatInfo =
    FormatInfo { format: FormatId::new(FourCc::new(*b"mkv ")), short_name: "matroska", long_name: "Matroska / WebM" };

const EBML_MARKER: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// Matroska/WebM EBML element-tree reader.
///
/// `MkvReader` walks the `EBML`/`Segment` top-level elements of a Matroska or WebM stream,
/// collecting track, tag, chapter, and attachment information. It stops descending into the
/// stream as soon as it reaches the first `Cluster` element, since sample data is out of scope.
pub struct MkvReader {
    reader: MediaSourceStream,
    tracks: Vec<Track>,
    tags: Vec<Tag>,
    attachments: Vec<Attachment>,
    chapters: Option<ChapterGroup>,
}

impl Probeable for MkvReader {
    fn probe_descriptor() -> &'static [ProbeDescriptor] {
        &[support_format!(
            MKV_FORMAT_INFO,
            &["mkv", "webm", "mka", "mks"],
            &["video/webm", "video/x-matroska", "audio/webm", "audio/x-matroska"],
            &[&EBML_MARKER]
        )]
    }

    fn score(_src: ScopedStream<&mut MediaSourceStream>) -> Result<Score> {
        Ok(Score::Supported(255))
    }
}

impl ContainerReader for MkvReader {
    fn try_new(mut source: MediaSourceStream, _options: &FormatOptions) -> Result<Self> {
        let mut tracks = Vec::new();
        let mut tags = Vec::new();
        let mut attachments = Vec::new();
        let mut chapters = None;
        let mut saw_ebml_header = false;
        let mut saw_segment = false;

        let mut top = ElementIterator::new(&mut source, None);
        while let Some(header) = top.read_header()? {
            match header.etype {
                ElementType::Ebml => {
                    let ebml: EbmlHeaderElement = top.read_element_data()?;
                    if ebml.doc_type != "matroska" && ebml.doc_type != "webm" {
                        return unsupported_error("mkv: unsupported doc type");
                    }
                    saw_ebml_header = true;
                }
                ElementType::Segment => {
                    let segment: SegmentElement = top.read_element_data()?;
                    tracks = segment.tracks;
                    tags = segment.tags;
                    attachments = segment.attachments;
                    chapters = segment.chapters;
                    saw_segment = true;
                }
                _ => top.ignore_data()?,
            }
        }

        if !saw_ebml_header || !saw_segment {
            return unsupported_error("mkv: missing EBML header or segment");
        }

        Ok(MkvReader { reader: source, tracks, tags, attachments, chapters })
    }

    fn format_info(&self) -> &FormatInfo {
        &MKV_FORMAT_INFO
    }

    fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    fn chapters(&self) -> Option<&ChapterGroup> {
        self.chapters.as_ref()
    }

    fn into_inner(self: Box<Self>) -> MediaSourceStream {
        self.reader
    }
}

/// The `EBML` header element, identifying the doc type (`matroska` or `webm`).
struct EbmlHeaderElement {
    doc_type: String,
}

impl Element for EbmlHeaderElement {
    const ID: ElementType = ElementType::Ebml;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut doc_type = String::from("matroska");

        while let Some(child) = it.read_header()? {
            if child.etype == ElementType::DocType {
                doc_type = it.read_string()?;
            }
            else {
                it.ignore_data()?;
            }
        }

        Ok(EbmlHeaderElement { doc_type })
    }
}

/// The `Segment` element. Descends only as far as the top-level elements that matter for
/// metadata: `Tracks`, `Tags`, `Chapters`, and `Attachments`. Stops at the first `Cluster`, since
/// sample data is out of scope.
struct SegmentElement {
    tracks: Vec<Track>,
    tags: Vec<Tag>,
    attachments: Vec<Attachment>,
    chapters: Option<ChapterGroup>,
}

impl Element for SegmentElement {
    const ID: ElementType = ElementType::Segment;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);

        let mut tracks = Vec::new();
        let mut tags = Vec::new();
        let mut attachments = Vec::new();
        let mut chapters = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::Tracks => {
                    let entries: TracksElement = it.read_element_data()?;
                    tracks = entries.0.iter().map(TrackEntryElement::to_track).collect();
                }
                ElementType::Tags => {
                    let tags_elem: TagsElement = it.read_element_data()?;
                    tags.extend(tags_elem.0);
                }
                ElementType::Chapters => {
                    let chapters_elem: ChaptersElement = it.read_element_data()?;
                    chapters = chapters_elem.into_group();
                }
                ElementType::Attachments => {
                    let attachments_elem: AttachmentsElement = it.read_element_data()?;
                    attachments = attachments_elem.0;
                }
                ElementType::Cluster => {
                    // Sample data begins here; metadata collection is complete.
                    break;
                }
                _ => it.ignore_data()?,
            }
        }

        Ok(SegmentElement { tracks, tags, attachments, chapters })
    }
}

fn standard_key_for(name: &str) -> Option<StandardTagKey> {
    match name {
        "TITLE" => Some(StandardTagKey::TrackTitle),
        "SUBTITLE" => Some(StandardTagKey::TrackSubtitle),
        "ARTIST" => Some(StandardTagKey::Artist),
        "ALBUM" => Some(StandardTagKey::Album),
        "ALBUM_ARTIST" => Some(StandardTagKey::AlbumArtist),
        "COMPOSER" => Some(StandardTagKey::Composer),
        "CONDUCTOR" => Some(StandardTagKey::Conductor),
        "LYRICIST" => Some(StandardTagKey::Lyricist),
        "LYRICS" => Some(StandardTagKey::Lyrics),
        "GENRE" => Some(StandardTagKey::Genre),
        "MOOD" => Some(StandardTagKey::Mood),
        "COMMENT" | "DESCRIPTION" | "SUMMARY" | "SYNOPSIS" => Some(StandardTagKey::Comment),
        "COPYRIGHT" => Some(StandardTagKey::Copyright),
        "LABEL" | "PUBLISHER" => Some(StandardTagKey::Label),
        "ENCODED_BY" => Some(StandardTagKey::EncodedBy),
        "ENCODER" => Some(StandardTagKey::Encoder),
        "DATE_RELEASED" => Some(StandardTagKey::ReleaseDate),
        "DATE_RECORDED" | "DATE" => Some(StandardTagKey::Date),
        "BPM" => Some(StandardTagKey::Bpm),
        "PART_NUMBER" => Some(StandardTagKey::Part),
        "TOTAL_PARTS" => Some(StandardTagKey::PartTotal),
        "ORIGINAL_ARTIST" => Some(StandardTagKey::OriginalArtist),
        "ORIGINAL_TITLE" => Some(StandardTagKey::OriginalAlbum),
        _ => None,
    }
}

/// A small FNV-1a hash reduced to 32 bits, used to fold a Matroska `CodecID` string (e.g.
/// `"A_OPUS"`, `"V_VP9"`) into the numeric `FormatDescriptor::family` slot.
fn fnv1a32(bytes: &[u8]) -> u32 {
    const PRIME: u32 = 0x0100_0193;
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

struct AudioInfo {
    sample_rate: Option<f64>,
    channels: Option<u64>,
    bit_depth: Option<u64>,
}

impl Element for AudioInfo {
    const ID: ElementType = ElementType::Audio;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut sample_rate = None;
        let mut channels = None;
        let mut bit_depth = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::SamplingFrequency => sample_rate = Some(it.read_f64()?),
                ElementType::Channels => channels = Some(it.read_u64()?),
                ElementType::BitDepth => bit_depth = Some(it.read_u64()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(AudioInfo { sample_rate, channels, bit_depth })
    }
}

struct VideoInfo {
    pixel_width: Option<u64>,
    pixel_height: Option<u64>,
    display_width: Option<u64>,
    display_height: Option<u64>,
}

impl Element for VideoInfo {
    const ID: ElementType = ElementType::Video;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut pixel_width = None;
        let mut pixel_height = None;
        let mut display_width = None;
        let mut display_height = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::PixelWidth => pixel_width = Some(it.read_u64()?),
                ElementType::PixelHeight => pixel_height = Some(it.read_u64()?),
                ElementType::DisplayWidth => display_width = Some(it.read_u64()?),
                ElementType::DisplayHeight => display_height = Some(it.read_u64()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(VideoInfo { pixel_width, pixel_height, display_width, display_height })
    }
}

struct TrackEntryElement {
    number: u64,
    track_type: u64,
    language: Option<String>,
    codec_id: Option<String>,
    name: Option<String>,
    flag_enabled: bool,
    flag_default: bool,
    flag_forced: bool,
    flag_lacing: bool,
    default_duration: Option<u64>,
    audio: Option<AudioInfo>,
    video: Option<VideoInfo>,
}

impl Element for TrackEntryElement {
    const ID: ElementType = ElementType::TrackEntry;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);

        let mut number = 0;
        let mut track_type = 0;
        let mut language = None;
        let mut codec_id = None;
        let mut name = None;
        let mut flag_enabled = true;
        let mut flag_default = true;
        let mut flag_forced = false;
        let mut flag_lacing = false;
        let mut default_duration = None;
        let mut audio = None;
        let mut video = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::TrackNumber => number = it.read_u64()?,
                ElementType::TrackType => track_type = it.read_u64()?,
                ElementType::Language => language = Some(it.read_string()?),
                ElementType::CodecId => codec_id = Some(it.read_string()?),
                ElementType::Name => name = Some(it.read_string()?),
                ElementType::FlagEnabled => flag_enabled = it.read_u64()? != 0,
                ElementType::FlagDefault => flag_default = it.read_u64()? != 0,
                ElementType::FlagForced => flag_forced = it.read_u64()? != 0,
                ElementType::FlagLacing => flag_lacing = it.read_u64()? != 0,
                ElementType::DefaultDuration => default_duration = Some(it.read_u64()?),
                ElementType::Audio => audio = Some(it.read_element_data()?),
                ElementType::Video => video = Some(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(TrackEntryElement {
            number,
            track_type,
            language,
            codec_id,
            name,
            flag_enabled,
            flag_default,
            flag_forced,
            flag_lacing,
            default_duration,
            audio,
            video,
        })
    }
}

impl TrackEntryElement {
    fn to_track(&self) -> Track {
        let track_type = match self.track_type {
            1 => TrackType::Video,
            2 => TrackType::Audio,
            0x11 => TrackType::Subtitle,
            _ => TrackType::Unknown,
        };

        let mut track = Track::new(self.number as u32, track_type);
        track.language = self.language.clone();
        track.name = self.name.clone();
        track.enabled = self.flag_enabled;
        track.default = self.flag_default;
        track.forced = self.flag_forced;
        track.lacing = self.flag_lacing;

        if let Some(codec_id) = &self.codec_id {
            track.format.family = fnv1a32(codec_id.as_bytes());
        }

        if let Some(audio) = &self.audio {
            track.sample_rate = audio.sample_rate.map(|v| v as u32);
            track.channels = audio.channels.map(|v| v as u32);
            track.bit_depth = audio.bit_depth.map(|v| v as u32);
        }

        if let Some(video) = &self.video {
            let width = video.display_width.or(video.pixel_width);
            let height = video.display_height.or(video.pixel_height);
            if let (Some(w), Some(h)) = (width, height) {
                track.display_dimensions = Some((w as u32, h as u32));
            }
        }

        if let Some(default_duration) = self.default_duration {
            track.fps = Some(1_000_000_000.0 / default_duration as f64);
        }

        track
    }
}

struct TracksElement(Vec<TrackEntryElement>);

impl Element for TracksElement {
    const ID: ElementType = ElementType::Tracks;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        Ok(TracksElement(it.read_elements::<TrackEntryElement>()?.into_vec()))
    }
}

enum SimpleTagValue {
    None,
    Text(String),
    Binary(Vec<u8>),
}

struct SimpleTagElement {
    name: String,
    language: Option<String>,
    value: SimpleTagValue,
    nested: Vec<SimpleTagElement>,
}

impl Element for SimpleTagElement {
    const ID: ElementType = ElementType::SimpleTag;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);

        let mut name = String::new();
        let mut language = None;
        let mut value = SimpleTagValue::None;
        let mut nested = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::TagName => name = it.read_string()?,
                ElementType::TagLanguage => language = Some(it.read_string()?),
                ElementType::TagString => value = SimpleTagValue::Text(it.read_string()?),
                ElementType::TagBinary => value = SimpleTagValue::Binary(it.read_boxed_slice()?.into_vec()),
                ElementType::SimpleTag => nested.push(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(SimpleTagElement { name, language, value, nested })
    }
}

impl SimpleTagElement {
    fn to_field(&self) -> TagField {
        let value = match &self.value {
            SimpleTagValue::Text(s) => TagValue::from(s.clone()),
            SimpleTagValue::Binary(b) => TagValue::from(b.as_slice()),
            SimpleTagValue::None => TagValue::Empty,
        };

        let mut field = TagField::new(standard_key_for(&self.name), &self.name, value);
        if let Some(lang) = &self.language {
            field = field.with_sub_key(lang);
        }
        for nested in &self.nested {
            field = field.with_nested(nested.to_field());
        }
        field
    }
}

struct TargetsElement {
    track_uid: Option<u64>,
}

impl Element for TargetsElement {
    const ID: ElementType = ElementType::Targets;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut track_uid = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::TagTrackUid => track_uid = Some(it.read_u64()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(TargetsElement { track_uid })
    }
}

struct TagElement {
    targets: TargetsElement,
    simple_tags: Vec<SimpleTagElement>,
}

impl Element for TagElement {
    const ID: ElementType = ElementType::Tag;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut targets = TargetsElement { track_uid: None };
        let mut simple_tags = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::Targets => targets = it.read_element_data()?,
                ElementType::SimpleTag => simple_tags.push(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(TagElement { targets, simple_tags })
    }
}

impl TagElement {
    fn to_tag(&self) -> Tag {
        let target = match self.targets.track_uid {
            Some(uid) => TagTarget::Track(uid),
            None => TagTarget::File,
        };
        let mut tag = Tag::new(TagKind::Matroska, target);
        for simple in &self.simple_tags {
            tag.push(simple.to_field());
        }
        tag
    }
}

struct TagsElement(Vec<Tag>);

impl Element for TagsElement {
    const ID: ElementType = ElementType::Tags;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut tags = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::Tag => {
                    let tag_elem: TagElement = it.read_element_data()?;
                    tags.push(tag_elem.to_tag());
                }
                _ => it.ignore_data()?,
            }
        }

        Ok(TagsElement(tags))
    }
}

struct ChapterDisplayElement {
    string: String,
    language: Option<String>,
}

impl Element for ChapterDisplayElement {
    const ID: ElementType = ElementType::ChapterDisplay;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut string = String::new();
        let mut language = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::ChapString => string = it.read_string()?,
                ElementType::ChapLanguageIetf | ElementType::ChapLanguage => language = Some(it.read_string()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(ChapterDisplayElement { string, language })
    }
}

struct ChapterAtomElement {
    time_start: u64,
    time_end: Option<u64>,
    displays: Vec<ChapterDisplayElement>,
    nested: Vec<ChapterAtomElement>,
}

impl Element for ChapterAtomElement {
    const ID: ElementType = ElementType::ChapterAtom;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut time_start = 0;
        let mut time_end = None;
        let mut displays = Vec::new();
        let mut nested = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::ChapterTimeStart => time_start = it.read_u64()?,
                ElementType::ChapterTimeEnd => time_end = Some(it.read_u64()?),
                ElementType::ChapterDisplay => displays.push(it.read_element_data()?),
                ElementType::ChapterAtom => nested.push(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(ChapterAtomElement { time_start, time_end, displays, nested })
    }
}

impl ChapterAtomElement {
    fn display_tags(&self) -> Vec<Tag> {
        self.displays
            .iter()
            .map(|d| {
                let mut tag = Tag::new(TagKind::Matroska, TagTarget::Chapter(0));
                let mut field =
                    TagField::new(Some(StandardTagKey::TrackTitle), "CHAPTER_DISPLAY", TagValue::from(d.string.clone()));
                if let Some(lang) = &d.language {
                    field = field.with_sub_key(lang);
                }
                tag.push(field);
                tag
            })
            .collect()
    }

    /// Converts this atom into a `ChapterGroupItem`. Matroska allows a chapter atom to carry both
    /// its own time range and nested sub-chapters; the current chapter model cannot represent a
    /// group with its own timing, so an atom with children is represented as a `Group` (dropping
    /// its own start/end) rather than as a leaf `Chapter`.
    fn to_item(&self) -> ChapterGroupItem {
        if self.nested.is_empty() {
            ChapterGroupItem::Chapter(Chapter {
                start_ts: self.time_start,
                end_ts: self.time_end,
                tags: self.display_tags(),
            })
        }
        else {
            ChapterGroupItem::Group(ChapterGroup {
                tags: self.display_tags(),
                items: self.nested.iter().map(ChapterAtomElement::to_item).collect(),
            })
        }
    }
}

struct EditionEntryElement {
    atoms: Vec<ChapterAtomElement>,
}

impl Element for EditionEntryElement {
    const ID: ElementType = ElementType::EditionEntry;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut atoms = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::ChapterAtom => atoms.push(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(EditionEntryElement { atoms })
    }
}

struct ChaptersElement(Vec<EditionEntryElement>);

impl Element for ChaptersElement {
    const ID: ElementType = ElementType::Chapters;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut editions = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::EditionEntry => editions.push(it.read_element_data()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(ChaptersElement(editions))
    }
}

impl ChaptersElement {
    /// Collapses all editions into a single root group. Matroska supports multiple alternative
    /// editions; since `ChapterGroup` has no notion of "edition", each edition becomes a nested
    /// group under the root when there is more than one.
    fn into_group(self) -> Option<ChapterGroup> {
        if self.0.is_empty() {
            return None;
        }

        if self.0.len() == 1 {
            let edition = self.0.into_iter().next().unwrap();
            return Some(ChapterGroup {
                tags: Vec::new(),
                items: edition.atoms.iter().map(ChapterAtomElement::to_item).collect(),
            });
        }

        let items = self
            .0
            .iter()
            .map(|edition| {
                ChapterGroupItem::Group(ChapterGroup {
                    tags: Vec::new(),
                    items: edition.atoms.iter().map(ChapterAtomElement::to_item).collect(),
                })
            })
            .collect();

        Some(ChapterGroup { tags: Vec::new(), items })
    }
}

struct AttachedFileElement {
    name: String,
    description: Option<String>,
    media_type: Option<String>,
    data: Option<Box<[u8]>>,
}

impl Element for AttachedFileElement {
    const ID: ElementType = ElementType::AttachedFile;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut name = String::new();
        let mut description = None;
        let mut media_type = None;
        let mut data = None;

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::FileName => name = it.read_string()?,
                ElementType::FileDescription => description = Some(it.read_string()?),
                ElementType::FileMediaType => media_type = Some(it.read_string()?),
                ElementType::FileData => data = Some(it.read_boxed_slice()?),
                _ => it.ignore_data()?,
            }
        }

        Ok(AttachedFileElement { name, description, media_type, data })
    }
}

impl AttachedFileElement {
    fn to_attachment(self) -> Attachment {
        Attachment::File(FileAttachment {
            name: self.name,
            description: self.description,
            media_type: self.media_type,
            data: self.data.unwrap_or_default(),
        })
    }
}

struct AttachmentsElement(Vec<Attachment>);

impl Element for AttachmentsElement {
    const ID: ElementType = ElementType::Attachments;

    fn read<B: ReadBytes>(reader: &mut B, header: ElementHeader) -> Result<Self> {
        let mut it = header.children(reader);
        let mut attachments = Vec::new();

        while let Some(child) = it.read_header()? {
            match child.etype {
                ElementType::AttachedFile => {
                    let file: AttachedFileElement = it.read_element_data()?;
                    attachments.push(file.to_attachment());
                }
                _ => it.ignore_data()?,
            }
        }

        Ok(AttachmentsElement(attachments))
    }
}
