// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mediatag_core::errors::{decode_error, Error, Result};
use mediatag_core::io::{BufReader, ReadBytes};
use mediatag_core::meta::{Genre, Position, StandardTagKey, StandardVisualKey, TagField, TagValue, Visual};
use mediatag_core::util::bits;

use crate::atoms::{Atom, AtomHeader, AtomIterator, AtomType};

use log::{debug, warn};

/// Data type enumeration for metadata value atoms as defined in the QuickTime File Format standard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataType {
    Bmp,
    Float32,
    Float64,
    Jpeg,
    /// The data type is implicit to the atom.
    NoType,
    Png,
    SignedInt16,
    SignedInt32,
    SignedInt64,
    SignedInt8,
    SignedIntVariable,
    UnsignedInt16,
    UnsignedInt32,
    UnsignedInt64,
    UnsignedInt8,
    UnsignedIntVariable,
    Utf16,
    Utf16Sort,
    Utf8,
    Utf8Sort,
    #[allow(dead_code)]
    Unknown(u32),
}

impl From<u32> for DataType {
    fn from(value: u32) -> Self {
        match value {
            0 => DataType::NoType,
            1 => DataType::Utf8,
            2 => DataType::Utf16,
            4 => DataType::Utf8Sort,
            5 => DataType::Utf16Sort,
            13 => DataType::Jpeg,
            14 => DataType::Png,
            21 => DataType::SignedIntVariable,
            22 => DataType::UnsignedIntVariable,
            23 => DataType::Float32,
            24 => DataType::Float64,
            27 => DataType::Bmp,
            65 => DataType::SignedInt8,
            66 => DataType::SignedInt16,
            67 => DataType::SignedInt32,
            74 => DataType::SignedInt64,
            75 => DataType::UnsignedInt8,
            76 => DataType::UnsignedInt16,
            77 => DataType::UnsignedInt32,
            78 => DataType::UnsignedInt64,
            _ => DataType::Unknown(value),
        }
    }
}

fn decode_utf16be_lossy(data: &[u8]) -> String {
    let units = data.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
    char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)).collect()
}

fn parse_tag_value(data_type: DataType, data: &[u8]) -> Option<TagValue> {
    match data_type {
        DataType::NoType => Some(TagValue::from(data)),
        DataType::Utf8 | DataType::Utf8Sort => {
            Some(TagValue::from(String::from_utf8_lossy(data).into_owned()))
        }
        DataType::Utf16 | DataType::Utf16Sort => Some(TagValue::from(decode_utf16be_lossy(data))),
        DataType::UnsignedInt8 if data.len() == 1 => Some(TagValue::from(data[0])),
        DataType::UnsignedInt16 if data.len() == 2 => {
            Some(TagValue::from(BufReader::new(data).read_be_u16().ok()?))
        }
        DataType::UnsignedInt32 | DataType::UnsignedIntVariable if data.len() == 4 => {
            Some(TagValue::from(BufReader::new(data).read_be_u32().ok()?))
        }
        DataType::UnsignedInt64 if data.len() == 8 => {
            Some(TagValue::from(BufReader::new(data).read_be_u64().ok()?))
        }
        DataType::UnsignedIntVariable if data.len() == 1 => Some(TagValue::from(data[0])),
        DataType::UnsignedIntVariable if data.len() == 2 => {
            Some(TagValue::from(BufReader::new(data).read_be_u16().ok()?))
        }
        DataType::UnsignedIntVariable if data.len() == 8 => {
            Some(TagValue::from(BufReader::new(data).read_be_u64().ok()?))
        }
        DataType::SignedInt8 | DataType::SignedIntVariable if data.len() == 1 => {
            Some(TagValue::from(bits::sign_extend_leq8_to_i8(data[0], 8)))
        }
        DataType::SignedInt16 | DataType::SignedIntVariable if data.len() == 2 => {
            let u = BufReader::new(data).read_be_u16().ok()?;
            Some(TagValue::from(bits::sign_extend_leq16_to_i16(u, 16)))
        }
        DataType::SignedInt32 | DataType::SignedIntVariable if data.len() == 4 => {
            let u = BufReader::new(data).read_be_u32().ok()?;
            Some(TagValue::from(bits::sign_extend_leq32_to_i32(u, 32)))
        }
        DataType::SignedInt64 | DataType::SignedIntVariable if data.len() == 8 => {
            let u = BufReader::new(data).read_be_u64().ok()?;
            Some(TagValue::from(bits::sign_extend_leq64_to_i64(u, 64)))
        }
        DataType::Float32 if data.len() == 4 => {
            Some(TagValue::Float(f64::from(BufReader::new(data).read_be_f32().ok()?)))
        }
        DataType::Float64 if data.len() == 8 => {
            Some(TagValue::Float(BufReader::new(data).read_be_f64().ok()?))
        }
        _ => None,
    }
}

fn push_generic_tag<B: ReadBytes>(
    iter: &mut AtomIterator<B>,
    fields: &mut Vec<TagField>,
    std_key: Option<StandardTagKey>,
) -> Result<()> {
    let tag = iter.read_atom::<MetaTagAtom>()?;
    let raw_key = get_raw_tag_key(tag.atom_type);

    for value_atom in tag.values.iter() {
        match parse_tag_value(value_atom.data_type, &value_atom.data) {
            Some(value) => fields.push(TagField::new(std_key, raw_key, value)),
            None => warn!("unsupported data type {:?} for {:?} tag", value_atom.data_type, tag.atom_type),
        }
    }

    Ok(())
}

fn push_flag_tag<B: ReadBytes>(
    iter: &mut AtomIterator<B>,
    fields: &mut Vec<TagField>,
    std_key: Option<StandardTagKey>,
) -> Result<()> {
    let tag = iter.read_atom::<MetaTagAtom>()?;

    if let Some(value_atom) = tag.values.first() {
        if let Some(value) = parse_tag_value(value_atom.data_type, &value_atom.data) {
            let raw_key = get_raw_tag_key(tag.atom_type);
            fields.push(TagField::new(std_key, raw_key, value));
        }
    }

    Ok(())
}

fn push_pair_tag<B: ReadBytes>(
    iter: &mut AtomIterator<B>,
    fields: &mut Vec<TagField>,
    std_key: Option<StandardTagKey>,
) -> Result<()> {
    let tag = iter.read_atom::<MetaTagAtom>()?;

    // The "trkn" and "disk" atoms contain an 8-byte value consisting of a 4-tuple of 16-bit
    // big-endian values: reserved, index, total, reserved. The data type is no-type.
    if let Some(value) = tag.values.first() {
        if value.data.len() == 8 {
            let index = u32::from(u16::from_be_bytes(value.data[2..4].try_into().unwrap()));
            let total_raw = u16::from_be_bytes(value.data[4..6].try_into().unwrap());
            let total = (total_raw != 0).then_some(u32::from(total_raw));

            let raw_key = get_raw_tag_key(tag.atom_type);
            fields.push(TagField::new(std_key, raw_key, TagValue::Position(Position { index, total })));
        }
    }

    Ok(())
}

fn push_genre_tag<B: ReadBytes>(iter: &mut AtomIterator<B>, fields: &mut Vec<TagField>) -> Result<()> {
    let tag = iter.read_atom::<MetaTagAtom>()?;

    if let Some(value_atom) = tag.values.first() {
        if value_atom.data.len() == 2 {
            // The stored index uses 1-based indexing into the ID3v1 genre list.
            let index = u16::from_be_bytes(value_atom.data.as_ref().try_into().unwrap());
            let id = (index >= 1 && index <= 256).then_some((index - 1) as u8);

            let raw_key = get_raw_tag_key(tag.atom_type);
            fields.push(TagField::new(
                Some(StandardTagKey::Genre),
                raw_key,
                TagValue::Genre(Genre { id, name: None }),
            ));
        }
    }

    Ok(())
}

fn push_visual_tag<B: ReadBytes>(iter: &mut AtomIterator<B>, fields: &mut Vec<TagField>) -> Result<()> {
    let tag = iter.read_atom::<MetaTagAtom>()?;
    let raw_key = get_raw_tag_key(tag.atom_type);

    for value in tag.values {
        let media_type = match value.data_type {
            DataType::Jpeg => "image/jpeg",
            DataType::Png => "image/png",
            DataType::Bmp => "image/bmp",
            _ => sniff_image_media_type(&value.data).unwrap_or("application/octet-stream"),
        };

        let visual = Visual {
            media_type: media_type.to_string(),
            description: None,
            dimensions: None,
            bits_per_pixel: None,
            color_mode: None,
            usage: Some(StandardVisualKey::FrontCover),
            tags: Vec::new(),
            data: value.data,
        };

        fields.push(TagField::new(None, raw_key, TagValue::Picture(visual)));
    }

    Ok(())
}

fn sniff_image_media_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    }
    else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    }
    else if data.starts_with(b"BM") {
        Some("image/bmp")
    }
    else {
        None
    }
}

/// Metadata tag data atom.
pub struct MetaTagDataAtom {
    /// Tag data.
    pub data: Box<[u8]>,
    /// The data type contained in buf.
    pub data_type: DataType,
}

impl Atom for MetaTagDataAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        // For the MOV container, the bytes normally occupied by the version number and flags are
        // instead an index into a table of well-known data types. The ISO/MP4 BMFF uses the same
        // layout when the version is 0, so the two are compatible here.
        let (version, flags) = header.read_extended_header(reader)?;

        if version != 0 {
            return decode_error("isomp4: invalid data atom version");
        }

        let data_type = DataType::from(flags);

        // Locale indicator: a 2-byte country code and a 2-byte language code. Both are ignored.
        let _country = reader.read_be_u16()?;
        let _language = reader.read_be_u16()?;

        let data = {
            let size = header
                .data_unread_at(reader.pos())
                .ok_or(Error::DecodeError("isomp4 (ilst): expected atom size to be known"))?;

            reader.read_boxed_slice_exact(size as usize)?
        };

        Ok(MetaTagDataAtom { data, data_type })
    }
}

/// Metadata tag name and mean atom.
pub struct MetaTagNamespaceAtom {
    /// For 'mean' atoms, this is the key namespace. For 'name' atoms, this is the key name.
    pub value: String,
}

impl Atom for MetaTagNamespaceAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let size = header
            .data_len()
            .ok_or(Error::DecodeError("isomp4 (ilst): expected atom size to be known"))?;

        let buf = reader.read_boxed_slice_exact(size as usize)?;
        let value = String::from_utf8_lossy(&buf).to_string();

        Ok(MetaTagNamespaceAtom { value })
    }
}

/// A generic metadata tag atom.
pub struct MetaTagAtom {
    /// The atom type for the tag.
    pub atom_type: AtomType,
    /// Tag value(s).
    pub values: Vec<MetaTagDataAtom>,
    /// Optional, tag key namespace.
    pub mean: Option<MetaTagNamespaceAtom>,
    /// Optional, tag key name.
    pub name: Option<MetaTagNamespaceAtom>,
}

impl MetaTagAtom {
    pub fn full_name(&self) -> String {
        let mut full_name = String::new();

        if let Some(mean) = &self.mean {
            full_name.push_str(&mean.value);
        }

        full_name.push(':');

        if let Some(name) = &self.name {
            full_name.push_str(&name.value);
        }

        full_name
    }
}

impl Atom for MetaTagAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let atom_type = header.atom_type();

        let mut iter = AtomIterator::new(reader, header);

        let mut mean = None;
        let mut name = None;
        let mut values = Vec::new();

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::MetaTagData => values.push(iter.read_atom::<MetaTagDataAtom>()?),
                AtomType::MetaTagName => name = Some(iter.read_atom::<MetaTagNamespaceAtom>()?),
                AtomType::MetaTagMeaning => mean = Some(iter.read_atom::<MetaTagNamespaceAtom>()?),
                _ => (),
            }
        }

        Ok(MetaTagAtom { atom_type, values, mean, name })
    }
}

/// Metadata tag list atom (`ilst`).
#[derive(Default)]
pub struct IlstAtom {
    pub fields: Vec<TagField>,
}

impl Atom for IlstAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let mut iter = AtomIterator::new(reader, header);

        let mut ilst = IlstAtom::default();

        while let Some(header) = iter.next()? {
            match header.atom_type() {
                AtomType::AdvisoryTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::AlbumArtistTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::AlbumArtist))?
                }
                AtomType::AlbumTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Album))?
                }
                AtomType::ArrangerTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Arranger))?
                }
                AtomType::ArtistTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Artist))?
                }
                AtomType::AuthorTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::PodcastCategoryTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::PodcastCategory))?
                }
                AtomType::CommentTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Comment))?
                }
                AtomType::CompilationTag => {
                    push_flag_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Compilation))?
                }
                AtomType::ComposerTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Composer))?
                }
                AtomType::ConductorTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Conductor))?
                }
                AtomType::CopyrightTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Copyright))?
                }
                AtomType::CoverTag => push_visual_tag(&mut iter, &mut ilst.fields)?,
                AtomType::CustomGenreTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Genre))?
                }
                AtomType::DateTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Date))?
                }
                AtomType::DescriptionTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Description))?
                }
                AtomType::DiskNumberTag => {
                    push_pair_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::DiscNumber))?
                }
                AtomType::EncodedByTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::EncodedBy))?
                }
                AtomType::EncoderTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Encoder))?
                }
                AtomType::GaplessPlaybackTag => push_flag_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::GenreTag => push_genre_tag(&mut iter, &mut ilst.fields)?,
                AtomType::GroupingTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::ContentGroup))?
                }
                AtomType::HdVideoTag => (),
                AtomType::IdentPodcastTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::IdentPodcast))?
                }
                AtomType::IsrcTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::IdentIsrc))?
                }
                AtomType::LabelTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Label))?
                }
                AtomType::LabelUrlTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::UrlLabel))?
                }
                AtomType::PodcastKeywordsTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::PodcastKeywords))?
                }
                AtomType::LongDescriptionTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Description))?
                }
                AtomType::LyricsTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Lyrics))?
                }
                AtomType::MediaTypeTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::MovementCountTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::MovementIndexTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::MovementNumber))?
                }
                AtomType::MovementTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::MovementName))?
                }
                AtomType::OriginalArtistTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::OriginalArtist))?
                }
                AtomType::OwnerTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Owner))?
                }
                AtomType::PodcastTag => {
                    push_flag_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Podcast))?
                }
                AtomType::PurchaseDateTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::PurchaseDate))?
                }
                AtomType::ProducerTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Producer))?
                }
                AtomType::PublisherTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Label))?
                }
                AtomType::RatingTag => push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Rating))?,
                AtomType::RecordingCopyrightTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::SortAlbumArtistTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::SortAlbumArtist))?
                }
                AtomType::SortAlbumTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::SortAlbum))?
                }
                AtomType::SortArtistTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::SortArtist))?
                }
                AtomType::SortComposerTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::SortComposer))?
                }
                AtomType::SortNameTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::SortTrackTitle))?
                }
                AtomType::SortShowNameTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::TempoTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Bpm))?
                }
                AtomType::TrackNumberTag => {
                    push_pair_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TrackNumber))?
                }
                AtomType::TrackTitleTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TrackTitle))?
                }
                AtomType::TvEpisodeNameTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TvEpisodeTitle))?
                }
                AtomType::TvEpisodeNumberTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TvEpisode))?
                }
                AtomType::TvNetworkNameTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TvNetwork))?
                }
                AtomType::TvSeasonNumberTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TvSeason))?
                }
                AtomType::TvShowNameTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::TvShowTitle))?
                }
                AtomType::UrlPodcastTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::UrlPodcast))?
                }
                AtomType::ShowMovementTag => push_flag_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::SoloistTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::TrackArtistUrl => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::UrlArtist))?
                }
                AtomType::WorkTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::WriterTag => {
                    push_generic_tag(&mut iter, &mut ilst.fields, Some(StandardTagKey::Writer))?
                }
                AtomType::FreeFormTag => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
                AtomType::Other(atom_type) => {
                    debug!("unknown metadata sub-atom {:x?}", atom_type);
                }
                _ => push_generic_tag(&mut iter, &mut ilst.fields, None)?,
            }
        }

        Ok(ilst)
    }
}

/// Get a raw tag key for a given metadata atom type.
fn get_raw_tag_key(atom_type: AtomType) -> &'static str {
    match atom_type {
        AtomType::FreeFormTag => "----",
        AtomType::AdvisoryTag => "rtng",
        AtomType::AlbumArtistTag => "aART",
        AtomType::AlbumTag => "\u{a9}alb",
        AtomType::ArrangerTag => "\u{a9}arg",
        AtomType::ArtistTag => "\u{a9}ART",
        AtomType::AuthorTag => "\u{a9}aut",
        AtomType::CommentTag => "\u{a9}cmt",
        AtomType::CompilationTag => "cpil",
        AtomType::ComposerTag => "\u{a9}wrt",
        AtomType::ConductorTag => "\u{a9}con",
        AtomType::CopyrightTag => "cprt",
        AtomType::CoverTag => "covr",
        AtomType::CustomGenreTag => "\u{a9}gen",
        AtomType::DateTag => "\u{a9}day",
        AtomType::DescriptionTag => "desc",
        AtomType::DiskNumberTag => "disk",
        AtomType::EncodedByTag => "\u{a9}enc",
        AtomType::EncoderTag => "\u{a9}too",
        AtomType::FileCreatorUrlTag => "\u{a9}mal",
        AtomType::GaplessPlaybackTag => "pgap",
        AtomType::GenreTag => "gnre",
        AtomType::GroupingTag => "\u{a9}grp",
        AtomType::HdVideoTag => "hdvd",
        AtomType::IdentPodcastTag => "egid",
        AtomType::IsrcTag => "\u{a9}isr",
        AtomType::ItunesAccountIdTag => "apID",
        AtomType::ItunesAccountTypeIdTag => "akID",
        AtomType::ItunesArtistIdTag => "atID",
        AtomType::ItunesComposerIdTag => "cmID",
        AtomType::ItunesContentIdTag => "cnID",
        AtomType::ItunesCountryIdTag => "sfID",
        AtomType::ItunesGenreIdTag => "geID",
        AtomType::ItunesPlaylistIdTag => "plID",
        AtomType::LabelTag => "\u{a9}lab",
        AtomType::LabelUrlTag => "\u{a9}lal",
        AtomType::LongDescriptionTag => "ldes",
        AtomType::LyricsTag => "\u{a9}lyr",
        AtomType::MediaTypeTag => "stik",
        AtomType::MovementCountTag => "\u{a9}mvc",
        AtomType::MovementIndexTag => "\u{a9}mvi",
        AtomType::MovementTag => "\u{a9}mvn",
        AtomType::OriginalArtistTag => "\u{a9}ope",
        AtomType::OwnerTag => "ownr",
        AtomType::PodcastCategoryTag => "catg",
        AtomType::PodcastKeywordsTag => "keyw",
        AtomType::PodcastTag => "pcst",
        AtomType::ProducerTag => "\u{a9}prd",
        AtomType::PublisherTag => "\u{a9}pub",
        AtomType::PurchaseDateTag => "purd",
        AtomType::RatingTag => "rate",
        AtomType::RecordingCopyrightTag => "\u{a9}phg",
        AtomType::SoloistTag => "\u{a9}sol",
        AtomType::SortAlbumArtistTag => "soaa",
        AtomType::SortAlbumTag => "soal",
        AtomType::SortArtistTag => "soar",
        AtomType::SortComposerTag => "soco",
        AtomType::SortNameTag => "sonm",
        AtomType::SortShowNameTag => "sosn",
        AtomType::TempoTag => "tmpo",
        AtomType::TrackArtistUrl => "\u{a9}prl",
        AtomType::TrackNumberTag => "trkn",
        AtomType::TrackTitleTag => "\u{a9}nam",
        AtomType::TvEpisodeNameTag => "tven",
        AtomType::TvEpisodeNumberTag => "tves",
        AtomType::TvNetworkNameTag => "tvnn",
        AtomType::TvSeasonNumberTag => "tvsn",
        AtomType::TvShowNameTag => "tvsh",
        AtomType::UrlPodcastTag => "purl",
        AtomType::WorkTag => "\u{a9}wrk",
        AtomType::WriterTag => "\u{a9}wrt",
        AtomType::XidTag => "xid ",
        _ => "",
    }
}
