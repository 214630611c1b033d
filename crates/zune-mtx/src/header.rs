/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Header layout of the two MTX revisions

use crate::constants::{
    MTX_BASIC_HEADER_SIZE, MTX_EXTENDED_HEADER_SIZE, MTX_LEGACY_MAGIC, MTX_TAG_BASIC,
    MTX_TAG_EXTENDED
};

/// The layout of an MTX header.
///
/// Legacy files carry no marker for this, so a reader has to
/// be told which revision produced the bytes unless the stream
/// was written with a tagged magic.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MtxRevision {
    /// 12 byte header, payload lengths only
    #[default]
    Basic,
    /// 36 byte header, payload lengths followed by
    /// dimensions and channels of both payloads
    Extended
}

impl MtxRevision {
    /// Size in bytes of the fixed header for this revision
    pub const fn header_size(self) -> usize {
        match self {
            MtxRevision::Basic => MTX_BASIC_HEADER_SIZE,
            MtxRevision::Extended => MTX_EXTENDED_HEADER_SIZE
        }
    }
    /// Whether the header carries the six metadata fields
    pub const fn has_metadata(self) -> bool {
        matches!(self, MtxRevision::Extended)
    }

    /// Magic value a tagged stream of this revision starts with
    pub const fn tag(self) -> u32 {
        match self {
            MtxRevision::Basic => MTX_TAG_BASIC,
            MtxRevision::Extended => MTX_TAG_EXTENDED
        }
    }

    /// Return the revision a magic value announces, or `None`
    /// for legacy and unknown magic values
    pub const fn from_tag(magic: u32) -> Option<MtxRevision> {
        match magic {
            MTX_TAG_BASIC => Some(MtxRevision::Basic),
            MTX_TAG_EXTENDED => Some(MtxRevision::Extended),
            _ => None
        }
    }
}

/// Pixel description of a single payload
///
/// Fields are signed since that is how they are stored on disk,
/// the container does not check them for sanity.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PayloadInfo {
    pub width:    i32,
    pub height:   i32,
    pub channels: i32
}

impl PayloadInfo {
    pub const fn new(width: i32, height: i32, channels: i32) -> PayloadInfo {
        PayloadInfo {
            width,
            height,
            channels
        }
    }
}

/// Metadata stored by the extended revision
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct MtxMetadata {
    pub first:  PayloadInfo,
    pub second: PayloadInfo
}

impl MtxMetadata {
    pub const fn new(first: PayloadInfo, second: PayloadInfo) -> MtxMetadata {
        MtxMetadata { first, second }
    }

    /// Fields in on-disk order,
    /// `width1, height1, channels1, width2, height2, channels2`
    pub const fn to_fields(&self) -> [i32; 6] {
        [
            self.first.width,
            self.first.height,
            self.first.channels,
            self.second.width,
            self.second.height,
            self.second.channels
        ]
    }

    /// Inverse of [`to_fields`](Self::to_fields)
    pub const fn from_fields(fields: [i32; 6]) -> MtxMetadata {
        MtxMetadata {
            first:  PayloadInfo::new(fields[0], fields[1], fields[2]),
            second: PayloadInfo::new(fields[3], fields[4], fields[5])
        }
    }
}

/// A parsed MTX header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MtxHeader {
    pub(crate) magic:         u32,
    pub(crate) length_first:  u32,
    pub(crate) length_second: u32,
    pub(crate) revision:      MtxRevision,
    pub(crate) metadata:      Option<MtxMetadata>
}

impl MtxHeader {
    /// The raw magic value, `0` for legacy files
    pub const fn magic(&self) -> u32 {
        self.magic
    }
    /// Whether the stream announced its own revision
    pub const fn is_tagged(&self) -> bool {
        MtxRevision::from_tag(self.magic).is_some()
    }
    pub const fn is_legacy(&self) -> bool {
        self.magic == MTX_LEGACY_MAGIC
    }
    /// Length of the first payload, zero when the slot is empty
    pub const fn length_first(&self) -> u32 {
        self.length_first
    }
    pub const fn length_second(&self) -> u32 {
        self.length_second
    }
    /// The revision used to parse this header
    pub const fn revision(&self) -> MtxRevision {
        self.revision
    }
    pub const fn metadata(&self) -> Option<MtxMetadata> {
        self.metadata
    }
    /// Header size plus both payloads
    pub const fn total_size(&self) -> u64 {
        self.revision.header_size() as u64 + self.length_first as u64 + self.length_second as u64
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::MTX_LEGACY_MAGIC;
    use crate::{MtxMetadata, MtxRevision, PayloadInfo};

    #[test]
    fn header_sizes() {
        assert_eq!(MtxRevision::Basic.header_size(), 12);
        assert_eq!(MtxRevision::Extended.header_size(), 36);
        assert!(!MtxRevision::Basic.has_metadata());
        assert!(MtxRevision::Extended.has_metadata());
    }

    #[test]
    fn tags_are_distinct_from_legacy() {
        assert_eq!(MtxRevision::from_tag(MTX_LEGACY_MAGIC), None);
        assert_eq!(&MtxRevision::Basic.tag().to_le_bytes(), b"MTXb");

        for revision in [MtxRevision::Basic, MtxRevision::Extended] {
            assert_eq!(MtxRevision::from_tag(revision.tag()), Some(revision));
        }
    }

    #[test]
    fn metadata_field_order() {
        let meta = MtxMetadata::new(PayloadInfo::new(1, 2, 3), PayloadInfo::new(4, 5, 6));

        assert_eq!(meta.to_fields(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(MtxMetadata::from_fields(meta.to_fields()), meta);
    }
}
