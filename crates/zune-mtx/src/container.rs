/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bytestream::ZCursor;

use crate::decoder::MtxDecoder;
use crate::encoder::MtxEncoder;
use crate::errors::{MtxEncodeErrors, MtxErrors};
use crate::header::{MtxMetadata, MtxRevision};

/// An owned MTX container
///
/// Holds both payloads and, for the extended revision, their metadata.
/// An empty first payload means the first slot is unused.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MtxContainer {
    metadata: Option<MtxMetadata>,
    first:    Vec<u8>,
    second:   Vec<u8>
}

impl MtxContainer {
    /// Create a basic revision container
    pub fn new(first: Vec<u8>, second: Vec<u8>) -> MtxContainer {
        MtxContainer::from_parts(None, first, second)
    }

    /// Create a container, it is an extended one when `metadata` is present
    pub fn from_parts(
        metadata: Option<MtxMetadata>, first: Vec<u8>, second: Vec<u8>
    ) -> MtxContainer {
        MtxContainer {
            metadata,
            first,
            second
        }
    }

    pub fn with_metadata(mut self, metadata: MtxMetadata) -> MtxContainer {
        self.metadata = Some(metadata);
        self
    }

    pub const fn metadata(&self) -> Option<MtxMetadata> {
        self.metadata
    }

    pub fn first(&self) -> &[u8] {
        &self.first
    }

    pub fn second(&self) -> &[u8] {
        &self.second
    }

    /// Whether the first slot carries a payload
    pub fn has_first(&self) -> bool {
        !self.first.is_empty()
    }

    pub const fn revision(&self) -> MtxRevision {
        if self.metadata.is_some() {
            MtxRevision::Extended
        } else {
            MtxRevision::Basic
        }
    }

    /// Split the container into metadata, first and second payloads
    pub fn into_parts(self) -> (Option<MtxMetadata>, Vec<u8>, Vec<u8>) {
        (self.metadata, self.first, self.second)
    }

    /// Serialize into a legacy (untagged) byte stream
    pub fn to_bytes(&self) -> Result<Vec<u8>, MtxEncodeErrors> {
        let mut encoder = MtxEncoder::new(&self.first, &self.second);
        encoder.set_metadata(self.metadata);
        encoder.encode_to_vec()
    }

    /// Parse a byte stream produced with the given revision
    ///
    /// Tagged streams are parsed with the revision they announce.
    pub fn from_bytes(data: &[u8], revision: MtxRevision) -> Result<MtxContainer, MtxErrors> {
        let mut decoder = MtxDecoder::new(ZCursor::new(data));
        decoder.set_revision(revision);
        decoder.decode()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{MtxContainer, MtxMetadata, MtxRevision, PayloadInfo};

    #[test]
    fn container_round_trip() {
        let meta = MtxMetadata::new(PayloadInfo::new(2, 2, 1), PayloadInfo::new(1, 1, 3));
        let container = MtxContainer::new(vec![1, 2, 3], vec![4]).with_metadata(meta);

        let bytes = container.to_bytes().unwrap();
        let parsed = MtxContainer::from_bytes(&bytes, container.revision()).unwrap();

        assert_eq!(parsed, container);
    }

    #[test]
    fn empty_first_slot() {
        let container = MtxContainer::new(vec![], vec![5, 6]);
        assert!(!container.has_first());

        let bytes = container.to_bytes().unwrap();
        assert_eq!(bytes.len(), 14);

        let (metadata, first, second) = MtxContainer::from_bytes(&bytes, MtxRevision::Basic)
            .unwrap()
            .into_parts();
        assert!(metadata.is_none());
        assert!(first.is_empty());
        assert_eq!(second, vec![5, 6]);
    }
}
