/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::bytestream::{ZByteWriterTrait, ZWriter};
use zune_core::log::trace;

use crate::constants::MTX_LEGACY_MAGIC;
use crate::errors::MtxEncodeErrors;
use crate::header::{MtxMetadata, MtxRevision};

/// MTX container encoder
///
/// The encoder writes the header followed by both payloads, the payloads
/// are copied as is.
///
/// Without metadata the basic revision is written, adding metadata
/// via [`set_metadata`](Self::set_metadata) switches to the extended revision.
///
/// # Example
/// - Pack two JPEG streams with their dimensions
///
/// ```
/// use zune_mtx::{MtxEncodeErrors, MtxEncoder, MtxMetadata, PayloadInfo};
///
/// fn main() -> Result<(), MtxEncodeErrors> {
///     let first = [0xFF, 0xD8, 0xFF, 0xD9];
///     let second = [0xFF, 0xD8, 0x00, 0xFF, 0xD9];
///
///     let mut encoder = MtxEncoder::new(&first, &second);
///     encoder.set_metadata(Some(MtxMetadata::new(
///         PayloadInfo::new(16, 16, 3),
///         PayloadInfo::new(8, 8, 1)
///     )));
///     let mut sink = vec![];
///     let written = encoder.encode(&mut sink)?;
///     assert_eq!(written, 36 + first.len() + second.len());
///     Ok(())
/// }
/// ```
pub struct MtxEncoder<'a> {
    first:    &'a [u8],
    second:   &'a [u8],
    metadata: Option<MtxMetadata>,
    tagged:   bool
}

impl<'a> MtxEncoder<'a> {
    /// Create a new encoder for two payloads
    ///
    /// # Arguments
    /// - first: The first payload, may be empty to indicate an empty slot
    /// - second: The second payload
    pub const fn new(first: &'a [u8], second: &'a [u8]) -> MtxEncoder<'a> {
        MtxEncoder {
            first,
            second,
            metadata: None,
            tagged: false
        }
    }

    /// Set or clear the per payload metadata
    pub fn set_metadata(&mut self, metadata: Option<MtxMetadata>) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Write a magic announcing the revision instead of the legacy `0`
    ///
    /// Tagged files can be read without knowing their revision in advance
    /// but older readers of the format will not understand the tag.
    pub fn set_tagged(&mut self, tagged: bool) -> &mut Self {
        self.tagged = tagged;
        self
    }

    /// The revision this encoder will write
    pub const fn revision(&self) -> MtxRevision {
        if self.metadata.is_some() {
            MtxRevision::Extended
        } else {
            MtxRevision::Basic
        }
    }

    /// Exact number of bytes [`encode`](Self::encode) will write
    pub const fn encoded_size(&self) -> usize {
        self.revision().header_size() + self.first.len() + self.second.len()
    }

    fn encode_headers<T: ZByteWriterTrait>(
        &self, writer: &mut ZWriter<T>
    ) -> Result<(), MtxEncodeErrors> {
        let length_first = u32::try_from(self.first.len())
            .map_err(|_| MtxEncodeErrors::TooLargePayload(self.first.len()))?;
        let length_second = u32::try_from(self.second.len())
            .map_err(|_| MtxEncodeErrors::TooLargePayload(self.second.len()))?;

        let magic = if self.tagged {
            self.revision().tag()
        } else {
            MTX_LEGACY_MAGIC
        };

        writer.write_u32_le_err(magic)?;
        writer.write_u32_le_err(length_first)?;
        writer.write_u32_le_err(length_second)?;

        if let Some(metadata) = self.metadata {
            for field in metadata.to_fields() {
                writer.write_const_bytes(&field.to_le_bytes())?;
            }
        }
        trace!("Revision: {:?}", self.revision());
        trace!("First payload length: {}", length_first);
        trace!("Second payload length: {}", length_second);

        Ok(())
    }

    /// Encode the container into a sink
    ///
    /// # Returns
    /// - Ok(size): Actual bytes written, always equal to [`encoded_size`](Self::encoded_size)
    /// - Err: The error encountered during encoding
    pub fn encode<T: ZByteWriterTrait>(&self, sink: T) -> Result<usize, MtxEncodeErrors> {
        let mut stream = ZWriter::new(sink);

        stream.reserve(self.encoded_size())?;

        self.encode_headers(&mut stream)?;

        if !self.first.is_empty() {
            stream.write_all(self.first)?;
        }
        stream.write_all(self.second)?;

        Ok(stream.bytes_written())
    }

    /// Encode the container into a newly allocated vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MtxEncodeErrors> {
        let mut output = Vec::with_capacity(self.encoded_size());
        self.encode(&mut output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{MtxEncoder, MtxMetadata, MtxRevision, PayloadInfo};

    #[test]
    fn basic_layout() {
        let encoded = MtxEncoder::new(&[0xAA], &[0xBB, 0xCC])
            .encode_to_vec()
            .unwrap();

        assert_eq!(
            encoded,
            vec![0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0xAA, 0xBB, 0xCC]
        );
    }

    #[test]
    fn extended_layout() {
        let mut encoder = MtxEncoder::new(&[], &[0x01]);
        encoder.set_metadata(Some(MtxMetadata::new(
            PayloadInfo::new(640, 480, 3),
            PayloadInfo::new(-1, 2, 1)
        )));
        assert_eq!(encoder.revision(), MtxRevision::Extended);

        let encoded = encoder.encode_to_vec().unwrap();

        assert_eq!(encoded.len(), 37);
        assert_eq!(&encoded[4..12], &[0, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(&encoded[12..16], &640_i32.to_le_bytes());
        assert_eq!(&encoded[16..20], &480_i32.to_le_bytes());
        assert_eq!(&encoded[24..28], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(encoded[36], 0x01);
    }

    #[test]
    fn tagged_magic() {
        let mut encoder = MtxEncoder::new(&[1], &[2]);
        encoder.set_tagged(true);

        let encoded = encoder.encode_to_vec().unwrap();
        assert_eq!(&encoded[..4], b"MTXb");
    }

    #[test]
    fn encoded_size_matches_output() {
        let first = [7_u8; 100];
        let second = [9_u8; 33];
        let mut encoder = MtxEncoder::new(&first, &second);

        let mut sink = vec![];
        let written = encoder.encode(&mut sink).unwrap();
        assert_eq!(written, encoder.encoded_size());
        assert_eq!(sink.len(), 12 + 133);

        encoder.set_metadata(Some(MtxMetadata::default()));
        assert_eq!(encoder.encode_to_vec().unwrap().len(), 36 + 133);
    }
}
