/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader, ZSeekFrom};
use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::constants::{MTX_BASIC_HEADER_SIZE, MTX_METADATA_SIZE};
use crate::container::MtxContainer;
use crate::errors::MtxErrors;
use crate::header::{MtxHeader, MtxMetadata, MtxRevision};

/// An MTX container decoder
///
/// The decoder is initialized by calling `new`, told which revision
/// to expect via [`set_revision`] and then either [`decode_headers`]
/// to inspect the header or [`decode`] to extract both payloads.
///
/// Legacy files do not record their revision, so the decoder parses
/// them with whatever revision it was given, a wrong guess shows up as
/// [`TruncatedInput`] or trailing bytes. Files written with a tagged
/// magic override that choice.
///
/// [`set_revision`]:MtxDecoder::set_revision
/// [`decode_headers`]:MtxDecoder::decode_headers
/// [`decode`]:MtxDecoder::decode
/// [`TruncatedInput`]:MtxErrors::TruncatedInput
pub struct MtxDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:        ZReader<T>,
    options:       DecoderOptions,
    revision:      MtxRevision,
    header:        Option<MtxHeader>,
    // where the first payload starts
    payload_start: u64
}

impl<T> MtxDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new MTX decoder with the default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zune_core::bytestream::ZCursor;
    /// let mut decoder = zune_mtx::MtxDecoder::new(ZCursor::new(&[]));
    /// // additional code
    /// ```
    pub fn new(data: T) -> MtxDecoder<T> {
        MtxDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder that obeys the specified options
    ///
    /// Only strict mode is consulted, in strict mode trailing bytes and
    /// a tagged revision that disagrees with [`set_revision`](Self::set_revision)
    /// are errors instead of warnings.
    pub fn new_with_options(data: T, options: DecoderOptions) -> MtxDecoder<T> {
        MtxDecoder {
            stream: ZReader::new(data),
            options,
            revision: MtxRevision::Basic,
            header: None,
            payload_start: 0
        }
    }

    /// Set the revision legacy streams are parsed with
    ///
    /// Has no effect once headers have been decoded.
    pub fn set_revision(&mut self, revision: MtxRevision) -> &mut Self {
        self.revision = revision;
        self
    }

    /// The header, available after [`decode_headers`](Self::decode_headers)
    pub const fn header(&self) -> Option<&MtxHeader> {
        self.header.as_ref()
    }

    /// Bytes left from the current position to the end of the stream
    fn available_bytes(&mut self) -> Result<u64, MtxErrors> {
        let start = self.stream.position()?;
        let end = self.stream.seek(ZSeekFrom::End(0))?;
        self.stream.seek(ZSeekFrom::Start(start))?;

        Ok(end.saturating_sub(start))
    }

    /// Pick the revision to parse with, tagged streams win over the caller
    fn resolve_revision(&self, magic: u32) -> Result<MtxRevision, MtxErrors> {
        match MtxRevision::from_tag(magic) {
            Some(detected) if detected != self.revision => {
                if self.options.strict_mode() {
                    return Err(MtxErrors::FormatMismatch {
                        requested: self.revision,
                        detected
                    });
                }
                warn!(
                    "Stream is tagged as {:?} but {:?} was requested, using the tag",
                    detected,
                    self.revision
                );
                Ok(detected)
            }
            Some(detected) => Ok(detected),
            None => {
                if magic != 0 {
                    trace!("Ignoring unknown magic value {:#010x}", magic);
                }
                Ok(self.revision)
            }
        }
    }

    /// Decode the MTX header storing needed information into
    /// the decoder instance
    ///
    /// This validates that the stream holds every byte the header
    /// declares, so a successful call guarantees [`decode`](Self::decode)
    /// will not run out of data.
    ///
    /// # Returns
    ///
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), MtxErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let available = self.available_bytes()?;

        if available < MTX_BASIC_HEADER_SIZE as u64 {
            return Err(MtxErrors::TruncatedHeader(
                MTX_BASIC_HEADER_SIZE,
                available as usize
            ));
        }

        let magic = self.stream.get_u32_le_err()?;
        let length_first = self.stream.get_u32_le_err()?;
        let length_second = self.stream.get_u32_le_err()?;

        let revision = self.resolve_revision(magic)?;

        let expected = revision.header_size() as u64
            + u64::from(length_first)
            + u64::from(length_second);

        if expected > available {
            if revision == MtxRevision::Extended
                && expected - available == MTX_METADATA_SIZE as u64
            {
                warn!(
                    "Stream is short by the size of the metadata, \
                     it may have been written without it"
                );
            }
            return Err(MtxErrors::TruncatedInput(expected, available));
        }
        if expected < available {
            let trailing = available - expected;

            if self.options.strict_mode() {
                return Err(MtxErrors::TrailingBytes(trailing));
            }
            if revision == MtxRevision::Basic && trailing == MTX_METADATA_SIZE as u64 {
                warn!(
                    "Trailing bytes match the size of the metadata, \
                     the stream may carry it"
                );
            }
            warn!("{} trailing bytes after the second payload", trailing);
        }

        let metadata = if revision.has_metadata() {
            let mut fields = [0_i32; 6];

            for field in fields.iter_mut() {
                *field = i32::from_le_bytes(self.stream.read_fixed_bytes_or_error::<4>()?);
            }
            Some(MtxMetadata::from_fields(fields))
        } else {
            None
        };

        trace!("Revision: {:?}", revision);
        trace!("First payload length: {}", length_first);
        trace!("Second payload length: {}", length_second);
        trace!("Metadata: {:?}", metadata);

        self.payload_start = self.stream.position()?;

        self.header = Some(MtxHeader {
            magic,
            length_first,
            length_second,
            revision,
            metadata
        });

        Ok(())
    }

    /// Decode the container returning both payloads
    /// and the metadata when the revision carries it
    ///
    /// May be called more than once, payloads are re-read each time.
    ///
    /// # Returns
    /// - On success: The parsed container
    /// - On error: An instance of [MtxErrors] explaining why the
    ///   container could not be decoded
    ///
    /// [MtxErrors]:crate::errors::MtxErrors
    pub fn decode(&mut self) -> Result<MtxContainer, MtxErrors> {
        self.decode_headers()?;

        let header = self.header.ok_or("Headers not decoded")?;

        self.stream.seek(ZSeekFrom::Start(self.payload_start))?;

        let mut first = vec![0; header.length_first as usize];
        let mut second = vec![0; header.length_second as usize];

        if !first.is_empty() {
            self.stream.read_exact_bytes(&mut first)?;
        }
        self.stream.read_exact_bytes(&mut second)?;

        Ok(MtxContainer::from_parts(header.metadata, first, second))
    }
}
