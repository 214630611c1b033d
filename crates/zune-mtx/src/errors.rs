/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding MTX containers
use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

use crate::header::MtxRevision;

/// Possible Errors that may occur during decoding
pub enum MtxErrors {
    /// The stream is too short to hold the fixed header
    ///
    /// # Arguments
    /// - 1st argument is the header size we expected
    /// - 2nd argument is the number of bytes available
    TruncatedHeader(usize, usize),
    /// The lengths declared in the header exceed the bytes
    /// present in the stream
    ///
    /// # Arguments
    /// - 1st argument is the total size the header declares
    /// - 2nd argument is the number of bytes available
    TruncatedInput(u64, u64),
    /// A tagged stream announces a different revision from
    /// the one the caller asked for, only reported in strict mode
    FormatMismatch {
        requested: MtxRevision,
        detected:  MtxRevision
    },
    /// Extra bytes after the second payload, only reported in strict mode
    TrailingBytes(u64),
    /// Generic message does not need heap allocation
    Generic(&'static str),
    IoErrors(ZByteIoError)
}

impl Debug for MtxErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            MtxErrors::TruncatedHeader(expected, found) => {
                writeln!(
                    f,
                    "Truncated header, expected at least {expected} bytes but stream has {found}"
                )
            }
            MtxErrors::TruncatedInput(expected, found) => {
                writeln!(
                    f,
                    "Truncated input, header declares {expected} bytes but stream has {found}"
                )
            }
            MtxErrors::FormatMismatch {
                requested,
                detected
            } => {
                writeln!(
                    f,
                    "Format mismatch, asked to parse a {requested:?} container but stream looks like {detected:?}"
                )
            }
            MtxErrors::TrailingBytes(count) => {
                writeln!(f, "{count} unexpected bytes after the second payload")
            }
            MtxErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            MtxErrors::IoErrors(value) => {
                writeln!(f, "I/O error {:?}", value)
            }
        }
    }
}

impl Display for MtxErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MtxErrors {}

impl From<&'static str> for MtxErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<ZByteIoError> for MtxErrors {
    fn from(value: ZByteIoError) -> Self {
        MtxErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum MtxEncodeErrors {
    /// A payload is longer than a `u32` length field can describe
    TooLargePayload(usize),
    IoError(ZByteIoError)
}

impl Debug for MtxEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            MtxEncodeErrors::TooLargePayload(found) => {
                writeln!(
                    f,
                    "Too large payload of {found} bytes, MTX can only store payloads up to {} bytes",
                    u32::MAX
                )
            }
            MtxEncodeErrors::IoError(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for MtxEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MtxEncodeErrors {}

impl From<ZByteIoError> for MtxEncodeErrors {
    fn from(value: ZByteIoError) -> Self {
        Self::IoError(value)
    }
}
