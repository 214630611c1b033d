/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding of MTX containers
//!
//! An MTX file bundles one or two JPEG payloads behind a small fixed
//! header that stores each payload's length and, in the extended
//! revision, the pixel dimensions and channel count of both payloads.
//!
//! ```text
//! basic    | magic u32 | len_first u32 | len_second u32 | first | second |
//! extended | magic u32 | len_first u32 | len_second u32 |
//!          | w1 h1 c1 w2 h2 c2 (i32 each) | first | second |
//! ```
//! All integers are little endian.
//!
//! The container does not look inside its payloads, decoding and
//! encoding the JPEG pixels is provided by the [`jpeg`] module when the
//! `jpeg` feature is enabled.
//!
//! # Features
//! - `std`: Implements `std::error::Error` for the error types, without it the
//!    crate is `no_std` with `alloc`
//! - `log`: Forward trace and warning messages to the `log` crate
//! - `jpeg`: Decode and encode payload pixels via `zune-jpeg` and `jpeg-encoder`
//!
//! # Example
//! ```
//! use zune_core::bytestream::ZCursor;
//! use zune_mtx::{MtxDecoder, MtxEncoder, MtxRevision};
//!
//! let encoded = MtxEncoder::new(&[0xFF, 0xD8], &[0xFF, 0xD8, 0x01])
//!     .encode_to_vec()
//!     .unwrap();
//!
//! let mut decoder = MtxDecoder::new(ZCursor::new(&encoded));
//! decoder.set_revision(MtxRevision::Basic);
//! let container = decoder.decode().unwrap();
//!
//! assert_eq!(container.first(), &[0xFF, 0xD8]);
//! assert_eq!(container.second(), &[0xFF, 0xD8, 0x01]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use container::MtxContainer;
pub use decoder::MtxDecoder;
pub use encoder::MtxEncoder;
pub use errors::{MtxEncodeErrors, MtxErrors};
pub use header::{MtxHeader, MtxMetadata, MtxRevision, PayloadInfo};
pub use zune_core;

mod constants;
mod container;
mod decoder;
mod encoder;
mod errors;
mod header;
#[cfg(feature = "jpeg")]
pub mod jpeg;
