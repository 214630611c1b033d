/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Magic written by legacy producers, the revision must be supplied by the reader
pub const MTX_LEGACY_MAGIC: u32 = 0;
/// Self describing basic stream, `MTXb` on disk
pub const MTX_TAG_BASIC: u32 = u32::from_le_bytes(*b"MTXb");
/// Self describing extended stream, `MTXx` on disk
pub const MTX_TAG_EXTENDED: u32 = u32::from_le_bytes(*b"MTXx");

/// magic + length_first + length_second
pub const MTX_BASIC_HEADER_SIZE: usize = 3 * 4;
/// width, height and channels for both payloads
pub const MTX_METADATA_SIZE: usize = 6 * 4;
pub const MTX_EXTENDED_HEADER_SIZE: usize = MTX_BASIC_HEADER_SIZE + MTX_METADATA_SIZE;
