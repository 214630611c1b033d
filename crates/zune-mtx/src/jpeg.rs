/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG payload support
//!
//! The container stores JPEG streams without looking at them, this module
//! turns those streams into pixels and back so callers can fill in the
//! extended revision metadata.
//!
//! Decoding uses `zune-jpeg`, encoding uses `jpeg-encoder`. Only grayscale
//! (one channel) and RGB (three channels) pixels can be encoded.
use core::fmt::{Debug, Display, Formatter};

use jpeg_encoder::{ColorType, Encoder, EncodingError};
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;
use zune_core::options::DecoderOptions;
use zune_jpeg::errors::DecodeErrors;
use zune_jpeg::JpegDecoder;

use crate::header::PayloadInfo;

/// Quality used when the caller has no preference
pub const DEFAULT_QUALITY: u8 = 75;

/// Errors from decoding or encoding JPEG payloads
pub enum JpegErrors {
    /// The payload is not a decodable JPEG, carries the decoder's error
    Decode(DecodeErrors),
    /// The encoder failed
    Encode(EncodingError),
    /// Only 1 (grayscale) and 3 (RGB) channels can be encoded
    UnsupportedChannels(i32),
    /// Width or height is zero, negative or larger than a JPEG can describe
    TooLargeDimensions(i32, i32),
    /// Pixel buffer length does not match `width * height * channels`
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    BufferMismatch(usize, usize),
    /// Generic message
    GenericStatic(&'static str)
}

impl Debug for JpegErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            JpegErrors::Decode(err) => {
                writeln!(f, "Could not decode JPEG payload: {err:?}")
            }
            JpegErrors::Encode(err) => {
                writeln!(f, "Could not encode JPEG payload: {err:?}")
            }
            JpegErrors::UnsupportedChannels(channels) => {
                writeln!(
                    f,
                    "Unsupported channel count {channels}, expected either 1 or 3"
                )
            }
            JpegErrors::TooLargeDimensions(width, height) => {
                writeln!(
                    f,
                    "Unsupported dimensions {width}x{height}, JPEG needs 1 to {} in each dimension",
                    u16::MAX
                )
            }
            JpegErrors::BufferMismatch(expected, found) => {
                writeln!(
                    f,
                    "Pixel buffer has {found} bytes but dimensions require {expected}"
                )
            }
            JpegErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for JpegErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for JpegErrors {}

impl From<DecodeErrors> for JpegErrors {
    fn from(value: DecodeErrors) -> Self {
        JpegErrors::Decode(value)
    }
}

impl From<EncodingError> for JpegErrors {
    fn from(value: EncodingError) -> Self {
        JpegErrors::Encode(value)
    }
}

/// Raw pixels of a decoded payload
#[derive(Clone, Debug)]
pub struct DecodedJpeg {
    /// Interleaved 8 bit samples, `info.channels` per pixel
    pub pixels: Vec<u8>,
    pub info:   PayloadInfo
}

/// Decode a JPEG stream into pixels
///
/// Grayscale images decode to one channel, everything else to RGB.
pub fn decode_jpeg(data: &[u8]) -> Result<DecodedJpeg, JpegErrors> {
    let mut probe = JpegDecoder::new(ZCursor::new(data));
    probe.decode_headers()?;

    let components = probe.info().map_or(3, |info| info.components);
    let out_colorspace = if components == 1 {
        ColorSpace::Luma
    } else {
        ColorSpace::RGB
    };

    let options = DecoderOptions::default().jpeg_set_out_colorspace(out_colorspace);
    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(data), options);
    let pixels = decoder.decode()?;

    let image_info = decoder
        .info()
        .ok_or(JpegErrors::GenericStatic("Decoder returned no image info"))?;

    let width = i32::try_from(image_info.width)
        .map_err(|_| JpegErrors::GenericStatic("Image width does not fit an i32"))?;
    let height = i32::try_from(image_info.height)
        .map_err(|_| JpegErrors::GenericStatic("Image height does not fit an i32"))?;

    let pixel_count = (width as usize) * (height as usize);

    if pixel_count == 0 || pixels.len() % pixel_count != 0 {
        return Err(JpegErrors::BufferMismatch(pixel_count, pixels.len()));
    }
    let channels = (pixels.len() / pixel_count) as i32;

    trace!("Decoded JPEG payload {}x{} with {} channels", width, height, channels);

    Ok(DecodedJpeg {
        pixels,
        info: PayloadInfo::new(width, height, channels)
    })
}

/// Map a channel count to the colour type the encoder understands
fn color_type(channels: i32) -> Result<ColorType, JpegErrors> {
    match channels {
        1 => Ok(ColorType::Luma),
        3 => Ok(ColorType::Rgb),
        _ => Err(JpegErrors::UnsupportedChannels(channels))
    }
}

/// Encode pixels into a JPEG stream
///
/// # Arguments
/// - pixels: Interleaved 8 bit samples, exactly `width * height * channels` long
/// - info: Dimensions and channel count, channels must be 1 or 3
/// - quality: JPEG quality, clamped to `1..=100`
///
/// Nothing is produced when the arguments are rejected.
pub fn encode_jpeg(pixels: &[u8], info: PayloadInfo, quality: u8) -> Result<Vec<u8>, JpegErrors> {
    let color = color_type(info.channels)?;

    let (width, height) = match (u16::try_from(info.width), u16::try_from(info.height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(JpegErrors::TooLargeDimensions(info.width, info.height))
    };

    let expected = usize::from(width) * usize::from(height) * (info.channels as usize);

    if pixels.len() != expected {
        return Err(JpegErrors::BufferMismatch(expected, pixels.len()));
    }

    let mut output = Vec::new();
    let encoder = Encoder::new(&mut output, quality.clamp(1, 100));
    encoder.encode(pixels, width, height, color)?;

    trace!("Encoded JPEG payload of {} bytes", output.len());

    Ok(output)
}

/// Decode and re-encode a JPEG stream at the given quality
///
/// Returns the new stream and the description of its pixels, ready
/// to be stored in extended revision metadata.
pub fn recompress_jpeg(data: &[u8], quality: u8) -> Result<(Vec<u8>, PayloadInfo), JpegErrors> {
    let decoded = decode_jpeg(data)?;
    let encoded = encode_jpeg(&decoded.pixels, decoded.info, quality)?;

    Ok((encoded, decoded.info))
}
