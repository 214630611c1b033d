/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use zune_mtx::jpeg::JpegErrors;
use zune_mtx::{MtxEncodeErrors, MtxErrors};

/// Everything that can stop a command line workflow
pub enum MtxCliErrors {
    /// A file could not be opened, read, written or renamed
    Io(PathBuf, std::io::Error),
    Decode(PathBuf, MtxErrors),
    Encode(MtxEncodeErrors),
    Jpeg(PathBuf, JpegErrors),
    Json(serde_json::Error),
    Generic(String)
}

impl Debug for MtxCliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MtxCliErrors::Io(path, err) => {
                write!(f, "{}: {}", path.display(), err)
            }
            MtxCliErrors::Decode(path, err) => {
                write!(f, "{}: {}", path.display(), format!("{err:?}").trim_end())
            }
            MtxCliErrors::Encode(err) => {
                write!(f, "{}", format!("{err:?}").trim_end())
            }
            MtxCliErrors::Jpeg(path, err) => {
                write!(f, "{}: {}", path.display(), format!("{err:?}").trim_end())
            }
            MtxCliErrors::Json(err) => {
                write!(f, "Could not serialize probe output: {err}")
            }
            MtxCliErrors::Generic(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl Display for MtxCliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for MtxCliErrors {}

impl From<MtxEncodeErrors> for MtxCliErrors {
    fn from(value: MtxEncodeErrors) -> Self {
        MtxCliErrors::Encode(value)
    }
}

impl From<serde_json::Error> for MtxCliErrors {
    fn from(value: serde_json::Error) -> Self {
        MtxCliErrors::Json(value)
    }
}
