/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use zune_mtx::{MtxHeader, PayloadInfo};

/// Header of one probed file, serialized as JSON by `probe`
pub struct Metadata<'a> {
    file:   OsString,
    size:   u64,
    header: &'a MtxHeader
}

impl<'a> Metadata<'a> {
    pub fn new(file: OsString, size: u64, header: &'a MtxHeader) -> Metadata<'a> {
        Metadata { file, size, header }
    }
}

struct Payload<'a> {
    length: u32,
    info:   Option<&'a PayloadInfo>
}

impl Serialize for Payload<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Payload", 4)?;

        state.serialize_field("length", &self.length)?;
        state.serialize_field("width", &self.info.map(|x| x.width))?;
        state.serialize_field("height", &self.info.map(|x| x.height))?;
        state.serialize_field("channels", &self.info.map(|x| x.channels))?;

        state.end()
    }
}

impl Serialize for Metadata<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let metadata = self.header.metadata();

        let first = Payload {
            length: self.header.length_first(),
            info:   metadata.as_ref().map(|m| &m.first)
        };
        let second = Payload {
            length: self.header.length_second(),
            info:   metadata.as_ref().map(|m| &m.second)
        };

        let mut state = serializer.serialize_struct("MtxMetadata", 7)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("magic", &self.header.magic())?;
        state.serialize_field("tagged", &self.header.is_tagged())?;
        state.serialize_field("revision", &format!("{:?}", self.header.revision()))?;
        state.serialize_field("first", &first)?;
        state.serialize_field("second", &second)?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use zune_mtx::zune_core::bytestream::ZCursor;
    use zune_mtx::{MtxDecoder, MtxEncoder, MtxMetadata, MtxRevision, PayloadInfo};

    use crate::serde::Metadata;

    #[test]
    fn probe_json_shape() {
        let mut encoder = MtxEncoder::new(&[], &[1, 2, 3]);
        encoder.set_metadata(Some(MtxMetadata::new(
            PayloadInfo::default(),
            PayloadInfo::new(4, 2, 3)
        )));
        let encoded = encoder.encode_to_vec().unwrap();

        let mut decoder = MtxDecoder::new(ZCursor::new(&encoded));
        decoder.set_revision(MtxRevision::Extended);
        decoder.decode_headers().unwrap();

        let report = Metadata::new("a.mtx".into(), encoded.len() as u64, decoder.header().unwrap());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["file"], "a.mtx");
        assert_eq!(value["size"], 39);
        assert_eq!(value["revision"], "Extended");
        assert_eq!(value["first"]["length"], 0);
        assert_eq!(value["second"]["width"], 4);
        assert_eq!(value["second"]["channels"], 3);
    }
}
