/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::ArgMatches;
use zune_mtx::MtxDecoder;

use crate::cmd_parsers::global_options::parse_revision;
use crate::errors::MtxCliErrors;
use crate::serde::Metadata;

/// Probe input files, extract header information, and print to standard output.
///
/// Only headers are read, payloads stay on disk.
pub fn probe_input_files(args: &ArgMatches) -> Result<(), MtxCliErrors> {
    let revision = parse_revision(args);

    for in_file in args.get_many::<String>("in").into_iter().flatten() {
        let path = PathBuf::from(in_file);
        let io_err = |e| MtxCliErrors::Io(path.clone(), e);

        let file = File::open(&path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();

        let mut decoder = MtxDecoder::new(BufReader::new(file));
        decoder.set_revision(revision);
        decoder
            .decode_headers()
            .map_err(|e| MtxCliErrors::Decode(path.clone(), e))?;

        if let Some(header) = decoder.header() {
            let real_metadata = Metadata::new(path.clone().into_os_string(), size, header);

            println!("{}", serde_json::to_string_pretty(&real_metadata)?);
        }
    }
    Ok(())
}
