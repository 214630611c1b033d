/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info, warn};
use zune_mtx::jpeg::{decode_jpeg, recompress_jpeg, DEFAULT_QUALITY};
use zune_mtx::{MtxContainer, MtxEncoder, MtxMetadata, PayloadInfo};

use crate::cmd_parsers::global_options::parse_revision;
use crate::errors::MtxCliErrors;
use crate::file_io::{read_file, write_atomic};
use crate::probe_files::probe_input_files;

pub(crate) fn run_subcommand(args: &ArgMatches) -> Result<(), MtxCliErrors> {
    match args.subcommand() {
        Some(("pack", sub_args)) => pack(sub_args),
        Some(("unpack", sub_args)) => unpack(sub_args),
        Some(("probe", sub_args)) => probe_input_files(sub_args),
        Some((name, _)) => Err(MtxCliErrors::Generic(format!("Unknown command {name}"))),
        None => Err(MtxCliErrors::Generic("No command given".to_string()))
    }
}

fn path_arg(args: &ArgMatches, name: &str) -> Result<PathBuf, MtxCliErrors> {
    args.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| MtxCliErrors::Generic(format!("Missing argument --{name}")))
}

/// Settings shared by both payloads of a `pack` run
struct PackOptions {
    recompress: bool,
    quality:    u8,
    need_info:  bool
}

/// Read a JPEG file and work out what goes into its slot
fn load_payload(path: &Path, options: &PackOptions) -> Result<(Vec<u8>, PayloadInfo), MtxCliErrors> {
    let data = read_file(path)?;
    let jpeg_err = |e| MtxCliErrors::Jpeg(path.to_path_buf(), e);

    if options.recompress {
        let (compressed, payload_info) = recompress_jpeg(&data, options.quality).map_err(jpeg_err)?;
        info!(
            "Recompressed {:?} from {} to {} bytes",
            path,
            data.len(),
            compressed.len()
        );
        return Ok((compressed, payload_info));
    }
    if options.need_info {
        let decoded = decode_jpeg(&data).map_err(jpeg_err)?;
        return Ok((data, decoded.info));
    }
    Ok((data, PayloadInfo::default()))
}

fn pack(args: &ArgMatches) -> Result<(), MtxCliErrors> {
    let revision = parse_revision(args);
    let out_file = path_arg(args, "out")?;

    let options = PackOptions {
        recompress: args.get_flag("recompress"),
        quality:    args.get_one::<u8>("quality").copied().unwrap_or(DEFAULT_QUALITY),
        need_info:  revision.has_metadata()
    };
    if !options.recompress && args.get_one::<u8>("quality").is_some() {
        warn!("--quality has no effect without --recompress");
    }

    let (first, first_info) = if args.get_flag("no-first") {
        info!("Leaving the first slot empty");
        (Vec::new(), PayloadInfo::default())
    } else {
        load_payload(&path_arg(args, "first")?, &options)?
    };
    let (second, second_info) = load_payload(&path_arg(args, "second")?, &options)?;

    if second.is_empty() {
        warn!("Second payload is empty, the container will hold no image in that slot");
    }

    let metadata = revision
        .has_metadata()
        .then(|| MtxMetadata::new(first_info, second_info));

    let mut encoder = MtxEncoder::new(&first, &second);
    encoder
        .set_metadata(metadata)
        .set_tagged(args.get_flag("tagged"));

    debug!("Packing with revision {:?}", encoder.revision());

    let encoded = encoder.encode_to_vec()?;
    write_atomic(&out_file, &encoded)?;

    info!("Created {:?} ({} bytes)", out_file, encoded.len());
    Ok(())
}

/// Check that payloads decode and match the dimensions stored with them
fn verify_payloads(input: &Path, container: &MtxContainer) -> Result<(), MtxCliErrors> {
    let metadata = container.metadata();

    let slots = [
        ("first", container.first(), metadata.map(|m| m.first)),
        ("second", container.second(), metadata.map(|m| m.second))
    ];

    for (name, payload, expected) in slots {
        if payload.is_empty() {
            debug!("Skipping verification of empty {} payload", name);
            continue;
        }
        let decoded =
            decode_jpeg(payload).map_err(|e| MtxCliErrors::Jpeg(input.to_path_buf(), e))?;

        match expected {
            Some(expected) if expected != decoded.info => {
                warn!(
                    "The {} payload decodes to {:?} but the header stores {:?}",
                    name, decoded.info, expected
                );
            }
            _ => info!("The {} payload decodes to {:?}", name, decoded.info)
        }
    }
    Ok(())
}

fn unpack(args: &ArgMatches) -> Result<(), MtxCliErrors> {
    let revision = parse_revision(args);
    let input = path_arg(args, "in")?;
    let first_out = path_arg(args, "first")?;
    let second_out = path_arg(args, "second")?;

    let data = read_file(&input)?;
    let container = MtxContainer::from_bytes(&data, revision)
        .map_err(|e| MtxCliErrors::Decode(input.clone(), e))?;

    if args.get_flag("verify") {
        verify_payloads(&input, &container)?;
    }

    if container.has_first() {
        write_atomic(&first_out, container.first())?;
        info!("Extracted first payload to {:?}", first_out);
    } else {
        info!("First slot is empty, not writing {:?}", first_out);
    }
    write_atomic(&second_out, container.second())?;
    info!("Extracted second payload to {:?}", second_out);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use zune_mtx::jpeg::{decode_jpeg, encode_jpeg};
    use zune_mtx::{MtxContainer, MtxRevision, PayloadInfo};

    use crate::cmd_args::create_cmd_args;
    use crate::file_io::{read_file, write_atomic};
    use crate::workflow::run_subcommand;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zune-mtx-wf-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn run(args: &[&str]) -> Result<(), crate::MtxCliErrors> {
        let matches = create_cmd_args().try_get_matches_from(args).unwrap();
        run_subcommand(&matches)
    }

    fn write_jpeg(path: &PathBuf, info: PayloadInfo) {
        let len = (info.width * info.height * info.channels) as usize;
        let pixels: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
        write_atomic(path, &encode_jpeg(&pixels, info, 90).unwrap()).unwrap();
    }

    #[test]
    fn pack_then_unpack() {
        let dir = scratch_dir("pack-unpack");
        let (a, b) = (dir.join("1.jpg"), dir.join("2.jpg"));
        let mtx = dir.join("out.mtx");
        let (a_out, b_out) = (dir.join("o1.jpg"), dir.join("o2.jpg"));

        write_jpeg(&a, PayloadInfo::new(16, 8, 3));
        write_jpeg(&b, PayloadInfo::new(8, 8, 1));

        let s = |p: &PathBuf| p.to_str().unwrap().to_string();

        run(&["zune-mtx", "pack", "-a", &s(&a), "-b", &s(&b), "-o", &s(&mtx)]).unwrap();

        let container =
            MtxContainer::from_bytes(&read_file(&mtx).unwrap(), MtxRevision::Extended).unwrap();
        let metadata = container.metadata().unwrap();
        assert_eq!(metadata.first, PayloadInfo::new(16, 8, 3));
        assert_eq!(metadata.second, PayloadInfo::new(8, 8, 1));

        run(&[
            "zune-mtx", "unpack", "-i", &s(&mtx), "-a", &s(&a_out), "-b", &s(&b_out), "--verify"
        ])
        .unwrap();

        assert_eq!(read_file(&a_out).unwrap(), read_file(&a).unwrap());
        assert_eq!(read_file(&b_out).unwrap(), read_file(&b).unwrap());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn pack_basic_recompressed_without_first() {
        let dir = scratch_dir("basic-recompress");
        let b = dir.join("2.jpg");
        let mtx = dir.join("out.mtx");
        let (a_out, b_out) = (dir.join("o1.jpg"), dir.join("o2.jpg"));

        write_jpeg(&b, PayloadInfo::new(12, 4, 3));

        let s = |p: &PathBuf| p.to_str().unwrap().to_string();

        run(&[
            "zune-mtx", "pack", "--no-first", "-b", &s(&b), "-o", &s(&mtx), "--basic",
            "--recompress", "-q", "50"
        ])
        .unwrap();

        let bytes = read_file(&mtx).unwrap();
        assert_eq!(&bytes[..8], &[0; 8]);

        run(&["zune-mtx", "unpack", "-i", &s(&mtx), "-a", &s(&a_out), "-b", &s(&b_out), "--basic"])
            .unwrap();

        assert!(!a_out.exists());
        assert_eq!(decode_jpeg(&read_file(&b_out).unwrap()).unwrap().info, PayloadInfo::new(12, 4, 3));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn truncated_container_writes_nothing() {
        let dir = scratch_dir("truncated");
        let mtx = dir.join("broken.mtx");
        let (a_out, b_out) = (dir.join("o1.jpg"), dir.join("o2.jpg"));

        // declares 4 + 5 payload bytes but carries one
        write_atomic(&mtx, &[0, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 0xFF]).unwrap();

        let s = |p: &PathBuf| p.to_str().unwrap().to_string();
        let result = run(&[
            "zune-mtx", "unpack", "-i", &s(&mtx), "-a", &s(&a_out), "-b", &s(&b_out), "--basic"
        ]);

        assert!(matches!(result, Err(crate::MtxCliErrors::Decode(_, _))));
        assert!(!a_out.exists());
        assert!(!b_out.exists());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
