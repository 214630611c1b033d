/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

pub mod help_strings;

fn basic_arg() -> Arg {
    Arg::new("basic")
        .long("basic")
        .action(ArgAction::SetTrue)
        .help("Use the 12 byte header revision without payload metadata")
        .long_help(help_strings::REVISION_HELP)
}

#[rustfmt::skip]
fn pack_command() -> Command {
    Command::new("pack")
        .about("Pack two JPEG files into an MTX container")
        .arg(Arg::new("first")
            .long("first")
            .short('a')
            .help("JPEG file stored in the first slot")
            .required_unless_present("no-first")
            .conflicts_with("no-first"))
        .arg(Arg::new("second")
            .long("second")
            .short('b')
            .help("JPEG file stored in the second slot")
            .required(true))
        .arg(Arg::new("out")
            .long("output")
            .short('o')
            .help("MTX file to write")
            .required(true))
        .arg(Arg::new("no-first")
            .long("no-first")
            .action(ArgAction::SetTrue)
            .help("Leave the first slot empty"))
        .arg(basic_arg())
        .arg(Arg::new("tagged")
            .long("tagged")
            .action(ArgAction::SetTrue)
            .help("Write a magic that records the header revision")
            .long_help(help_strings::TAGGED_HELP))
        .arg(Arg::new("recompress")
            .long("recompress")
            .action(ArgAction::SetTrue)
            .help("Decode and re-encode both payloads before packing"))
        .arg(Arg::new("quality")
            .long("quality")
            .short('q')
            .help("JPEG quality used by --recompress")
            .long_help(help_strings::QUALITY_HELP)
            .value_parser(value_parser!(u8).range(1..=100)))
}

#[rustfmt::skip]
fn unpack_command() -> Command {
    Command::new("unpack")
        .about("Extract both payloads of an MTX container")
        .arg(Arg::new("in")
            .long("input")
            .short('i')
            .help("MTX file to read")
            .required(true))
        .arg(Arg::new("first")
            .long("first")
            .short('a')
            .help("Where to write the first payload")
            .required(true))
        .arg(Arg::new("second")
            .long("second")
            .short('b')
            .help("Where to write the second payload")
            .required(true))
        .arg(basic_arg())
        .arg(Arg::new("verify")
            .long("verify")
            .action(ArgAction::SetTrue)
            .help("Decode each payload and compare it against the stored metadata"))
}

#[rustfmt::skip]
fn probe_command() -> Command {
    Command::new("probe")
        .about("Print the header of MTX containers as JSON")
        .arg(Arg::new("in")
            .long("input")
            .short('i')
            .help("MTX files to inspect")
            .action(ArgAction::Append)
            .required(true))
        .arg(basic_arg())
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("zune-mtx")
        .about("Pack and unpack MTX two slot JPEG containers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(pack_command())
        .subcommand(unpack_command())
        .subcommand(probe_command())
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display information about the packing options"))
}

#[cfg(test)]
mod tests {
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn command_is_consistent() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn pack_defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["zune-mtx", "pack", "-a", "1.jpg", "-b", "2.jpg", "-o", "x.mtx"])
            .unwrap();
        let (name, pack) = matches.subcommand().unwrap();

        assert_eq!(name, "pack");
        assert_eq!(pack.get_one::<u8>("quality"), None);
        assert!(!pack.get_flag("basic"));
    }

    #[test]
    fn no_first_conflicts_with_first() {
        let result = create_cmd_args().try_get_matches_from([
            "zune-mtx", "pack", "-a", "1.jpg", "--no-first", "-b", "2.jpg", "-o", "x.mtx"
        ]);
        assert!(result.is_err());

        let result = create_cmd_args().try_get_matches_from([
            "zune-mtx", "pack", "--no-first", "-b", "2.jpg", "-o", "x.mtx"
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn quality_is_range_checked() {
        let result = create_cmd_args().try_get_matches_from([
            "zune-mtx", "pack", "-a", "1.jpg", "-b", "2.jpg", "-o", "x.mtx", "-q", "0"
        ]);
        assert!(result.is_err());
    }
}
