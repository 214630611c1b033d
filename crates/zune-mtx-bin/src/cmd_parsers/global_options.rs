/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use zune_mtx::MtxRevision;

/// Header revision requested on the command line
///
/// Extended is the default, `--basic` selects the 12 byte header.
pub fn parse_revision(options: &ArgMatches) -> MtxRevision {
    if options.get_flag("basic") {
        info!("Using the basic header revision");
        MtxRevision::Basic
    } else {
        MtxRevision::Extended
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
