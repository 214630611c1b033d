/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::MtxCliErrors;

/// Read a whole file into memory
///
/// The file is closed before returning.
pub fn read_file(path: &Path) -> Result<Vec<u8>, MtxCliErrors> {
    let io_err = |e| MtxCliErrors::Io(path.to_path_buf(), e);

    let mut fd = File::open(path).map_err(io_err)?;
    let mut buf = Vec::new();
    fd.read_to_end(&mut buf).map_err(io_err)?;

    debug!("Read {} bytes from {:?}", buf.len(), path);
    Ok(buf)
}

/// Temporary sibling of `path`, same directory so the final rename
/// does not cross file systems
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));

    path.with_file_name(name)
}

fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Write `data` to `path` so that the destination either holds all of
/// `data` or is left untouched
///
/// Bytes go to a temporary file next to `path` which is renamed over it once
/// fully written, on failure the temporary file is removed.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), MtxCliErrors> {
    let temporary = temporary_path(path);

    let result = write_and_sync(&temporary, data).and_then(|_| std::fs::rename(&temporary, path));

    if let Err(e) = result {
        if temporary.exists() {
            if let Err(remove_err) = std::fs::remove_file(&temporary) {
                warn!("Could not remove {:?}: {}", temporary, remove_err);
            }
        }
        return Err(MtxCliErrors::Io(path.to_path_buf(), e));
    }
    debug!("Wrote {} bytes to {:?}", data.len(), path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::file_io::{read_file, temporary_path, write_atomic};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zune-mtx-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_then_read() {
        let dir = scratch_dir("write-then-read");
        let path = dir.join("out.mtx");

        write_atomic(&path, &[1, 2, 3]).unwrap();
        write_atomic(&path, &[4, 5]).unwrap();

        assert_eq!(read_file(&path).unwrap(), vec![4, 5]);
        assert!(!temporary_path(&path).exists());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_nothing() {
        let dir = scratch_dir("failed-write");
        let path = dir.join("missing-dir").join("out.mtx");

        assert!(write_atomic(&path, &[1, 2, 3]).is_err());
        assert!(!path.exists());
        assert!(!temporary_path(&path).exists());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_input_names_the_file() {
        let path = scratch_dir("missing-input").join("nope.jpg");
        let err = read_file(&path).unwrap_err();

        assert!(format!("{err}").contains("nope.jpg"));
    }
}
