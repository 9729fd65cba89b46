//! Atomic file replacement.
//!
//! Contents are written to a hidden sibling file which is then renamed over
//! the target, so readers never observe a partially written document.
//! Concurrent writers to the same path are not coordinated: the last rename
//! wins.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::JsonFileError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to `file_name` inside `dir` via a temp file and rename.
///
/// `target` is only used to label errors with the path the caller asked for.
///
/// # Errors
///
/// Returns [`JsonFileError::Write`] if the temp file cannot be created,
/// written, synced, or renamed into place.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &str,
    target: &Utf8Path,
    contents: &str,
) -> Result<(), JsonFileError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id());

    write_to_temp_file(dir, &tmp_name, target, contents)?;
    rename_temp_to_target(dir, &tmp_name, file_name, target)?;
    sync_directory(dir);

    Ok(())
}

fn write_error(target: &Utf8Path, err: &io::Error) -> JsonFileError {
    JsonFileError::Write {
        path: target.to_path_buf(),
        message: err.to_string(),
    }
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target: &Utf8Path,
    contents: &str,
) -> Result<(), JsonFileError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| write_error(target, &err))?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(write_error(target, &err));
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    file_name: &str,
    target: &Utf8Path,
) -> Result<(), JsonFileError> {
    if let Err(err) = replace_target(dir, tmp_name, file_name) {
        drop(dir.remove_file(tmp_name));
        return Err(write_error(target, &err));
    }
    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort; the rename has already happened.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
