//! JSON file persistence.
//!
//! Two layers are exposed. [`write_json_file`] and [`read_json_file`] return
//! typed results. [`write_json`] and [`read_json`] wrap them for tool
//! callers and always return a human-readable status string; nothing escapes
//! as an error or a panic.
//!
//! Files are UTF-8 with two-space indentation. Non-ASCII characters are
//! written verbatim and object key order is preserved. Symbolic links are
//! followed on both read and write, so writing through a link updates the
//! file it points at and leaves the link in place.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, File};
use serde_json::{Map, Value};

use crate::atomic_io::write_atomic;
use crate::error::JsonFileError;

/// Serialises `data` to `path` with pretty formatting.
///
/// Returns the number of top-level keys written.
///
/// # Errors
///
/// Returns [`JsonFileError::Write`] if the parent directory cannot be opened,
/// the path does not name a file, or the write fails.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use sample_data::{read_json_file, write_json_file};
/// use serde_json::json;
///
/// let dir = std::env::temp_dir().join(format!("sample-data-doc-{}", std::process::id()));
/// std::fs::create_dir_all(&dir).expect("create temp dir");
/// let path = Utf8PathBuf::from_path_buf(dir.join("users.json")).expect("UTF-8 path");
///
/// let data = json!({"users": [], "count": 0});
/// let keys = write_json_file(&path, data.as_object().expect("object")).expect("write");
///
/// assert_eq!(keys, 2);
/// assert_eq!(read_json_file(&path).expect("read"), data);
/// std::fs::remove_file(&path).expect("clean up");
/// ```
pub fn write_json_file(path: &Utf8Path, data: &Map<String, Value>) -> Result<usize, JsonFileError> {
    let write_error = |message: String| JsonFileError::Write {
        path: path.to_path_buf(),
        message,
    };

    let contents = serde_json::to_string_pretty(data).map_err(|err| write_error(err.to_string()))?;
    let resolved = resolve_link(path).map_err(|err| write_error(err.to_string()))?;
    let file_name = resolved
        .file_name()
        .ok_or_else(|| write_error("path must name a file".to_owned()))?;
    let dir = open_parent_dir(&resolved).map_err(|err| write_error(err.to_string()))?;

    write_atomic(&dir, file_name, path, &contents)?;
    Ok(data.len())
}

/// Reads and parses the JSON document at `path`.
///
/// # Errors
///
/// Returns [`JsonFileError::NotFound`] when the file or its directory is
/// missing, [`JsonFileError::InvalidJson`] when the contents do not parse,
/// and [`JsonFileError::Read`] for any other failure.
pub fn read_json_file(path: &Utf8Path) -> Result<Value, JsonFileError> {
    let read_error = |err: &io::Error| {
        if err.kind() == io::ErrorKind::NotFound {
            JsonFileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            JsonFileError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    };

    let mut contents = String::new();
    File::open_ambient(path, ambient_authority())
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|err| read_error(&err))?;

    serde_json::from_str(&contents).map_err(|err| JsonFileError::InvalidJson {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Writes `data` to `path` and reports the outcome as text.
///
/// # Example
///
/// ```
/// use sample_data::write_json;
/// use serde_json::json;
///
/// let data = json!({"a": 1});
/// let message = write_json("/nonexistent-dir/out.json", data.as_object().expect("object"));
///
/// assert!(message.starts_with("❌ Error writing JSON:"));
/// ```
#[must_use]
pub fn write_json(path: &str, data: &Map<String, Value>) -> String {
    match write_json_file(Utf8Path::new(path), data) {
        Ok(keys) => format!("✅ Successfully written {keys} top-level keys to {path}"),
        Err(err) => format!("❌ {err}"),
    }
}

/// Reads `path` and returns its contents re-rendered with two-space
/// indentation, or a message describing why that was not possible.
///
/// # Example
///
/// ```
/// use sample_data::read_json;
///
/// let message = read_json("definitely-missing.json");
///
/// assert_eq!(message, "❌ Error: File 'definitely-missing.json' not found");
/// ```
#[must_use]
pub fn read_json(path: &str) -> String {
    let rendered = read_json_file(Utf8Path::new(path)).and_then(|value| {
        serde_json::to_string_pretty(&value).map_err(|err| JsonFileError::Read {
            path: Utf8Path::new(path).to_path_buf(),
            message: err.to_string(),
        })
    });
    match rendered {
        Ok(text) => text,
        Err(err) => format!("❌ {err}"),
    }
}

/// Returns the file a write to `path` should replace.
///
/// Links are followed to their final target. A dangling link resolves to its
/// immediate target relative to the link's directory so the write creates it.
fn resolve_link(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    let is_link = path
        .symlink_metadata()
        .is_ok_and(|metadata| metadata.file_type().is_symlink());
    if !is_link {
        return Ok(path.to_path_buf());
    }
    match path.canonicalize_utf8() {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let target = path.read_link_utf8()?;
            let parent = path.parent().unwrap_or_else(|| Utf8Path::new(""));
            Ok(parent.join(target))
        }
        Err(err) => Err(err),
    }
}

fn open_parent_dir(path: &Utf8Path) -> io::Result<Dir> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority())
}
