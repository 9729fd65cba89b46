//! Integration tests for JSON file persistence.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rstest::rstest;
use sample_data::{JsonFileError, read_json, read_json_file, write_json, write_json_file};
use serde_json::{Map, Value, json};
use test_support::unique_temp_path;

fn object(value: &Value) -> &Map<String, Value> {
    value.as_object().expect("test data should be an object")
}

fn read_raw(path: &Utf8Path) -> String {
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open working dir");
    root.read_to_string(path).expect("read raw file")
}

fn write_raw(path: &Utf8Path, contents: &str) {
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open working dir");
    root.write(path, contents).expect("write raw file");
}

#[test]
fn write_then_read_preserves_content_and_key_order() {
    let path = unique_temp_path("round-trip", "data.json").expect("scratch path");
    let data = json!({"zeta": 1, "alpha": [1, 2, 3], "mid": {"b": true, "a": null}});

    let keys = write_json_file(&path, object(&data)).expect("write");
    let read_back = read_json_file(&path).expect("read");

    assert_eq!(keys, 3);
    assert_eq!(read_back, data);
    let order: Vec<&String> = read_back
        .as_object()
        .expect("object")
        .keys()
        .collect();
    assert_eq!(order, ["zeta", "alpha", "mid"]);
}

#[test]
fn written_files_use_two_space_indentation() {
    let path = unique_temp_path("indent", "data.json").expect("scratch path");
    let data = json!({"a": {"b": 1}});

    write_json_file(&path, object(&data)).expect("write");

    assert_eq!(read_raw(&path), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
}

#[test]
fn non_ascii_text_is_written_verbatim() {
    let path = unique_temp_path("unicode", "data.json").expect("scratch path");
    let data = json!({"name": "Zoë Ødegård", "city": "東京"});

    write_json_file(&path, object(&data)).expect("write");
    let raw = read_raw(&path);

    assert!(raw.contains("Zoë Ødegård"), "raw file: {raw}");
    assert!(raw.contains("東京"), "raw file: {raw}");
    assert!(!raw.contains("\\u"), "raw file: {raw}");
}

#[test]
fn overwriting_replaces_previous_contents() {
    let path = unique_temp_path("overwrite", "data.json").expect("scratch path");

    write_json_file(&path, object(&json!({"old": 1, "older": 2}))).expect("first write");
    write_json_file(&path, object(&json!({"new": 3}))).expect("second write");

    assert_eq!(read_json_file(&path).expect("read"), json!({"new": 3}));
}

#[rstest]
#[case(json!({}), 0)]
#[case(json!({"users": [], "count": 0}), 2)]
#[case(json!({"a": 1, "b": 2, "c": 3, "d": 4}), 4)]
fn write_json_reports_top_level_key_count(#[case] data: Value, #[case] keys: usize) {
    let path = unique_temp_path("key-count", "data.json").expect("scratch path");

    let message = write_json(path.as_str(), object(&data));

    assert_eq!(
        message,
        format!("✅ Successfully written {keys} top-level keys to {path}")
    );
}

#[test]
fn read_json_renders_pretty_text() {
    let path = unique_temp_path("pretty", "data.json").expect("scratch path");
    write_raw(&path, "{\"a\":[1,2],\"b\":\"Élodie\"}");

    let text = read_json(path.as_str());

    assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": \"Élodie\"\n}");
}

#[test]
fn read_json_reports_missing_file() {
    let path = unique_temp_path("missing", "absent.json").expect("scratch path");

    let message = read_json(path.as_str());

    assert_eq!(message, format!("❌ Error: File '{path}' not found"));
}

#[test]
fn read_json_reports_invalid_json() {
    let path = unique_temp_path("invalid", "broken.json").expect("scratch path");
    write_raw(&path, "{not json");

    let message = read_json(path.as_str());

    assert_eq!(message, format!("❌ Error: Invalid JSON in file '{path}'"));
    assert!(matches!(
        read_json_file(&path),
        Err(JsonFileError::InvalidJson { .. })
    ));
}

#[test]
fn read_json_file_accepts_non_object_documents() {
    let path = unique_temp_path("array", "list.json").expect("scratch path");
    write_raw(&path, "[1, \"two\", null]");

    assert_eq!(read_json_file(&path).expect("read"), json!([1, "two", null]));
}

#[test]
fn reading_a_directory_is_a_read_error() {
    let path = unique_temp_path("directory", "data.json").expect("scratch path");
    let dir = path.parent().expect("scratch parent");

    let result = read_json_file(dir);

    assert!(
        matches!(result, Err(JsonFileError::Read { .. })),
        "unexpected result: {result:?}"
    );
    assert!(read_json(dir.as_str()).starts_with("❌ Error reading JSON: "));
}

#[cfg(unix)]
mod symlinks {
    //! Reads and writes through symbolic links pointing into another directory.

    use std::os::unix::fs::symlink;

    use camino::Utf8PathBuf;

    use super::*;

    /// Returns `(link, real)` where `link` lives in its own directory and
    /// points at `real` through a relative `../` target.
    fn linked_pair(prefix: &str) -> (Utf8PathBuf, Utf8PathBuf) {
        let link = unique_temp_path(&format!("{prefix}-link"), "link.json").expect("link path");
        let real = unique_temp_path(&format!("{prefix}-real"), "real.json").expect("real path");
        let real_dir = real
            .parent()
            .and_then(Utf8Path::file_name)
            .expect("real directory name");
        symlink(format!("../{real_dir}/real.json"), &link).expect("create symlink");
        (link, real)
    }

    #[test]
    fn reads_follow_links_outside_the_directory() {
        let (link, real) = linked_pair("read");
        write_raw(&real, "{\"k\": 1}");

        assert_eq!(read_json_file(&link).expect("read through link"), json!({"k": 1}));
        assert_eq!(read_json(link.as_str()), "{\n  \"k\": 1\n}");
    }

    #[test]
    fn writes_update_the_link_target_and_keep_the_link() {
        let (link, real) = linked_pair("write");
        write_raw(&real, "{\"k\": 1}");

        let message = write_json(link.as_str(), object(&json!({"k": 2})));

        assert_eq!(
            message,
            format!("✅ Successfully written 1 top-level keys to {link}")
        );
        assert_eq!(read_json_file(&real).expect("read target"), json!({"k": 2}));
        let metadata = link.symlink_metadata().expect("link metadata");
        assert!(metadata.file_type().is_symlink(), "link was replaced");
    }

    #[test]
    fn writes_through_dangling_links_create_the_target() {
        let (link, real) = linked_pair("dangling");

        write_json_file(&link, object(&json!({"fresh": true}))).expect("write");

        assert_eq!(read_json_file(&real).expect("read target"), json!({"fresh": true}));
        assert!(
            link.symlink_metadata()
                .expect("link metadata")
                .file_type()
                .is_symlink()
        );
    }
}
