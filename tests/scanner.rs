//! Integration tests for the archive scanner: directory census, manifest
//! formatting, and partial results over truncated streams.

mod common;

use std::fs;

use common::{ArchiveBuilder, TruncatedArchiveBuilder, flat_grid_text};
use vtiset::{DEFAULT_MANIFEST, Error, scan_archive};

#[test]
fn test_counts_directories_and_writes_manifest() {
    let mut builder = ArchiveBuilder::new();
    builder
        .add_dir("caseA/")
        .add_file("caseA/IN1003d.vti.0", flat_grid_text(0.0).as_bytes())
        .add_dir("caseB/")
        .add_file("caseB/notes.txt", b"not a snapshot");

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("runs.tar.gz");
    builder.write_to(&archive_path);

    let out = dir.path().join("census");
    let result = scan_archive(&archive_path, &out).unwrap();

    assert_eq!(result.directory_count, 2);
    assert_eq!(result.case_names, vec!["caseA", "caseB"]);
    assert!(!result.truncated);

    // One name per line, tab-then-newline terminated.
    let manifest = fs::read_to_string(out.join(DEFAULT_MANIFEST)).unwrap();
    assert_eq!(manifest, "caseA\t\ncaseB\t\n");
}

#[test]
fn test_nested_directory_names_keep_final_component() {
    let mut builder = ArchiveBuilder::new();
    builder.add_dir("sweep1/").add_dir("sweep1/caseA/");

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("runs.tar.gz");
    builder.write_to(&archive_path);

    let result = scan_archive(&archive_path, dir.path().join("census")).unwrap();
    assert_eq!(result.case_names, vec!["sweep1", "caseA"]);
}

#[test]
fn test_scanner_ignores_file_contents() {
    // The scanner never decodes, so snapshot files may be arbitrary bytes.
    let mut builder = ArchiveBuilder::new();
    builder
        .add_dir("caseA/")
        .add_file("caseA/IN1003d.vti.0", b"\x00\x01garbage");

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("runs.tar.gz");
    builder.write_to(&archive_path);

    let result = scan_archive(&archive_path, dir.path().join("census")).unwrap();
    assert_eq!(result.directory_count, 1);
}

#[test]
fn test_truncated_archive_yields_partial_census() {
    let mut builder = TruncatedArchiveBuilder::new();
    builder.add_dir("caseA/").add_dir("caseB/").add_dir("caseC/");

    // Each directory entry is one 512-byte tar header; cutting 100 bytes
    // into the third header leaves two complete directories.
    let bytes = builder.finish_truncated_at(2 * 512 + 100);

    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("runs.tar.gz");
    fs::write(&archive_path, bytes).unwrap();

    let out = dir.path().join("census");
    let result = scan_archive(&archive_path, &out).unwrap();

    assert_eq!(result.directory_count, 2);
    assert_eq!(result.case_names, vec!["caseA", "caseB"]);
    assert!(result.truncated);

    let manifest = fs::read_to_string(out.join(DEFAULT_MANIFEST)).unwrap();
    assert_eq!(manifest, "caseA\t\ncaseB\t\n");
}

#[test]
fn test_unopenable_archive_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let not_an_archive = dir.path().join("plain.txt");
    fs::write(&not_an_archive, "just text").unwrap();

    let err = scan_archive(&not_an_archive, dir.path().join("census")).unwrap_err();
    assert!(matches!(err, Error::InvalidArchive { .. }));
}

#[test]
fn test_empty_archive_writes_empty_manifest() {
    let builder = ArchiveBuilder::new();
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("runs.tar.gz");
    builder.write_to(&archive_path);

    let out = dir.path().join("census");
    let result = scan_archive(&archive_path, &out).unwrap();
    assert_eq!(result.directory_count, 0);
    assert_eq!(fs::read_to_string(out.join(DEFAULT_MANIFEST)).unwrap(), "");
}
