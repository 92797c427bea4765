//! Directory census over one sequential archive pass.
//!
//! The scanner answers "which cases does this archive hold, and how many"
//! without decoding a single snapshot: it walks the stream once, records
//! the final path component of every directory entry in encounter order,
//! and persists the list as a text manifest for downstream line-oriented
//! readers.
//!
//! Archives cut short by interrupted jobs are expected input, not a
//! failure: a mid-stream read error ends the walk early with a logged
//! warning, and the manifest still records every directory seen up to
//! that point.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;

use super::{case_name, open_tar_gz};

/// Default manifest file name inside the output directory.
pub const DEFAULT_MANIFEST: &str = "metadata";

/// Outcome of one scanner pass.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Number of case directories encountered.
    pub directory_count: usize,
    /// Their names, in encounter order (also the manifest content).
    pub case_names: Vec<String>,
    /// `true` if the walk ended early on a corrupted or truncated stream.
    pub truncated: bool,
}

/// Scans an archive and writes the manifest under its default name.
///
/// See [`scan_archive_with_manifest`].
pub fn scan_archive(
    tar_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<ScanResult> {
    scan_archive_with_manifest(tar_path, output_dir, DEFAULT_MANIFEST)
}

/// Scans an archive, counting case directories and persisting the manifest.
///
/// Walks the tar stream exactly once. Directory entries contribute their
/// final path component; file entries are ignored entirely (extraction is
/// the pipeline's job). The manifest is written into `output_dir`
/// (created if absent), one case name per line, each line terminated by a
/// tab then a newline; downstream readers split on whitespace and rely on
/// this exact shape.
///
/// # Errors
///
/// [`Error::InvalidArchive`](crate::Error::InvalidArchive) if the file is
/// not a gzip archive at all; [`Error::Io`](crate::Error::Io) if the
/// manifest cannot be written. Mid-stream truncation is *not* an error:
/// the walk stops, the truncation is logged, and the result carries the
/// count accumulated so far with `truncated` set.
pub fn scan_archive_with_manifest(
    tar_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    manifest_name: &str,
) -> Result<ScanResult> {
    let mut archive = open_tar_gz(tar_path.as_ref())?;

    let mut case_names = Vec::new();
    let mut truncated = false;

    for entry in archive.entries()? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!(
                    "archive truncated after {} directories: {err}",
                    case_names.len()
                );
                truncated = true;
                break;
            }
        };

        if !entry.header().entry_type().is_dir() {
            continue;
        }
        match entry.path() {
            Ok(path) => case_names.push(case_name(&path)),
            Err(err) => {
                log::warn!(
                    "unreadable directory entry after {} directories: {err}",
                    case_names.len()
                );
                truncated = true;
                break;
            }
        }
    }

    write_manifest(output_dir.as_ref(), manifest_name, &case_names)?;

    Ok(ScanResult {
        directory_count: case_names.len(),
        case_names,
        truncated,
    })
}

fn write_manifest(output_dir: &Path, manifest_name: &str, case_names: &[String]) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let mut file = BufWriter::new(File::create(output_dir.join(manifest_name))?);
    for name in case_names {
        // Tab-then-newline termination is part of the manifest format.
        write!(file, "{name}\t\n")?;
    }
    file.flush()?;
    Ok(())
}
