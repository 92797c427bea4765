//! Reading sequences from an extracted directory tree.
//!
//! Once an archive has been unpacked to disk (or when the simulator's
//! output was never archived), each case directory holds its snapshots as
//! `<stem>.vti.0`, `<stem>.vti.1`, ... with no gaps. Unlike the archive
//! walk, the filesystem allows direct probing, so the temporal order falls
//! out of the probe order and no sorting is needed.
//!
//! [`read_cases`] pairs this with the manifest the
//! [scanner](crate::archive::scanner) wrote, reading every case of a run
//! in manifest order.

use std::fs;
use std::path::Path;

use crate::grid::VolumetricGrid;
use crate::vti::{self, ReadOptions};
use crate::Result;

/// Default snapshot filename stem emitted by the simulator's input deck.
pub const DEFAULT_STEM: &str = "IN1003d";

/// Reads one case directory's temporal sequence.
///
/// Probes `dir/<stem>.vti.<n>` for n = 0, 1, 2, ... and decodes each file
/// until the first missing index. A directory with no matching files (or
/// a missing directory) yields an empty sequence, mirroring how empty
/// cases are represented in the archive pipeline.
///
/// # Errors
///
/// Codec errors from any snapshot propagate as-is.
pub fn read_case_dir(
    dir: impl AsRef<Path>,
    stem: &str,
    options: &ReadOptions,
) -> Result<Vec<VolumetricGrid>> {
    let dir = dir.as_ref();
    let mut grids = Vec::new();
    for n in 0usize.. {
        let path = dir.join(format!("{stem}.vti.{n}"));
        if !path.is_file() {
            break;
        }
        grids.push(vti::read_grid_with(&path, options)?);
    }
    Ok(grids)
}

/// Reads every case listed in a manifest, in manifest order.
///
/// Manifest lines are whitespace-trimmed (the trailing tab the scanner
/// writes disappears here) and blank lines are skipped. Each surviving
/// line names a case directory under `root`.
pub fn read_cases(
    root: impl AsRef<Path>,
    manifest: impl AsRef<Path>,
    stem: &str,
    options: &ReadOptions,
) -> Result<Vec<Vec<VolumetricGrid>>> {
    let root = root.as_ref();
    let text = fs::read_to_string(manifest)?;

    let mut cases = Vec::new();
    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        cases.push(read_case_dir(root.join(name), stem, options)?);
    }
    Ok(cases)
}
