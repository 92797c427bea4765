//! The main archive walk: entries in, length-bucketed dataset out.
//!
//! Stream order drives an ordered state machine: a directory entry closes
//! out the previously open directory and opens a new one; a file entry is
//! classified and, if it is a snapshot, decoded and buffered under the
//! open directory. The temporal order *within* a directory is
//! reconstructed from parsed time indices at the flush, so the archive may
//! list a directory's files in any order.
//!
//! Error policy: entries that simply are not snapshots are skipped without
//! per-entry noise; a snapshot that fails to decode aborts the run after
//! logging the offending path, because silently dropping it would corrupt
//! the sequence ordering. Truncation mid-stream propagates as
//! [`Error::Truncated`]: unlike the scanner, the pipeline cannot hand
//! back a meaningful partial dataset without the caller opting in.

use std::path::Path;

use crate::dataset::{Dataset, SequenceAggregator};
use crate::vti::ReadOptions;
use crate::{Error, Result};

use super::{case_name, extractor, open_tar_gz};

/// Builds the dataset with default [`ReadOptions`].
///
/// See [`build_dataset_with`].
pub fn build_dataset(tar_path: impl AsRef<Path>) -> Result<Dataset> {
    build_dataset_with(tar_path, &ReadOptions::default())
}

/// Walks the archive once and aggregates every case directory into a
/// [`Dataset`] keyed by sequence length.
///
/// `options` are handed to the codec for every snapshot (field selection,
/// 2D squeeze). Files that appear before any directory entry cannot be
/// attributed to a case and are ignored.
///
/// # Errors
///
/// - [`Error::InvalidArchive`] if the file is not a gzip archive.
/// - [`Error::Truncated`] if the stream ends mid-read.
/// - Codec errors ([`Error::Format`](crate::Error::Format),
///   [`Error::ShapeMismatch`](crate::Error::ShapeMismatch)) propagate
///   unchanged after the offending path is logged.
pub fn build_dataset_with(tar_path: impl AsRef<Path>, options: &ReadOptions) -> Result<Dataset> {
    let mut archive = open_tar_gz(tar_path.as_ref())?;

    let mut aggregator = SequenceAggregator::new();
    let mut open_directory: Option<String> = None;

    for entry in archive.entries()? {
        let mut entry = entry.map_err(|err| Error::Truncated {
            completed: aggregator.completed(),
            reason: err.to_string(),
        })?;

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            if open_directory.is_some() {
                aggregator.flush_directory();
            }
            open_directory = Some(case_name(&entry.path()?));
            continue;
        }
        if !entry_type.is_file() {
            continue;
        }

        let name = entry.path()?.to_string_lossy().into_owned();
        if open_directory.is_none() {
            log::debug!("ignoring entry outside any case directory: {name}");
            continue;
        }

        match extractor::extract_snapshot(&mut entry, options) {
            Ok(Some(snapshot)) => aggregator.push(snapshot),
            // Not a snapshot file; skip silently to avoid log flooding
            // over large archives.
            Ok(None) => {}
            Err(err) => {
                log::error!("failed to decode snapshot '{name}': {err}");
                return Err(err);
            }
        }
    }

    if open_directory.is_some() {
        aggregator.flush_directory();
    }

    Ok(aggregator.finish())
}
