//! Walking gzip-compressed tar archives of experiment directories.
//!
//! The archive layout is one top-level directory per simulation case, each
//! holding an unordered set of per-timestep snapshot files whose names
//! embed a literal `.vti.` followed by the timestep digits. The format
//! offers no directory index and no random access, so everything here is
//! built around exactly one sequential pass:
//!
//! - [`scanner`] walks the stream once to census the case directories and
//!   persist the manifest, without decoding any file contents.
//! - [`extractor`] turns one matching entry into a decoded
//!   [`TimedSnapshot`](crate::dataset::TimedSnapshot) via a scoped
//!   temporary file.
//! - [`pipeline`] is the main walk: it drives the extractor per entry and
//!   the [`SequenceAggregator`](crate::dataset::SequenceAggregator) per
//!   directory boundary, producing the final
//!   [`Dataset`](crate::dataset::Dataset).
//!
//! The walk is strictly single-threaded: entry order determines which
//! directory a snapshot is attributed to, so the decode-buffer-flush state
//! machine cannot be reordered.

pub mod extractor;
pub mod pipeline;
pub mod scanner;

pub use extractor::{extract_snapshot, extract_to_temp, parse_time_index};
pub use pipeline::{build_dataset, build_dataset_with};
pub use scanner::{DEFAULT_MANIFEST, ScanResult, scan_archive, scan_archive_with_manifest};

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::{Error, Result};

/// Leading bytes of every gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a gzip-compressed tar archive for one sequential walk.
///
/// The gzip magic is validated up front so that "this is not an archive at
/// all" fails fast as [`Error::InvalidArchive`], distinct from mid-stream
/// truncation discovered later in the walk.
pub(crate) fn open_tar_gz(path: &Path) -> Result<tar::Archive<GzDecoder<BufReader<File>>>> {
    let invalid = |reason: String| Error::InvalidArchive {
        path: path.display().to_string(),
        reason,
    };

    let mut file = File::open(path).map_err(|err| invalid(err.to_string()))?;

    let mut magic = [0u8; 2];
    file.read_exact(&mut magic)
        .map_err(|err| invalid(format!("cannot read header: {err}")))?;
    if magic != GZIP_MAGIC {
        return Err(invalid(format!("bad gzip magic {magic:02x?}")));
    }
    file.seek(SeekFrom::Start(0))?;

    Ok(tar::Archive::new(GzDecoder::new(BufReader::new(file))))
}

/// Final path component of a tar entry path, used as the case name.
pub(crate) fn case_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
