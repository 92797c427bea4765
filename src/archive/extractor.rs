//! Turning one archive entry into a decoded snapshot.
//!
//! Snapshot files are recognized purely by name: the literal `.vti.`
//! followed by one or more digits, anywhere in the entry path. The digits
//! are the timestep; the position of the entry in the archive stream means
//! nothing. Entries that do not match are a classification outcome
//! (`Ok(None)`), not an error, so the walk can skip stray files without
//! aborting.
//!
//! Tar streams are not random-access, so a matching entry is copied into a
//! scoped temporary file before the codec reads it. The temp file is a
//! [`NamedTempFile`], deleted on drop on every exit path; callers that
//! want to retry a failed decode can hold on to the handle from
//! [`extract_to_temp`].

use std::io::Read;
use std::sync::OnceLock;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::dataset::TimedSnapshot;
use crate::vti::{self, ReadOptions};
use crate::Result;

fn snapshot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.vti\.(\d+)").expect("snapshot pattern is valid"))
}

/// Parses the time index out of an entry name.
///
/// Returns `None` if the name does not contain `.vti.<digits>` (or the
/// digits overflow `usize`), which classifies the entry as "not a
/// snapshot".
///
/// # Example
///
/// ```
/// use vtiset::archive::parse_time_index;
///
/// assert_eq!(parse_time_index("case1/IN1003d.vti.7"), Some(7));
/// assert_eq!(parse_time_index("case1/notes.txt"), None);
/// ```
pub fn parse_time_index(name: &str) -> Option<usize> {
    snapshot_pattern()
        .captures(name)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Classifies an entry and, on a match, copies its bytes to a temporary
/// file.
///
/// Returns the parsed time index and the temp file handle; the file lives
/// until the handle is dropped, so the caller decides how long the bytes
/// stay available (e.g. across a decode retry).
pub fn extract_to_temp<R: Read>(
    entry: &mut tar::Entry<'_, R>,
) -> Result<Option<(usize, NamedTempFile)>> {
    let name = entry.path()?.to_string_lossy().into_owned();
    let Some(time_index) = parse_time_index(&name) else {
        return Ok(None);
    };

    let mut temp = NamedTempFile::new()?;
    std::io::copy(entry, temp.as_file_mut())?;
    Ok(Some((time_index, temp)))
}

/// Extracts and decodes one entry into a [`TimedSnapshot`].
///
/// Non-matching entries yield `Ok(None)`. Decode errors from the codec
/// propagate as-is; the temporary file is cleaned up regardless of the
/// decode outcome.
pub fn extract_snapshot<R: Read>(
    entry: &mut tar::Entry<'_, R>,
    options: &ReadOptions,
) -> Result<Option<TimedSnapshot>> {
    let Some((time_index, temp)) = extract_to_temp(entry)? else {
        return Ok(None);
    };

    let grid = vti::read_grid_with(temp.path(), options)?;
    Ok(Some(TimedSnapshot { time_index, grid }))
}
