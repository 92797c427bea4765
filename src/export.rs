//! Writing computed sequences back to per-case file trees.
//!
//! The inverse of the archive pipeline, for consumers that want the
//! reconstructed sequences on disk again: sequence `i` becomes
//! `out_dir/case_<i>/<stem>.vti.<t>` with `t` running over the sequence in
//! temporal order, so the written tree reads straight back through
//! [`local::read_case_dir`](crate::local::read_case_dir).
//!
//! Cases are independent and each parallel unit owns exactly one case
//! directory, so with the `parallel` feature the per-case loop fans out
//! over Rayon with no shared mutable state; without it the loop runs
//! serially with identical results.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dataset::ExperimentSequence;
use crate::vti;
use crate::Result;

/// Writes each sequence to its own `case_<i>` directory under `out_dir`.
///
/// Grid `t` of sequence `i` lands at `out_dir/case_<i>/<stem>.vti.<t>`.
/// The first failing case aborts the export; already-written files are
/// left in place.
pub fn export_sequences(
    sequences: &[ExperimentSequence],
    out_dir: impl AsRef<Path>,
    stem: &str,
) -> Result<()> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    #[cfg(feature = "parallel")]
    {
        sequences
            .par_iter()
            .enumerate()
            .try_for_each(|(index, sequence)| write_case(out_dir, index, sequence, stem))
    }

    #[cfg(not(feature = "parallel"))]
    {
        sequences
            .iter()
            .enumerate()
            .try_for_each(|(index, sequence)| write_case(out_dir, index, sequence, stem))
    }
}

fn write_case(
    out_dir: &Path,
    index: usize,
    sequence: &ExperimentSequence,
    stem: &str,
) -> Result<()> {
    let case_dir = out_dir.join(format!("case_{index}"));
    fs::create_dir_all(&case_dir)?;
    for (t, grid) in sequence.iter().enumerate() {
        vti::write_grid(case_dir.join(format!("{stem}.vti.{t}")), grid)?;
    }
    Ok(())
}
