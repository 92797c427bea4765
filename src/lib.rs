//! # vtiset
//!
//! Convert gzip-compressed tar archives of per-timestep VTI volumetric
//! snapshots into length-bucketed in-memory datasets, and convert between
//! the ascii ImageData (`.vti`) format and dense [`ndarray`] arrays.
//!
//! A kinetic-Monte-Carlo run produces one directory per simulated case,
//! each holding an unordered pile of `*.vti.<n>` snapshot files where `n`
//! is the timestep. Whole sweeps of such runs get tarred up. This crate
//! walks that archive in a single sequential pass, reconstructs every
//! case's temporal order from the filename-embedded indices, and groups
//! the resulting sequences by length so downstream analysis/ML code gets
//! fixed-length batches without re-scanning.
//!
//! ## Quick Start
//!
//! ### Archive to dataset
//!
//! ```rust,no_run
//! use vtiset::{Result, build_dataset_with, vti::ReadOptions};
//!
//! fn main() -> Result<()> {
//!     let options = ReadOptions::new().field("Spin").squeeze_2d(true);
//!     let dataset = build_dataset_with("runs.tar.gz", &options)?;
//!
//!     for (length, sequences) in dataset.buckets() {
//!         println!("{} sequences of length {}", sequences.len(), length);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Census without decoding
//!
//! ```rust,no_run
//! use vtiset::{Result, scan_archive};
//!
//! fn main() -> Result<()> {
//!     // Counts case directories and writes their names to
//!     // ./census/metadata, one per line.
//!     let result = scan_archive("runs.tar.gz", "./census")?;
//!     println!("{} cases, truncated: {}", result.directory_count, result.truncated);
//!     Ok(())
//! }
//! ```
//!
//! ### Grid round-trip
//!
//! ```rust,no_run
//! use ndarray::ArrayD;
//! use vtiset::{Result, VolumetricGrid};
//! use vtiset::vti::{ReadOptions, read_grid_with, write_grid};
//!
//! fn main() -> Result<()> {
//!     let cells = ArrayD::zeros(ndarray::IxDyn(&[100, 100]));
//!     let grid = VolumetricGrid::from_cells(cells, [1.0; 3], [0.0; 3], "Spin")?;
//!     write_grid("snapshot.vti", &grid)?;
//!
//!     let back = read_grid_with("snapshot.vti", &ReadOptions::new().squeeze_2d(true))?;
//!     assert_eq!(back.values(), grid.values());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `parallel` | Yes | Parallel sequence export with Rayon |
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Malformed snapshot files abort the
//! pipeline (a silently dropped snapshot would corrupt sequence ordering);
//! truncated archives are recoverable at the scanner and yield partial,
//! logged results; entries that simply are not snapshots are skipped
//! without noise. See [`error`] for the full taxonomy.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archive;
pub mod dataset;
pub mod error;
pub mod export;
pub mod grid;
pub mod local;
pub mod vti;

pub use error::{Error, Result};

// Re-export the data model at the crate root for convenience
pub use dataset::{Dataset, ExperimentSequence, SequenceAggregator, TimedSnapshot};
pub use grid::{DEFAULT_FIELD, DataLocation, VolumetricGrid};

// Re-export the archive walk API at the crate root for convenience
pub use archive::{
    DEFAULT_MANIFEST, ScanResult, build_dataset, build_dataset_with, parse_time_index,
    scan_archive, scan_archive_with_manifest,
};

// Re-export the export API
pub use export::export_sequences;
