//! Codec for the ascii ImageData (`.vti`) structured-grid format.
//!
//! The simulator writes one snapshot per timestep as a `<VTKFile
//! type="ImageData">` document: an `<ImageData>` element carrying
//! `WholeExtent` (six integers; point count per axis = max extent − min
//! extent + 1), `Origin` and `Spacing` (three floats each), and one
//! `<Piece>` holding `<CellData>` and `<PointData>` sections of
//! `<DataArray format="ascii">` elements with whitespace-separated scalar
//! payloads. Only this plain-text subset is supported; `binary` and
//! `appended` payloads are rejected as format errors.
//!
//! Decoding yields a [`VolumetricGrid`](crate::grid::VolumetricGrid) with a
//! dense row-major value array; encoding writes a grid back as ascii cell
//! data. The two directions compose: a cell array written by
//! [`write_grid`] reads back element-for-element through [`read_grid_with`]
//! under cell-data selection (2D arrays need
//! [`ReadOptions::squeeze_2d`]).
//!
//! One format quirk is deliberately hidden here: the convention sizes every
//! grid by its *point* extents even when only cell values are stored, so
//! the writer derives extents as `shape + 1` per axis while serializing
//! exactly `shape` values. Callers never see the asymmetry.

mod parser;
mod reader;
mod writer;

pub use reader::{ReadOptions, read_grid, read_grid_with};
pub use writer::write_grid;
