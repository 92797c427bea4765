//! Decoding ascii ImageData files into dense arrays.

use std::fs;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};

use crate::grid::{DataLocation, VolumetricGrid};
use crate::{Error, Result};

use super::parser::{self, RawDataArray};

/// Options controlling how a snapshot file is decoded.
///
/// # Example
///
/// ```
/// use vtiset::vti::ReadOptions;
///
/// let options = ReadOptions::new().field("Spin").squeeze_2d(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    field: Option<String>,
    squeeze_2d: bool,
}

impl ReadOptions {
    /// Creates options with defaults: first available field, no squeeze.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a data array by name instead of taking the first available.
    ///
    /// Decoding fails with a format error if the chosen attribute set has
    /// no array of this name.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.field = Some(name.into());
        self
    }

    /// Drops axes that do not exceed extent 1 from the decoded shape.
    ///
    /// Snapshots of 2D simulations are stored with a flat third axis; with
    /// this option the decoded array comes back two-dimensional.
    pub fn squeeze_2d(mut self, squeeze: bool) -> Self {
        self.squeeze_2d = squeeze;
        self
    }

    pub(crate) fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

/// Decodes a snapshot file with default [`ReadOptions`].
pub fn read_grid(path: impl AsRef<Path>) -> Result<VolumetricGrid> {
    read_grid_with(path, &ReadOptions::default())
}

/// Decodes a snapshot file into a [`VolumetricGrid`].
///
/// Field selection is an ordered fallback evaluated at decode time: the
/// cell attribute set is used if it carries any array, otherwise the point
/// set; within the chosen set, the array named by
/// [`ReadOptions::field`] if given, otherwise the first one. Cell data
/// decodes to shape `dimensions - 1` per axis, point data to `dimensions`
/// unmodified; the flat value payload is reshaped row-major.
///
/// # Errors
///
/// - [`Error::Io`] if the file cannot be read.
/// - [`Error::Format`] if the document is malformed or no data array
///   matches the selection.
/// - [`Error::ShapeMismatch`] if the stored value count does not fill the
///   computed shape exactly.
pub fn read_grid_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<VolumetricGrid> {
    let text = fs::read_to_string(path)?;
    let doc = parser::parse_document(&text)?;

    let (arrays, location) = if !doc.cell_arrays.is_empty() {
        (doc.cell_arrays, DataLocation::Cell)
    } else {
        (doc.point_arrays, DataLocation::Point)
    };

    let array = select_array(arrays, options.field_name())?;

    let mut shape: Vec<usize> = doc.dimensions.to_vec();
    if location == DataLocation::Cell {
        // Cell data has one fewer sample than the point count per axis.
        for d in &mut shape {
            *d -= 1;
        }
    }
    if options.squeeze_2d {
        shape.retain(|&d| d > 1);
    }

    let expected: usize = shape.iter().product();
    if array.values.len() != expected {
        return Err(Error::ShapeMismatch {
            expected: shape,
            actual: array.values.len(),
        });
    }

    let values = ArrayD::from_shape_vec(IxDyn(&shape), array.values).map_err(|_| {
        Error::ShapeMismatch {
            expected: shape.clone(),
            actual: expected,
        }
    })?;

    Ok(VolumetricGrid::from_parts(
        doc.dimensions,
        doc.spacing,
        doc.origin,
        array.name.unwrap_or_default(),
        location,
        values,
    ))
}

fn select_array(arrays: Vec<RawDataArray>, field: Option<&str>) -> Result<RawDataArray> {
    let mut arrays = arrays;
    match field {
        Some(name) => {
            let idx = arrays
                .iter()
                .position(|a| a.name.as_deref() == Some(name))
                .ok_or_else(|| Error::format(format!("no data array named '{name}'")))?;
            Ok(arrays.swap_remove(idx))
        }
        None => {
            if arrays.is_empty() {
                return Err(Error::format("no data array found"));
            }
            Ok(arrays.swap_remove(0))
        }
    }
}
