//! Dense in-memory representation of a volumetric scalar field.
//!
//! A [`VolumetricGrid`] is a scalar field on a regular 2D or 3D grid, the
//! in-memory counterpart of one `.vti` snapshot file. Grid metadata follows
//! the structured-grid convention: `dimensions` counts grid *points* per
//! axis, so a field stored at cell granularity carries one value fewer per
//! axis than `dimensions` says.
//!
//! Values live in an [`ndarray::ArrayD<f64>`] in row-major (C) order.

use ndarray::{ArrayD, Axis};

use crate::{Error, Result};

/// Default scalar attribute name emitted by the simulator.
pub const DEFAULT_FIELD: &str = "Spin";

/// Granularity at which a scalar attribute is attached to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLocation {
    /// One value per cell; `dimensions - 1` values per axis.
    Cell,
    /// One value per grid point; `dimensions` values per axis.
    Point,
}

/// A scalar field on a regular 2D or 3D grid.
///
/// # Example
///
/// ```
/// use ndarray::ArrayD;
/// use vtiset::grid::VolumetricGrid;
///
/// let cells = ArrayD::zeros(ndarray::IxDyn(&[4, 4]));
/// let grid = VolumetricGrid::from_cells(cells, [1.0; 3], [0.0; 3], "Spin").unwrap();
/// assert_eq!(grid.dimensions(), [5, 5, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumetricGrid {
    /// Point counts per axis. Always three entries; a 2D grid has a
    /// trailing axis of extent 1.
    dimensions: [usize; 3],
    /// Cell size per axis.
    spacing: [f64; 3],
    /// Coordinate of the grid corner.
    origin: [f64; 3],
    /// Name of the scalar attribute the values belong to.
    field_name: String,
    /// Whether values sit on cells or on points.
    location: DataLocation,
    /// Dense scalar values, row-major.
    values: ArrayD<f64>,
}

impl VolumetricGrid {
    /// Creates a grid from a dense 2D or 3D array of *cell* values.
    ///
    /// Point dimensions are derived from the array shape: each axis gains
    /// one (a 2D array additionally gets a trailing axis of extent 1). This
    /// is the format's defining relationship and the inverse of what the
    /// reader computes for cell data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the array is not 2- or 3-dimensional.
    pub fn from_cells(
        values: ArrayD<f64>,
        spacing: [f64; 3],
        origin: [f64; 3],
        field_name: impl Into<String>,
    ) -> Result<Self> {
        let dimensions = match values.shape() {
            [r, c] => [r + 1, c + 1, 1],
            [x, y, z] => [x + 1, y + 1, z + 1],
            other => {
                return Err(Error::format(format!(
                    "cell arrays must be 2D or 3D, got {} axes",
                    other.len()
                )));
            }
        };

        Ok(Self {
            dimensions,
            spacing,
            origin,
            field_name: field_name.into(),
            location: DataLocation::Cell,
            values,
        })
    }

    /// Assembles a grid from already-validated parts. The reader is the
    /// only caller; it has verified the shape against the dimensions.
    pub(crate) fn from_parts(
        dimensions: [usize; 3],
        spacing: [f64; 3],
        origin: [f64; 3],
        field_name: String,
        location: DataLocation,
        values: ArrayD<f64>,
    ) -> Self {
        Self {
            dimensions,
            spacing,
            origin,
            field_name,
            location,
            values,
        }
    }

    /// Point counts per axis.
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    /// Cell size per axis.
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Coordinate of the grid corner.
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// Name of the scalar attribute.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Whether the values sit on cells or points.
    pub fn location(&self) -> DataLocation {
        self.location
    }

    /// The dense scalar values, row-major.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Consumes the grid and returns the value array.
    pub fn into_values(self) -> ArrayD<f64> {
        self.values
    }

    /// Number of axes of the value array (2 or 3).
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Returns `true` if the value array is two-dimensional.
    pub fn is_2d(&self) -> bool {
        self.values.ndim() == 2
    }

    /// Extracts the top 2D layer (highest last-axis index) of a 3D grid.
    ///
    /// The result keeps the spacing, origin, field name, and location of
    /// the source grid; its dimensions are re-derived from the 2D shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the value array is not 3-dimensional.
    pub fn top_slice(&self) -> Result<VolumetricGrid> {
        if self.values.ndim() != 3 {
            return Err(Error::format(format!(
                "top_slice requires a 3D grid, got {} axes",
                self.values.ndim()
            )));
        }

        let last = Axis(2);
        let top = self.values.len_of(last) - 1;
        let layer = self.values.index_axis(last, top).to_owned().into_dyn();

        let [r, c] = [layer.shape()[0], layer.shape()[1]];
        let dimensions = match self.location {
            DataLocation::Cell => [r + 1, c + 1, 1],
            DataLocation::Point => [r, c, 1],
        };

        Ok(Self {
            dimensions,
            spacing: self.spacing,
            origin: self.origin,
            field_name: self.field_name.clone(),
            location: self.location,
            values: layer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn cells(shape: &[usize]) -> ArrayD<f64> {
        let n: usize = shape.iter().product();
        ArrayD::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_from_cells_2d_dimensions() {
        let grid = VolumetricGrid::from_cells(cells(&[3, 5]), [1.0; 3], [0.0; 3], "Spin").unwrap();
        assert_eq!(grid.dimensions(), [4, 6, 1]);
        assert_eq!(grid.location(), DataLocation::Cell);
        assert!(grid.is_2d());
    }

    #[test]
    fn test_from_cells_3d_dimensions() {
        let grid =
            VolumetricGrid::from_cells(cells(&[4, 4, 2]), [1.0; 3], [0.0; 3], "Spin").unwrap();
        assert_eq!(grid.dimensions(), [5, 5, 3]);
        assert_eq!(grid.ndim(), 3);
    }

    #[test]
    fn test_from_cells_rejects_1d() {
        let err = VolumetricGrid::from_cells(cells(&[8]), [1.0; 3], [0.0; 3], "Spin").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_top_slice_takes_highest_layer() {
        let grid =
            VolumetricGrid::from_cells(cells(&[2, 2, 3]), [1.0; 3], [0.0; 3], "Spin").unwrap();
        let top = grid.top_slice().unwrap();
        assert!(top.is_2d());
        assert_eq!(top.dimensions(), [3, 3, 1]);
        // Layer at z = 2 of the 0..12 ramp: x-major rows [2, 5], [8, 11].
        assert_eq!(top.values()[[0, 0]], 2.0);
        assert_eq!(top.values()[[0, 1]], 5.0);
        assert_eq!(top.values()[[1, 0]], 8.0);
        assert_eq!(top.values()[[1, 1]], 11.0);
    }

    #[test]
    fn test_top_slice_rejects_2d() {
        let grid = VolumetricGrid::from_cells(cells(&[2, 2]), [1.0; 3], [0.0; 3], "Spin").unwrap();
        assert!(grid.top_slice().unwrap_err().is_format_error());
    }
}
