//! Encoding dense arrays back to ascii ImageData files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::grid::{DEFAULT_FIELD, VolumetricGrid};
use crate::{Error, Result};

/// Serializes a grid to an ascii ImageData file.
///
/// The grid's values are always written as the **cell** array of a grid
/// whose point extents exceed the value shape by one per axis (a 2D array
/// `(r, c)` becomes `WholeExtent="0 r 0 c 0 0"`). The `<PointData>` section
/// is emitted empty, so the cell array is the only attribute a reader can
/// select. Payloads are plain-text ascii, never compressed or binary.
///
/// A grid written this way reads back element-for-element through
/// [`read_grid_with`](super::read_grid_with); 2D arrays need
/// [`ReadOptions::squeeze_2d`](super::ReadOptions::squeeze_2d) on the way
/// back in.
///
/// # Errors
///
/// Returns [`Error::Io`] on any write failure, or [`Error::Format`] if the
/// value array is not 2- or 3-dimensional.
pub fn write_grid(path: impl AsRef<Path>, grid: &VolumetricGrid) -> Result<()> {
    let extent = match grid.values().shape() {
        [r, c] => format!("0 {r} 0 {c} 0 0"),
        [x, y, z] => format!("0 {x} 0 {y} 0 {z}"),
        other => {
            return Err(Error::format(format!(
                "only 2D or 3D arrays can be serialized, got {} axes",
                other.len()
            )));
        }
    };

    let field = if grid.field_name().is_empty() {
        DEFAULT_FIELD
    } else {
        grid.field_name()
    };
    let [sx, sy, sz] = grid.spacing();
    let [ox, oy, oz] = grid.origin();

    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, r#"<?xml version="1.0"?>"#)?;
    writeln!(
        w,
        r#"<VTKFile type="ImageData" version="0.1" byte_order="LittleEndian">"#
    )?;
    writeln!(
        w,
        r#"  <ImageData WholeExtent="{extent}" Origin="{ox} {oy} {oz}" Spacing="{sx} {sy} {sz}">"#
    )?;
    writeln!(w, r#"    <Piece Extent="{extent}">"#)?;
    writeln!(w, "      <PointData>")?;
    writeln!(w, "      </PointData>")?;
    writeln!(w, r#"      <CellData Scalars="{field}">"#)?;
    writeln!(
        w,
        r#"        <DataArray type="Float64" Name="{field}" format="ascii">"#
    )?;
    write!(w, "          ")?;
    for value in grid.values().iter() {
        write!(w, "{value} ")?;
    }
    writeln!(w)?;
    writeln!(w, "        </DataArray>")?;
    writeln!(w, "      </CellData>")?;
    writeln!(w, "    </Piece>")?;
    writeln!(w, "  </ImageData>")?;
    writeln!(w, "</VTKFile>")?;
    w.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vti::{ReadOptions, read_grid_with};
    use ndarray::{ArrayD, IxDyn};

    fn ramp(shape: &[usize]) -> ArrayD<f64> {
        let n: usize = shape.iter().product();
        ArrayD::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_round_trip_2d() {
        let grid =
            VolumetricGrid::from_cells(ramp(&[3, 4]), [1.0, 1.0, 1.0], [0.0; 3], "Spin").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_grid(file.path(), &grid).unwrap();

        let back = read_grid_with(file.path(), &ReadOptions::new().squeeze_2d(true)).unwrap();
        assert_eq!(back.values(), grid.values());
        assert_eq!(back.dimensions(), [4, 5, 1]);
        assert_eq!(back.field_name(), "Spin");
    }

    #[test]
    fn test_round_trip_3d() {
        let grid = VolumetricGrid::from_cells(
            ramp(&[4, 3, 2]),
            [0.5, 0.5, 2.0],
            [1.0, -1.0, 0.0],
            "Spin",
        )
        .unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_grid(file.path(), &grid).unwrap();

        let back = read_grid_with(file.path(), &ReadOptions::new()).unwrap();
        assert_eq!(back.values(), grid.values());
        assert_eq!(back.dimensions(), [5, 4, 3]);
        assert_eq!(back.spacing(), [0.5, 0.5, 2.0]);
        assert_eq!(back.origin(), [1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_written_point_section_is_empty() {
        let grid = VolumetricGrid::from_cells(ramp(&[2, 2]), [1.0; 3], [0.0; 3], "Spin").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_grid(file.path(), &grid).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let point_section = text
            .split("<PointData>")
            .nth(1)
            .and_then(|rest| rest.split("</PointData>").next())
            .unwrap();
        assert!(!point_section.contains("DataArray"));
    }

    #[test]
    fn test_unnamed_field_written_with_default_name() {
        let grid = VolumetricGrid::from_cells(ramp(&[2, 2]), [1.0; 3], [0.0; 3], "").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_grid(file.path(), &grid).unwrap();

        let back = read_grid_with(file.path(), &ReadOptions::new().squeeze_2d(true)).unwrap();
        assert_eq!(back.field_name(), DEFAULT_FIELD);
    }

    #[test]
    fn test_fractional_values_survive() {
        let values =
            ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![0.125, -3.5, 1e-9, 42.0]).unwrap();
        let grid = VolumetricGrid::from_cells(values, [1.0; 3], [0.0; 3], "Spin").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_grid(file.path(), &grid).unwrap();

        let back = read_grid_with(file.path(), &ReadOptions::new().squeeze_2d(true)).unwrap();
        assert_eq!(back.values(), grid.values());
    }
}
