//! Shared test utilities for integration tests.
//!
//! Archive construction helpers are consolidated here: tests build small
//! gzip-compressed tar archives in memory and hand-rolled ascii ImageData
//! documents, so decode paths are validated against fixtures the crate's
//! own writer did not produce.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use flate2::{Compression, write::GzEncoder};
use tar::{Builder, EntryType, Header};

/// Renders a minimal ascii ImageData document with one cell array.
///
/// `extent` is the `WholeExtent` string (upper bounds = cell counts per
/// axis), `values` the flat cell payload in row-major order.
pub fn vti_text(extent: &str, field: &str, values: &[f64]) -> String {
    let payload: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!(
        r#"<?xml version="1.0"?>
<VTKFile type="ImageData" version="0.1" byte_order="LittleEndian">
  <ImageData WholeExtent="{extent}" Origin="0 0 0" Spacing="1 1 1">
    <Piece Extent="{extent}">
      <PointData>
      </PointData>
      <CellData Scalars="{field}">
        <DataArray type="Float64" Name="{field}" format="ascii">
          {}
        </DataArray>
      </CellData>
    </Piece>
  </ImageData>
</VTKFile>
"#,
        payload.join(" ")
    )
}

/// A 2x2 cell grid (stored with a flat third axis) filled with one value.
pub fn flat_grid_text(tag: f64) -> String {
    vti_text("0 2 0 2 0 0", "Spin", &[tag; 4])
}

/// Builds gzip-compressed tar archives entry by entry, in memory.
pub struct ArchiveBuilder {
    builder: Builder<GzEncoder<Vec<u8>>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        Self {
            builder: Builder::new(encoder),
        }
    }

    /// Appends a directory entry (a case boundary).
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .expect("append directory");
        self
    }

    /// Appends a regular file entry with the given content.
    pub fn add_file(&mut self, path: &str, data: &[u8]) -> &mut Self {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        self.builder
            .append_data(&mut header, path, data)
            .expect("append file");
        self
    }

    /// Finishes the archive and returns its compressed bytes.
    pub fn finish(self) -> Vec<u8> {
        let encoder = self.builder.into_inner().expect("finish tar");
        encoder.finish().expect("finish gzip")
    }

    /// Finishes the archive and writes it to `path`.
    pub fn write_to(self, path: &Path) {
        std::fs::write(path, self.finish()).expect("write archive");
    }
}

/// Builds an *uncompressed* tar, truncates it at `cut` bytes, then gzips
/// the remainder. The gzip stream itself is valid; the tar payload ends
/// mid-block, which is how interrupted archiving jobs leave archives.
pub struct TruncatedArchiveBuilder {
    builder: Builder<Vec<u8>>,
}

impl TruncatedArchiveBuilder {
    pub fn new() -> Self {
        Self {
            builder: Builder::new(Vec::new()),
        }
    }

    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .expect("append directory");
        self
    }

    pub fn add_file(&mut self, path: &str, data: &[u8]) -> &mut Self {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        self.builder
            .append_data(&mut header, path, data)
            .expect("append file");
        self
    }

    /// Truncates the raw tar at `cut` bytes and returns gzipped bytes.
    pub fn finish_truncated_at(self, cut: usize) -> Vec<u8> {
        let mut tar_bytes = self.builder.into_inner().expect("finish tar");
        assert!(cut < tar_bytes.len(), "cut must fall inside the tar data");
        tar_bytes.truncate(cut);

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_bytes).expect("gzip");
        encoder.finish().expect("finish gzip")
    }
}
