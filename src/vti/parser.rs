//! Low-level scanning of ascii ImageData documents.
//!
//! The format is a fixed, shallow XML subset, so this is a hand-written
//! scanner over element boundaries rather than a general XML parser:
//! elements never nest under the same name and payloads are plain text.

use std::str::FromStr;

use crate::{Error, Result};

/// One `<DataArray>` element: an optional name and its scalar payload.
#[derive(Debug)]
pub(crate) struct RawDataArray {
    pub(crate) name: Option<String>,
    pub(crate) values: Vec<f64>,
}

/// The parts of an ImageData document the codec consumes.
#[derive(Debug)]
pub(crate) struct VtiDocument {
    /// Point counts per axis, from `WholeExtent`.
    pub(crate) dimensions: [usize; 3],
    pub(crate) spacing: [f64; 3],
    pub(crate) origin: [f64; 3],
    pub(crate) cell_arrays: Vec<RawDataArray>,
    pub(crate) point_arrays: Vec<RawDataArray>,
}

/// A located element: its attribute text and inner content.
struct Element<'a> {
    attrs: &'a str,
    content: &'a str,
}

/// Finds the first element with the given tag name.
///
/// Handles both `<Tag ...>...</Tag>` and self-closing `<Tag .../>` forms.
/// Returns the element and the text following it, so callers can scan for
/// siblings.
fn find_element<'a>(text: &'a str, name: &str) -> Option<(Element<'a>, &'a str)> {
    let open = format!("<{name}");
    let mut search = 0;
    loop {
        let rel = text[search..].find(&open)?;
        let start = search + rel;
        let after = start + open.len();
        // The tag name must end here, otherwise "<Piece" would match "<PieceX".
        match text.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
            _ => {
                search = after;
                continue;
            }
        }

        let gt = text[after..].find('>')? + after;
        let head = &text[after..gt];
        if let Some(attrs) = head.strip_suffix('/') {
            return Some((Element { attrs, content: "" }, &text[gt + 1..]));
        }

        let close = format!("</{name}>");
        let body_start = gt + 1;
        let close_rel = text[body_start..].find(&close)?;
        let content = &text[body_start..body_start + close_rel];
        let rest = &text[body_start + close_rel + close.len()..];
        return Some((Element { attrs: head, content }, rest));
    }
}

/// Collects every sibling element with the given tag name.
fn elements<'a>(mut text: &'a str, name: &str) -> Vec<Element<'a>> {
    let mut out = Vec::new();
    while let Some((el, rest)) = find_element(text, name) {
        out.push(el);
        text = rest;
    }
    out
}

/// Extracts a quoted attribute value from element attribute text.
fn attr<'a>(attrs: &'a str, key: &str) -> Option<&'a str> {
    let bytes = attrs.as_bytes();
    let mut search = 0;
    while let Some(rel) = attrs[search..].find(key) {
        let start = search + rel;
        let before_ok = start == 0 || bytes[start - 1].is_ascii_whitespace();
        let mut i = start + key.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if before_ok && i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i] as char;
                let vstart = i + 1;
                if let Some(vlen) = attrs[vstart..].find(quote) {
                    return Some(&attrs[vstart..vstart + vlen]);
                }
            }
        }
        search = start + key.len();
    }
    None
}

/// Parses a whitespace-separated list of numbers of an exact length.
fn parse_fixed<T: FromStr, const N: usize>(text: &str, what: &str) -> Result<[T; N]>
where
    T: Copy + Default,
{
    let mut out = [T::default(); N];
    let mut count = 0;
    for token in text.split_whitespace() {
        if count == N {
            return Err(Error::format(format!("{what}: expected {N} numbers")));
        }
        out[count] = token
            .parse()
            .map_err(|_| Error::format(format!("{what}: cannot parse '{token}'")))?;
        count += 1;
    }
    if count != N {
        return Err(Error::format(format!(
            "{what}: expected {N} numbers, got {count}"
        )));
    }
    Ok(out)
}

fn parse_values(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| Error::format(format!("cannot parse scalar value '{token}'")))
        })
        .collect()
}

fn parse_section(section: Option<Element<'_>>) -> Result<Vec<RawDataArray>> {
    let Some(section) = section else {
        return Ok(Vec::new());
    };

    let mut arrays = Vec::new();
    for el in elements(section.content, "DataArray") {
        if let Some(format) = attr(el.attrs, "format") {
            if format != "ascii" {
                return Err(Error::format(format!(
                    "unsupported DataArray format '{format}', only ascii is supported"
                )));
            }
        }
        arrays.push(RawDataArray {
            name: attr(el.attrs, "Name").map(str::to_owned),
            values: parse_values(el.content)?,
        });
    }
    Ok(arrays)
}

/// Parses an ImageData document into its grid metadata and data arrays.
pub(crate) fn parse_document(text: &str) -> Result<VtiDocument> {
    let (root, _) =
        find_element(text, "VTKFile").ok_or_else(|| Error::format("missing <VTKFile> root"))?;
    match attr(root.attrs, "type") {
        Some("ImageData") => {}
        Some(other) => {
            return Err(Error::format(format!(
                "unsupported VTKFile type '{other}', expected ImageData"
            )));
        }
        None => return Err(Error::format("<VTKFile> has no type attribute")),
    }

    let (image, _) = find_element(root.content, "ImageData")
        .ok_or_else(|| Error::format("missing <ImageData> element"))?;

    let extent: [i64; 6] = parse_fixed(
        attr(image.attrs, "WholeExtent").ok_or_else(|| Error::format("missing WholeExtent"))?,
        "WholeExtent",
    )?;
    let spacing: [f64; 3] = parse_fixed(
        attr(image.attrs, "Spacing").ok_or_else(|| Error::format("missing Spacing"))?,
        "Spacing",
    )?;
    let origin: [f64; 3] = parse_fixed(
        attr(image.attrs, "Origin").ok_or_else(|| Error::format("missing Origin"))?,
        "Origin",
    )?;

    let mut dimensions = [0usize; 3];
    for axis in 0..3 {
        let (lo, hi) = (extent[2 * axis], extent[2 * axis + 1]);
        if hi < lo {
            return Err(Error::format(format!(
                "WholeExtent axis {axis} is inverted: {lo}..{hi}"
            )));
        }
        dimensions[axis] = (hi - lo + 1) as usize;
    }

    let (piece, _) = find_element(image.content, "Piece")
        .ok_or_else(|| Error::format("missing <Piece> element"))?;

    let cell_arrays = parse_section(find_element(piece.content, "CellData").map(|(el, _)| el))?;
    let point_arrays = parse_section(find_element(piece.content, "PointData").map(|(el, _)| el))?;

    Ok(VtiDocument {
        dimensions,
        spacing,
        origin,
        cell_arrays,
        point_arrays,
    })
}
