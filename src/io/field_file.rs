//! Reader and writer for the on-disk field-file format.
//!
//! A field file is a line-oriented text file: a `# key: value` metadata
//! header, one data line per cell (or a single `uniform` line), and an
//! optional trailing boundary-condition block.
//!
//! # File Format
//!
//! ```text
//! # field file
//! # name: U
//! # kind: vector
//! # time: 0.5
//! # dimensions: 0 1 -1 0 0 0 0
//! # cells: 4
//! 0.1 0.0 0.0
//! 0.2 0.0 0.0
//! 0.2 0.1 0.0
//! 0.1 0.1 0.0
//! boundary inlet fixedValue 0.1 0.0 0.0
//! boundary walls noSlip
//! ```
//!
//! Header keys may appear in any order. Scalar files carry one value per
//! data line, vector files three. A `uniform <values>` line replaces the
//! per-cell payload and is expanded against the declared cell count.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::field::{BoundaryPatch, Dimensions, ScalarField, Vec3, VectorField};
use crate::time::TimeInstant;

/// Whether a field file holds scalar or vector values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// One value per cell
    Scalar,
    /// Three components per cell
    Vector,
}

impl FieldKind {
    /// Number of components per data line.
    pub fn components(self) -> usize {
        match self {
            FieldKind::Scalar => 1,
            FieldKind::Vector => 3,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::Vector => write!(f, "vector"),
        }
    }
}

/// Error type for field-file parsing and writing.
#[derive(Debug, Error)]
pub enum FieldFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A required header key never appeared
    #[error("Missing header key '{key}'")]
    MissingKey {
        /// The absent key
        key: &'static str,
    },

    /// The file holds the wrong kind of field
    #[error("Expected a {expected} field, found {found}")]
    WrongKind {
        /// Kind the caller asked for
        expected: FieldKind,
        /// Kind declared in the header
        found: FieldKind,
    },

    /// Payload length disagrees with the declared cell count
    #[error("Payload mismatch: header declares {expected} cells, found {actual} data lines")]
    PayloadMismatch {
        /// Declared cell count
        expected: usize,
        /// Number of data lines found
        actual: usize,
    },
}

fn parse_error(line: usize, message: impl Into<String>) -> FieldFileError {
    FieldFileError::Parse {
        line,
        message: message.into(),
    }
}

/// Header and payload of a field file before kind resolution.
struct RawField {
    name: String,
    kind: FieldKind,
    time: TimeInstant,
    dimensions: Dimensions,
    n_cells: usize,
    /// Per-cell rows with their source line numbers
    rows: Vec<(usize, Vec<f64>)>,
    /// `uniform` payload with its source line number
    uniform: Option<(usize, Vec<f64>)>,
    boundary: Vec<BoundaryPatch>,
}

fn parse_raw(content: &str) -> Result<RawField, FieldFileError> {
    let mut name: Option<String> = None;
    let mut kind: Option<FieldKind> = None;
    let mut time: Option<TimeInstant> = None;
    let mut dimensions: Option<Dimensions> = None;
    let mut n_cells: Option<usize> = None;
    let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();
    let mut uniform: Option<(usize, Vec<f64>)> = None;
    let mut boundary: Vec<BoundaryPatch> = Vec::new();

    for (line_idx, raw_line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        // Metadata header; comments without a key are ignored
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            let Some((key, value)) = comment.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "name" => name = Some(value.to_string()),
                "kind" => {
                    kind = Some(match value {
                        "scalar" => FieldKind::Scalar,
                        "vector" => FieldKind::Vector,
                        other => {
                            return Err(parse_error(
                                line_num,
                                format!("Unknown field kind '{}'", other),
                            ))
                        }
                    })
                }
                "time" => {
                    time = Some(TimeInstant::from_name(value).ok_or_else(|| {
                        parse_error(line_num, format!("Invalid time tag '{}'", value))
                    })?)
                }
                "dimensions" => {
                    dimensions = Some(
                        value
                            .parse()
                            .map_err(|e| parse_error(line_num, format!("{}", e)))?,
                    )
                }
                "cells" => {
                    n_cells = Some(
                        value
                            .parse()
                            .map_err(|_| parse_error(line_num, "Invalid cell count"))?,
                    )
                }
                _ => {}
            }
            continue;
        }

        // Boundary-condition block: boundary <patch> <kind> [values...]
        if let Some(rest) = line.strip_prefix("boundary") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() < 2 {
                return Err(parse_error(line_num, "Expected: boundary <patch> <kind> [values...]"));
            }
            let mut values = Vec::with_capacity(parts.len() - 2);
            for part in &parts[2..] {
                values.push(part.parse().map_err(|_| {
                    parse_error(line_num, format!("Invalid boundary value '{}'", part))
                })?);
            }
            boundary.push(BoundaryPatch::new(parts[0], parts[1]).with_value(values));
            continue;
        }

        // Uniform payload: uniform <values...>
        if let Some(rest) = line.strip_prefix("uniform") {
            if uniform.is_some() {
                return Err(parse_error(line_num, "Duplicate uniform payload"));
            }
            let mut values = Vec::new();
            for part in rest.split_whitespace() {
                values.push(part.parse().map_err(|_| {
                    parse_error(line_num, format!("Invalid uniform value '{}'", part))
                })?);
            }
            uniform = Some((line_num, values));
            continue;
        }

        // Per-cell data line
        let mut values = Vec::new();
        for part in line.split_whitespace() {
            values.push(
                part.parse()
                    .map_err(|_| parse_error(line_num, format!("Invalid value '{}'", part)))?,
            );
        }
        rows.push((line_num, values));
    }

    Ok(RawField {
        name: name.ok_or(FieldFileError::MissingKey { key: "name" })?,
        kind: kind.ok_or(FieldFileError::MissingKey { key: "kind" })?,
        // The store rebinds the field to its directory tag after parsing
        time: time.unwrap_or_else(|| TimeInstant::new(0.0)),
        dimensions: dimensions.ok_or(FieldFileError::MissingKey { key: "dimensions" })?,
        n_cells: n_cells.ok_or(FieldFileError::MissingKey { key: "cells" })?,
        rows,
        uniform,
        boundary,
    })
}

/// Resolve the payload into one row of `components` values per cell.
fn resolve_payload(raw: &RawField) -> Result<Vec<Vec<f64>>, FieldFileError> {
    let components = raw.kind.components();

    if let Some((line, values)) = &raw.uniform {
        if !raw.rows.is_empty() {
            return Err(parse_error(
                *line,
                "Uniform payload cannot be mixed with per-cell data lines",
            ));
        }
        if values.len() != components {
            return Err(parse_error(
                *line,
                format!(
                    "Expected {} uniform component(s), found {}",
                    components,
                    values.len()
                ),
            ));
        }
        return Ok(vec![values.clone(); raw.n_cells]);
    }

    if raw.rows.len() != raw.n_cells {
        return Err(FieldFileError::PayloadMismatch {
            expected: raw.n_cells,
            actual: raw.rows.len(),
        });
    }

    let mut out = Vec::with_capacity(raw.rows.len());
    for (line, values) in &raw.rows {
        if values.len() != components {
            return Err(parse_error(
                *line,
                format!("Expected {} component(s), found {}", components, values.len()),
            ));
        }
        out.push(values.clone());
    }
    Ok(out)
}

/// Parse a scalar field from a string.
///
/// Same format as the on-disk file; useful for testing or embedded data.
pub fn parse_scalar_field(content: &str) -> Result<ScalarField, FieldFileError> {
    let raw = parse_raw(content)?;
    if raw.kind != FieldKind::Scalar {
        return Err(FieldFileError::WrongKind {
            expected: FieldKind::Scalar,
            found: raw.kind,
        });
    }

    let values = resolve_payload(&raw)?
        .into_iter()
        .map(|row| row[0])
        .collect();

    Ok(
        ScalarField::new(raw.name, raw.time, raw.dimensions, values)
            .with_boundary(raw.boundary),
    )
}

/// Parse a vector field from a string.
pub fn parse_vector_field(content: &str) -> Result<VectorField, FieldFileError> {
    let raw = parse_raw(content)?;
    if raw.kind != FieldKind::Vector {
        return Err(FieldFileError::WrongKind {
            expected: FieldKind::Vector,
            found: raw.kind,
        });
    }

    let values = resolve_payload(&raw)?
        .into_iter()
        .map(|row| Vec3::new(row[0], row[1], row[2]))
        .collect();

    Ok(
        VectorField::new(raw.name, raw.time, raw.dimensions, values)
            .with_boundary(raw.boundary),
    )
}

/// Read a scalar field file.
pub fn read_scalar_field(path: &Path) -> Result<ScalarField, FieldFileError> {
    let content = std::fs::read_to_string(path)?;
    parse_scalar_field(&content)
}

/// Read a vector field file.
pub fn read_vector_field(path: &Path) -> Result<VectorField, FieldFileError> {
    let content = std::fs::read_to_string(path)?;
    parse_vector_field(&content)
}

fn write_header(
    out: &mut impl Write,
    name: &str,
    kind: FieldKind,
    time: &TimeInstant,
    dimensions: &Dimensions,
    n_cells: usize,
) -> Result<(), std::io::Error> {
    writeln!(out, "# field file")?;
    writeln!(out, "# name: {}", name)?;
    writeln!(out, "# kind: {}", kind)?;
    writeln!(out, "# time: {}", time)?;
    writeln!(out, "# dimensions: {}", dimensions)?;
    writeln!(out, "# cells: {}", n_cells)?;
    Ok(())
}

fn write_boundary(out: &mut impl Write, boundary: &[BoundaryPatch]) -> Result<(), std::io::Error> {
    for patch in boundary {
        write!(out, "boundary {} {}", patch.name, patch.kind)?;
        for v in &patch.value {
            write!(out, " {}", v)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a scalar field to a file.
pub fn write_scalar_field(path: &Path, field: &ScalarField) -> Result<(), FieldFileError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_header(
        &mut out,
        &field.name,
        FieldKind::Scalar,
        &field.time,
        &field.dimensions,
        field.n_cells(),
    )?;
    for v in field.values() {
        writeln!(out, "{}", v)?;
    }
    write_boundary(&mut out, &field.boundary)?;
    out.flush()?;
    Ok(())
}

/// Write a vector field to a file.
pub fn write_vector_field(path: &Path, field: &VectorField) -> Result<(), FieldFileError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_header(
        &mut out,
        &field.name,
        FieldKind::Vector,
        &field.time,
        &field.dimensions,
        field.n_cells(),
    )?;
    for v in field.values() {
        writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
    }
    write_boundary(&mut out, &field.boundary)?;
    out.flush()?;
    Ok(())
}
