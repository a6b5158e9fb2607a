//! Cutting list export.
//!
//! One row per strut type. The layout opens cleanly in spreadsheet software
//! set to a European locale: UTF-8 byte order mark, `;` separators, every
//! value double-quoted, lengths in millimeters with one decimal.

use std::fmt::Write as _;

use dome_kernel::DomeModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::LoadError;

const BOM: char = '\u{feff}';

pub const CSV_HEADER: &str = "Type;Length(mm);Quantity;Width(mm);Thickness(mm)";

/// One line of the cutting list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomRow {
    pub label: String,
    pub length_mm: f64,
    pub quantity: usize,
    pub width_mm: f64,
    pub thickness_mm: f64,
}

/// Cutting list rows, longest type first.
pub fn bom_rows(model: &DomeModel) -> Vec<BomRow> {
    let beam = &model.config.beam;
    model
        .types
        .iter()
        .map(|ty| BomRow {
            label: ty.label.clone(),
            length_mm: ty.length * 1000.0,
            quantity: ty.count,
            width_mm: beam.width,
            thickness_mm: beam.thickness,
        })
        .collect()
}

/// The full CSV document for `model`. An empty dome gives the header only.
pub fn bom_csv(model: &DomeModel) -> String {
    let rows = bom_rows(model);
    let mut out = String::new();
    out.push(BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in &rows {
        let _ = writeln!(
            out,
            "\"{}\";\"{:.1}\";\"{}\";\"{}\";\"{}\"",
            row.label, row.length_mm, row.quantity, row.width_mm, row.thickness_mm
        );
    }
    debug!(rows = rows.len(), "cutting list written");
    out
}

/// Download name used by the web front end, e.g. `export_dome_3V.csv`.
pub fn suggested_file_name(frequency: u32) -> String {
    format!("export_dome_{frequency}V.csv")
}

/// Read a cutting list back. The byte order mark and the quotes are both
/// optional; blank lines are skipped.
pub fn parse_bom_csv(text: &str) -> Result<Vec<BomRow>, LoadError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| LoadError::BadHeader("empty document".into()))?;
    let expected: Vec<&str> = CSV_HEADER.split(';').collect();
    let found: Vec<&str> = split_fields(header);
    if found != expected {
        return Err(LoadError::BadHeader(header.to_string()));
    }

    lines
        .map(|(line, content)| parse_row(line, content))
        .collect()
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(';').map(unquote).collect()
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

fn parse_row(line: usize, content: &str) -> Result<BomRow, LoadError> {
    let fields = split_fields(content);
    let &[label, length, quantity, width, thickness] = fields.as_slice() else {
        return Err(LoadError::BadRow {
            line,
            reason: format!("expected 5 fields, found {}", fields.len()),
        });
    };

    let number = |name: &str, value: &str| {
        value.parse::<f64>().map_err(|e| LoadError::BadRow {
            line,
            reason: format!("{name} '{value}': {e}"),
        })
    };

    Ok(BomRow {
        label: label.to_string(),
        length_mm: number("length", length)?,
        quantity: quantity.parse().map_err(|e| LoadError::BadRow {
            line,
            reason: format!("quantity '{quantity}': {e}"),
        })?,
        width_mm: number("width", width)?,
        thickness_mm: number("thickness", thickness)?,
    })
}
