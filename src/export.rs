//! CSV export for the current filtered view.
//!
//! Produces a header row plus one line per record with every field wrapped
//! in double quotes. Embedded quotes are doubled -- the one correctness gap
//! the legacy export had. Output uses `\n` line endings; encoding is plain
//! UTF-8 text.

use chrono::NaiveDate;

/// One logical cell of a row before quoting.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Multi-value fields (status + secondary status) join with ", "
    /// into a single column.
    Multi(Vec<String>),
    /// Missing optional fields render as an empty quoted string, never a
    /// literal "null".
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Cell {
        Cell::Text(value.into())
    }

    /// Cell from an optional field.
    pub fn opt(value: Option<&str>) -> Cell {
        match value {
            Some(v) => Cell::Text(v.to_string()),
            None => Cell::Empty,
        }
    }
}

/// A column of the export: header label plus the projection that extracts
/// the cell from a record.
pub struct Column<T> {
    pub label: &'static str,
    pub cell: fn(&T) -> Cell,
}

/// Serialize `rows` into CSV text with the given column order.
pub fn to_csv<T>(rows: &[T], columns: &[Column<T>]) -> String {
    let header = columns
        .iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header);
    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|col| quote(&render((col.cell)(row))))
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// File name for the downloadable artifact, e.g.
/// `medical-records-2024-01-15.csv`.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}

fn render(cell: Cell) -> String {
    match cell {
        Cell::Text(value) => value,
        Cell::Multi(values) => values.join(", "),
        Cell::Empty => String::new(),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
