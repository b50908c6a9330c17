//! Spreadsheet decoding.
//!
//! Turns raw workbook bytes into a plain grid of [`Cell`]s from the first
//! sheet. Everything downstream works on the grid, so extraction logic never
//! touches the spreadsheet library directly.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::SourceError;

/// A decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Error,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The cell as it would display as text. Integral numbers carry no
    /// decimal point (`450.0` → `"450"`).
    pub fn text(&self) -> String {
        match self {
            Cell::Empty | Cell::Error => String::new(),
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(v) => Cell::Number(*v as f64),
            Data::Float(v) => Cell::Number(*v),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) => Cell::Error,
        }
    }
}

/// Decode the first sheet of a workbook (xlsx, xls, xlsb or ods).
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Vec<Vec<Cell>>, SourceError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SourceError::Workbook { message: e.to_string() })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::NoSheet)?
        .map_err(|e| SourceError::Workbook {
            message: e.to_string(),
        })?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}
