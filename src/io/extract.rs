//! Record extraction: one term's cell grid → validated `PriceRecord`s.
//!
//! Historical files disagree on header names, so column detection is a
//! best-effort heuristic kept in its own pure function. Rows that are not
//! sections (titles, totals, merged-cell leftovers) are dropped silently; only
//! an unreadable workbook fails the term.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PriceRecord;
use crate::error::SourceError;
use crate::io::workbook::{Cell, read_first_sheet};
use crate::math::to_points;

/// Four-letter department, three-digit course, three- or four-digit section.
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}[0-9]{6,7}$").expect("section pattern compiles"));

/// Leading decimal number, in the manner of a lenient float parse.
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("number pattern compiles")
});

/// Resolved section and price column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub section: usize,
    /// `None` when the header row has no text at all; prices then read as 0.
    pub price: Option<usize>,
}

/// Extraction output for one term.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<PriceRecord>,
    /// Data rows seen below the header, empty rows included.
    pub rows_read: usize,
    /// `None` when the sheet had no header row.
    pub columns: Option<ColumnMap>,
}

impl Extraction {
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.records.len()
    }
}

/// Locate the section and price columns from a header row.
///
/// The section column is the first header containing "section" or "course";
/// the price column is the first containing "price" or "clearing"
/// (case-insensitive). Fallbacks: column 0 and the last non-blank header.
/// Decoded rows are padded to the sheet width, so blank cells after the last
/// header do not count as columns.
pub fn detect_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMap {
    let width = headers
        .iter()
        .rposition(|h| !h.as_ref().trim().is_empty())
        .map_or(0, |last| last + 1);
    let lowered: Vec<String> = headers[..width].iter().map(|h| h.as_ref().to_lowercase()).collect();

    let section = lowered
        .iter()
        .position(|h| h.contains("section") || h.contains("course"))
        .unwrap_or(0);
    let price = lowered
        .iter()
        .position(|h| h.contains("price") || h.contains("clearing"))
        .or(width.checked_sub(1));

    ColumnMap { section, price }
}

/// Normalize and validate a section identifier.
pub fn normalize_section(raw: &str) -> Option<String> {
    let section = raw.trim().to_uppercase();
    SECTION_RE.is_match(&section).then_some(section)
}

/// Coerce a price cell to whole points. Unparsable values become 0.
pub fn coerce_price(cell: &Cell) -> u32 {
    let value = match cell {
        Cell::Number(v) => *v,
        Cell::Text(s) => parse_leading_number(s).unwrap_or(0.0),
        Cell::Empty | Cell::Bool(_) | Cell::Error => 0.0,
    };
    to_points(value)
}

fn parse_leading_number(raw: &str) -> Option<f64> {
    let m = LEADING_NUMBER_RE.find(raw.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Map one data row to a record, or `None` if the row is not a section.
///
/// `term_index` is left at 0; the pipeline assigns it from the registry.
pub fn extract_row(row: &[Cell], columns: ColumnMap, term: &str) -> Option<PriceRecord> {
    if row.iter().all(Cell::is_empty) {
        return None;
    }

    let section_cell = row.get(columns.section).unwrap_or(&Cell::Empty);
    let section = normalize_section(&section_cell.text())?;
    let price_cell = columns.price.and_then(|col| row.get(col)).unwrap_or(&Cell::Empty);
    let price = coerce_price(price_cell);

    Some(PriceRecord {
        section,
        price,
        term: term.to_string(),
        term_index: 0,
    })
}

/// Extract records from a decoded grid. The first row is the header.
pub fn extract_rows(rows: &[Vec<Cell>], term: &str) -> Extraction {
    let Some((header, data)) = rows.split_first() else {
        return Extraction::default();
    };

    let header_text: Vec<String> = header.iter().map(Cell::text).collect();
    let columns = detect_columns(&header_text);

    let records = data
        .iter()
        .filter_map(|row| extract_row(row, columns, term))
        .collect();

    Extraction {
        records,
        rows_read: data.len(),
        columns: Some(columns),
    }
}

/// Decode workbook bytes and extract the term's records.
pub fn extract(bytes: Vec<u8>, term: &str) -> Result<Extraction, SourceError> {
    let rows = read_first_sheet(bytes)?;
    Ok(extract_rows(&rows, term))
}
