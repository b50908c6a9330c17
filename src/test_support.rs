//! Fixture builders shared by unit tests.

use rust_xlsxwriter::Workbook;

use crate::io::workbook::Cell;

/// Build an in-memory `.xlsx` whose first sheet holds `rows`.
pub fn xlsx(rows: &[&[Cell]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match cell {
                Cell::Number(v) => {
                    sheet.write_number(r, c, *v).unwrap();
                }
                Cell::Text(s) => {
                    sheet.write_string(r, c, s.as_str()).unwrap();
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b).unwrap();
                }
                Cell::Empty | Cell::Error => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Shorthand for a two-column (section, price) sheet with a header row.
pub fn price_sheet(rows: &[(&str, f64)]) -> Vec<u8> {
    let mut grid: Vec<Vec<Cell>> = vec![vec![
        Cell::Text("Section".into()),
        Cell::Text("Clearing Price".into()),
    ]];
    for (section, price) in rows {
        grid.push(vec![Cell::Text(section.to_string()), Cell::Number(*price)]);
    }
    let refs: Vec<&[Cell]> = grid.iter().map(Vec::as_slice).collect();
    xlsx(&refs)
}
