//! Input/output helpers.
//!
//! - spreadsheet decoding (`workbook`)
//! - record extraction + validation (`extract`)
//! - JSON artifact read/write (`export`)

pub mod export;
pub mod extract;
pub mod workbook;

pub use export::*;
pub use extract::*;
pub use workbook::*;
