//! Source data: the term registry and the spreadsheet fetcher.

pub mod fetch;
pub mod registry;

pub use fetch::*;
pub use registry::*;
