//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - registry entries (`TermDescriptor`)
//! - extracted observations (`PriceRecord`)
//! - per-section outputs (`CourseHistory`, `PricePoint`, `Trend`)
//! - the corpus-wide summary (`CorpusStats`)

pub mod types;

pub use types::*;
