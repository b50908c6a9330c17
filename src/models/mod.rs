//! Price models: next-term forecast and last-move trend.
//!
//! Kept as small, pure functions so report building stays a plain fold over
//! section groups.

pub mod forecast;

pub use forecast::*;
