//! Mathematical utilities: least squares and rounding.

pub mod ols;
pub mod round;

pub use ols::*;
pub use round::*;
