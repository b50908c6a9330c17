//! Rounding rules shared by extraction and reporting.
//!
//! All rounding is half-up (`2.5 → 3`, `-2.5 → -2`), not Rust's
//! half-away-from-zero `f64::round`.

pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, half-up.
pub fn round_one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Clamp to a non-negative whole number of points. Non-finite values are 0.
pub fn to_points(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = round_half_up(value);
    if rounded <= 0.0 {
        0
    } else {
        rounded.min(u32::MAX as f64) as u32
    }
}
