//! Ordinary least squares line.
//!
//! Price forecasting fits `price = a + b·term_index` over a handful of integer
//! points per section. With two parameters the normal equations have a closed
//! form:
//!
//! ```text
//! slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! intercept = ȳ - slope·x̄
//! ```
//!
//! Scaled by `n` both sums are integers, so the line is kept as an exact
//! rational and evaluated without floating-point error. A forecast landing on
//! exactly `.5` rounds half-up the same way every time.

/// Fitted straight line `y = (intercept_num + slope_num·x) / den`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    intercept_num: i128,
    slope_num: i128,
    /// Always positive.
    den: i128,
}

impl Line {
    pub fn slope(&self) -> f64 {
        self.slope_num as f64 / self.den as f64
    }

    pub fn intercept(&self) -> f64 {
        self.intercept_num as f64 / self.den as f64
    }

    pub fn at(&self, x: i64) -> f64 {
        self.numerator_at(x) as f64 / self.den as f64
    }

    /// Value at `x`, rounded half-up, computed exactly.
    pub fn at_rounded(&self, x: i64) -> i128 {
        // floor(num/den + 1/2) = floor((2·num + den) / (2·den)), den > 0
        (2 * self.numerator_at(x) + self.den).div_euclid(2 * self.den)
    }

    fn numerator_at(&self, x: i64) -> i128 {
        self.intercept_num + self.slope_num * x as i128
    }
}

/// Ordinary least squares line through integer `(x, y)` points.
///
/// Returns `None` with fewer than two points or when every `x` is the same
/// (the slope is undefined).
pub fn fit_line(points: &[(i64, i64)]) -> Option<Line> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as i128;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0i128, 0i128, 0i128, 0i128);
    for &(x, y) in points {
        let (x, y) = (x as i128, y as i128);
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    // n·Σ(x - x̄)² and n·Σ(x - x̄)(y - ȳ); var > 0 unless every x is equal.
    let var = n * sxx - sx * sx;
    let cov = n * sxy - sx * sy;
    if var == 0 {
        return None;
    }

    // y(x) = ȳ + (cov/var)(x - x̄) = (sy·var + cov·(n·x - sx)) / (n·var)
    Some(Line {
        intercept_num: sy * var - cov * sx,
        slope_num: cov * n,
        den: n * var,
    })
}
