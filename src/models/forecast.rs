//! Next-term price forecast.
//!
//! A two-parameter linear extrapolation over `(term_index, price)`. Histories
//! are short (often 2–5 points), so there is no seasonality and no interval.

use crate::domain::Trend;
use crate::math::{fit_line, round_one_decimal, to_points};

/// Forecast the price one term after the latest observed term.
///
/// - no points: 0
/// - one point: that price
/// - otherwise: OLS line evaluated at `max(term_index) + 1`, floored at 0
///
/// Points that all share one term index have no slope; the forecast is then
/// their mean.
pub fn predict_next_price(history: &[(usize, u32)]) -> u32 {
    match history {
        [] => 0,
        [(_, price)] => *price,
        _ => {
            let points: Vec<(i64, i64)> =
                history.iter().map(|&(t, p)| (t as i64, p as i64)).collect();
            let next = history.iter().map(|&(t, _)| t).max().unwrap_or(0) as i64 + 1;
            match fit_line(&points) {
                Some(line) => clamp_points(line.at_rounded(next)),
                None => to_points(mean(history)),
            }
        }
    }
}

/// Percent change from `previous` to `latest`, unrounded. 0 when `previous`
/// is 0.
pub fn price_change(previous: u32, latest: u32) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (latest as f64 - previous as f64) / previous as f64 * 100.0
}

/// Change (one decimal) and trend for a chronological price list. With a
/// single price the previous price is the latest one.
///
/// The trend is classified on the unrounded change, so `10.04%` reads as
/// `10.0` but is still `up`.
pub fn last_move(prices: &[u32]) -> (f64, Trend) {
    let change = match prices {
        [.., previous, latest] => price_change(*previous, *latest),
        _ => 0.0,
    };
    (round_one_decimal(change), Trend::from_change(change))
}

fn mean(history: &[(usize, u32)]) -> f64 {
    history.iter().map(|&(_, p)| p as f64).sum::<f64>() / history.len() as f64
}

fn clamp_points(value: i128) -> u32 {
    value.clamp(0, u32::MAX as i128) as u32
}
