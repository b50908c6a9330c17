//! Shared domain types.
//!
//! Output types serialize with camelCase field names: the browsing UI reads
//! `courses.json` and `stats.json` field-for-field and never recomputes them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Percentage move between the two most recent prices that counts as a trend.
pub const TREND_THRESHOLD_PCT: f64 = 10.0;

/// Latest price at or above which a section counts as high demand.
pub const HIGH_DEMAND_PRICE: u32 = 500;

/// One term of the source registry.
///
/// `term_index` is the position in the chronologically ordered registry and is
/// the x-axis for trend regression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDescriptor {
    pub term: String,
    pub url: String,
    pub term_index: usize,
}

/// A validated (section, price) observation from one term's spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub section: String,
    pub price: u32,
    pub term: String,
    pub term_index: usize,
}

/// One entry of a course's price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub term: String,
    pub price: u32,
}

/// Coarse direction of the last price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classify a percentage change. Both thresholds are strict.
    pub fn from_change(price_change: f64) -> Self {
        if price_change > TREND_THRESHOLD_PCT {
            Trend::Up
        } else if price_change < -TREND_THRESHOLD_PCT {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-section history and derived statistics, as written to `courses.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseHistory {
    pub section: String,
    pub course_code: String,
    pub department: String,
    /// Ascending by term index; never empty.
    pub prices: Vec<PricePoint>,
    pub avg_price: u32,
    pub latest_price: u32,
    pub predicted_price: u32,
    /// Percent change between the two most recent prices, one decimal.
    pub price_change: f64,
    pub trend: Trend,
}

/// Corpus-wide summary, as written to `stats.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total_courses: usize,
    pub departments: usize,
    /// Mean of every course's latest price.
    pub avg_price: u32,
    pub free_courses: usize,
    pub high_demand: usize,
    pub terms_available: Vec<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub last_updated: DateTime<Utc>,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
