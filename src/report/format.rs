//! Formatted terminal output.
//!
//! Everything here is operator-facing diagnostics; the JSON artifacts are the
//! compatibility surface, not these tables.

use std::path::PathBuf;

use crate::domain::{CourseHistory, TermDescriptor};
use crate::report::{GEM_MAX_PRICE, Rankings};

const RULE: &str = "============================================================";

/// How one registry term fared.
#[derive(Debug, Clone)]
pub enum TermOutcome {
    Loaded { term: String, records: usize },
    Skipped { term: String, url: String, reason: String },
}

/// Header printed at the start of a fetch run.
pub fn format_banner() -> String {
    format!("{RULE}\nCourse Match Clearing Prices Fetcher\n{RULE}\n")
}

/// Term success/skip summary.
pub fn format_term_summary(
    outcomes: &[TermOutcome],
    total_records: usize,
    total_courses: usize,
) -> String {
    let loaded = outcomes
        .iter()
        .filter(|o| matches!(o, TermOutcome::Loaded { .. }))
        .count();

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Terms loaded: {loaded}/{}\n", outcomes.len()));
    out.push_str(&format!("Total prices collected: {total_records}\n"));
    out.push_str(&format!("Processed {total_courses} unique course sections\n"));

    for outcome in outcomes {
        if let TermOutcome::Skipped { term, url, reason } = outcome {
            out.push_str(&format!("  skipped {term}: {reason} ({url})\n"));
        }
    }

    out
}

pub fn format_departments(departments: &[String]) -> String {
    format!("Departments: {}\n", departments.join(", "))
}

pub fn format_written(dir: &std::path::Path, files: &[PathBuf]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data saved to {}\n", dir.display()));
    for file in files {
        let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        out.push_str(&format!("  - {name}\n"));
    }
    out
}

/// Top priced, predicted increases and hidden gems.
pub fn format_rankings(rankings: &Rankings, latest_term: Option<&str>) -> String {
    let mut out = String::new();

    let top = rankings.top_priced.len();
    match latest_term {
        Some(term) => out.push_str(&format!("--- Top {top} Highest Priced ({term}) ---\n")),
        None => out.push_str(&format!("--- Top {top} Highest Priced ---\n")),
    }
    for (i, c) in rankings.top_priced.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}: {} (predicted: {})\n",
            i + 1,
            c.section,
            c.latest_price,
            c.predicted_price
        ));
    }
    out.push('\n');

    out.push_str(&format!("--- Top {} Price Increases Predicted ---\n", rankings.increases.len()));
    for (i, c) in rankings.increases.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}: {} -> {} (+{})\n",
            i + 1,
            c.section,
            c.latest_price,
            c.predicted_price,
            c.predicted_price - c.latest_price
        ));
    }
    out.push('\n');

    out.push_str(&format!("--- Hidden Gems (latest under {GEM_MAX_PRICE}, steady history) ---\n"));
    for (i, c) in rankings.gems.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}: avg {}, latest {}, {} terms\n",
            i + 1,
            c.section,
            c.avg_price,
            c.latest_price,
            c.prices.len()
        ));
    }

    out
}

/// Registry listing for `prices terms`.
pub fn format_terms(terms: &[TermDescriptor]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>5} {:<12} {}\n", "index", "term", "url"));
    out.push_str(&format!("{:->5} {:-<12} {:-<3}\n", "", "", ""));
    for t in terms {
        out.push_str(&format!("{:>5} {:<12} {}\n", t.term_index, t.term, t.url));
    }
    out
}

/// One-line description of a course, for `prices report`.
pub fn format_course_line(c: &CourseHistory) -> String {
    format!(
        "{} {} latest={} avg={} predicted={} change={:+.1}% trend={}",
        c.section,
        c.department,
        c.latest_price,
        c.avg_price,
        c.predicted_price,
        c.price_change,
        c.trend
    )
}
