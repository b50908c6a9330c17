//! The ingestion pipeline.
//!
//! registry → fetch → extract → aggregate → forecast/report
//!
//! Terms are processed one at a time, in registry order. A term that cannot be
//! fetched or decoded is logged and skipped; the run always completes with
//! whatever was collected.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::data::{Fetcher, Registry, file_name};
use crate::domain::{PriceRecord, TermDescriptor};
use crate::error::SourceError;
use crate::io::extract::{Extraction, extract};
use crate::report::{Report, TermOutcome, build_report};

/// All computed outputs of a single `prices fetch` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: Report,
    pub outcomes: Vec<TermOutcome>,
    pub total_records: usize,
}

/// Fetch and decode one term.
fn load_term(fetcher: &Fetcher, term: &TermDescriptor) -> Result<Extraction, SourceError> {
    let bytes = fetcher.fetch(&term.url)?;
    extract(bytes, &term.term)
}

/// Collect every term's records, with term indices assigned from the registry.
pub fn collect_records(
    registry: &Registry,
    fetcher: &Fetcher,
) -> (Vec<PriceRecord>, Vec<TermOutcome>) {
    let mut all = Vec::new();
    let mut outcomes = Vec::with_capacity(registry.len());

    for term in registry.terms() {
        info!(term = %term.term, file = file_name(&term.url), "fetching");

        match load_term(fetcher, term) {
            Ok(extraction) => {
                debug!(
                    term = %term.term,
                    columns = ?extraction.columns,
                    rows = extraction.rows_read,
                    skipped = extraction.rows_skipped(),
                    "extracted"
                );
                let mut records = extraction.records;
                for record in &mut records {
                    record.term_index = registry.index_of(&record.term).unwrap_or(term.term_index);
                }
                let found = records.len();
                all.extend(records);
                info!(term = %term.term, found, total = all.len(), "loaded");
                outcomes.push(TermOutcome::Loaded {
                    term: term.term.clone(),
                    records: found,
                });
            }
            Err(err) => {
                let stage = if err.is_fetch() { "fetch" } else { "parse" };
                warn!(term = %term.term, url = %term.url, stage, error = %err, "skipping term");
                outcomes.push(TermOutcome::Skipped {
                    term: term.term.clone(),
                    url: term.url.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    (all, outcomes)
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_pipeline(registry: &Registry, fetcher: &Fetcher, now: DateTime<Utc>) -> RunOutput {
    let (records, outcomes) = collect_records(registry, fetcher);
    let total_records = records.len();

    let groups = aggregate(records);
    let duplicates: usize = groups.iter().map(|g| g.duplicate_terms()).sum();
    if duplicates > 0 {
        debug!(duplicates, "sections listed more than once in a term; keeping all rows");
    }

    let report = build_report(&groups, registry.labels(), now);
    if report.courses.is_empty() {
        warn!("no course sections collected; writing empty artifacts");
    }

    RunOutput {
        report,
        outcomes,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trend;
    use crate::test_support::price_sheet;
    use chrono::TimeZone;
    use std::fs;
    use std::path::Path;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    fn fixture_registry(dir: &Path, terms: &[(&str, &str)]) -> Registry {
        let entries: Vec<serde_json::Value> = terms
            .iter()
            .map(|(term, url)| serde_json::json!({ "term": term, "url": url }))
            .collect();
        let path = dir.join("registry.json");
        fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();
        Registry::from_file(&path).unwrap()
    }

    #[test]
    fn builds_histories_across_terms() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = [
            ("f24.xlsx", price_sheet(&[("MGMT6910001", 100.0), ("FNCE7500001", 800.0)])),
            ("s25.xlsx", price_sheet(&[("MGMT6910001", 200.0), ("Total", 1000.0)])),
            ("f25.xlsx", price_sheet(&[("mgmt6910001", 300.0), ("FNCE7500001", 700.0)])),
        ];
        for (name, bytes) in sheets {
            fs::write(dir.path().join(name), bytes).unwrap();
        }

        let registry = fixture_registry(
            dir.path(),
            &[("Fall2024", "f24.xlsx"), ("Spring2025", "s25.xlsx"), ("Fall2025", "f25.xlsx")],
        );
        let fetcher = Fetcher::new(registry.base_dir().map(Path::to_path_buf));

        let run = run_pipeline(&registry, &fetcher, ts());
        assert_eq!(run.total_records, 5);
        assert_eq!(run.outcomes.len(), 3);

        let courses = &run.report.courses;
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].section, "FNCE7500001");
        assert_eq!(courses[0].price_change, -12.5);
        assert_eq!(courses[0].trend, Trend::Down);

        let mgmt = &courses[1];
        let terms: Vec<&str> = mgmt.prices.iter().map(|p| p.term.as_str()).collect();
        assert_eq!(terms, vec!["Fall2024", "Spring2025", "Fall2025"]);
        assert_eq!(mgmt.avg_price, 200);
        assert_eq!(mgmt.latest_price, 300);
        assert_eq!(mgmt.predicted_price, 400);
        assert_eq!(mgmt.price_change, 50.0);
        assert_eq!(mgmt.trend, Trend::Up);

        assert_eq!(run.report.stats.terms_available, vec!["Fall2024", "Spring2025", "Fall2025"]);
        assert_eq!(run.report.departments, vec!["FNCE", "MGMT"]);
    }

    #[test]
    fn failed_terms_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f24.xlsx"), price_sheet(&[("MGMT6910001", 100.0)])).unwrap();
        fs::write(dir.path().join("broken.xlsx"), b"not a workbook").unwrap();
        fs::write(dir.path().join("f25.xlsx"), price_sheet(&[("MGMT6910001", 300.0)])).unwrap();

        let registry = fixture_registry(
            dir.path(),
            &[
                ("Fall2024", "f24.xlsx"),
                ("Spring2025", "missing.xlsx"),
                ("Fall2025", "f25.xlsx"),
                ("Spring2026", "broken.xlsx"),
            ],
        );
        let fetcher = Fetcher::new(registry.base_dir().map(Path::to_path_buf));

        let run = run_pipeline(&registry, &fetcher, ts());
        let skipped: Vec<&str> = run
            .outcomes
            .iter()
            .filter_map(|o| match o {
                TermOutcome::Skipped { term, .. } => Some(term.as_str()),
                TermOutcome::Loaded { .. } => None,
            })
            .collect();
        assert_eq!(skipped, vec!["Spring2025", "Spring2026"]);

        let course = &run.report.courses[0];
        assert_eq!(course.prices.len(), 2);
        // Term indices come from the registry, so the gap is preserved: 0 and 2, forecast at 3.
        assert_eq!(course.predicted_price, 400);
        assert_eq!(run.report.stats.terms_available.len(), 4);
    }

    #[test]
    fn empty_corpus_still_produces_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let registry = fixture_registry(dir.path(), &[("Fall2024", "missing.xlsx")]);
        let fetcher = Fetcher::new(registry.base_dir().map(Path::to_path_buf));

        let run = run_pipeline(&registry, &fetcher, ts());
        assert_eq!(run.total_records, 0);
        assert!(run.report.courses.is_empty());
        assert_eq!(run.report.stats.avg_price, 0);
        assert_eq!(run.report.stats.total_courses, 0);
    }
}
