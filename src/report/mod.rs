//! Report building: section groups → course histories, corpus stats and the
//! operator rankings.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::aggregate::SectionGroup;
use crate::domain::{CorpusStats, CourseHistory, HIGH_DEMAND_PRICE, PricePoint};
use crate::math::to_points;
use crate::models::{last_move, predict_next_price};

pub mod format;

pub use format::*;

/// Latest prices strictly below this count as "hidden gem" candidates.
pub const GEM_MAX_PRICE: u32 = 100;

/// Minimum number of observed terms for a hidden gem.
pub const GEM_MIN_TERMS: usize = 3;

/// The three output artifacts of a run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Descending by latest price.
    pub courses: Vec<CourseHistory>,
    pub stats: CorpusStats,
    /// Distinct department codes, ascending.
    pub departments: Vec<String>,
}

/// Derive one course history. `None` for an empty group.
pub fn build_course(group: &SectionGroup) -> Option<CourseHistory> {
    let latest = group.records.last()?;

    let prices: Vec<u32> = group.records.iter().map(|r| r.price).collect();
    let history: Vec<(usize, u32)> =
        group.records.iter().map(|r| (r.term_index, r.price)).collect();
    let avg = prices.iter().map(|&p| p as f64).sum::<f64>() / prices.len() as f64;
    let (price_change, trend) = last_move(&prices);

    Some(CourseHistory {
        section: group.section.clone(),
        course_code: group.section.chars().take(7).collect(),
        department: group.section.chars().take(4).collect(),
        prices: group
            .records
            .iter()
            .map(|r| PricePoint {
                term: r.term.clone(),
                price: r.price,
            })
            .collect(),
        avg_price: to_points(avg),
        latest_price: latest.price,
        predicted_price: predict_next_price(&history),
        price_change,
        trend,
    })
}

/// Distinct departments, ascending.
pub fn departments(courses: &[CourseHistory]) -> Vec<String> {
    courses
        .iter()
        .map(|c| c.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Corpus-wide statistics. An empty corpus reports zeros.
pub fn corpus_stats(
    courses: &[CourseHistory],
    department_count: usize,
    terms_available: Vec<String>,
    last_updated: DateTime<Utc>,
) -> CorpusStats {
    let avg_price = if courses.is_empty() {
        0
    } else {
        let total: f64 = courses.iter().map(|c| c.latest_price as f64).sum();
        to_points(total / courses.len() as f64)
    };

    CorpusStats {
        total_courses: courses.len(),
        departments: department_count,
        avg_price,
        free_courses: courses.iter().filter(|c| c.latest_price == 0).count(),
        high_demand: courses.iter().filter(|c| c.latest_price >= HIGH_DEMAND_PRICE).count(),
        terms_available,
        last_updated,
    }
}

/// Build the full report from aggregated groups.
pub fn build_report(
    groups: &[SectionGroup],
    terms_available: Vec<String>,
    last_updated: DateTime<Utc>,
) -> Report {
    let mut courses: Vec<CourseHistory> = groups.iter().filter_map(build_course).collect();
    // Stable: ties keep aggregation order.
    courses.sort_by(|a, b| b.latest_price.cmp(&a.latest_price));

    let departments = departments(&courses);
    let stats = corpus_stats(&courses, departments.len(), terms_available, last_updated);

    Report {
        courses,
        stats,
        departments,
    }
}

/// Operator-facing top lists.
#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub top_priced: Vec<CourseHistory>,
    /// Largest `predicted - latest` among priced courses.
    pub increases: Vec<CourseHistory>,
    /// Cheap now, with enough history to trust it.
    pub gems: Vec<CourseHistory>,
}

/// Rank courses (already sorted by latest price, descending).
pub fn rank(courses: &[CourseHistory], top_n: usize) -> Rankings {
    let top_priced = courses.iter().take(top_n).cloned().collect();

    let mut increases: Vec<&CourseHistory> = courses
        .iter()
        .filter(|c| c.predicted_price > c.latest_price && c.latest_price > 0)
        .collect();
    increases.sort_by_key(|c| std::cmp::Reverse(c.predicted_price - c.latest_price));

    let mut gems: Vec<&CourseHistory> = courses
        .iter()
        .filter(|c| {
            c.latest_price > 0 && c.latest_price < GEM_MAX_PRICE && c.prices.len() >= GEM_MIN_TERMS
        })
        .collect();
    gems.sort_by_key(|c| c.avg_price);

    Rankings {
        top_priced,
        increases: increases.into_iter().take(top_n).cloned().collect(),
        gems: gems.into_iter().take(top_n).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::domain::{PriceRecord, Trend};
    use chrono::TimeZone;

    fn rec(section: &str, term_index: usize, price: u32) -> PriceRecord {
        PriceRecord {
            section: section.to_string(),
            price,
            term: format!("T{term_index}"),
            term_index,
        }
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn course_history_from_unordered_records() {
        let groups = aggregate(vec![
            rec("MGMT6910001", 0, 100),
            rec("MGMT6910001", 2, 300),
            rec("MGMT6910001", 1, 200),
        ]);
        let course = build_course(&groups[0]).unwrap();

        assert_eq!(course.course_code, "MGMT691");
        assert_eq!(course.department, "MGMT");
        let prices: Vec<u32> = course.prices.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![100, 200, 300]);
        assert_eq!(course.prices[0].term, "T0");
        assert_eq!(course.avg_price, 200);
        assert_eq!(course.latest_price, 300);
        assert_eq!(course.predicted_price, 400);
        assert_eq!(course.price_change, 50.0);
        assert_eq!(course.trend, Trend::Up);
    }

    #[test]
    fn single_observation_is_stable() {
        let groups = aggregate(vec![rec("FNCE7500001", 4, 890)]);
        let course = build_course(&groups[0]).unwrap();
        assert_eq!(course.predicted_price, 890);
        assert_eq!(course.price_change, 0.0);
        assert_eq!(course.trend, Trend::Stable);
    }

    #[test]
    fn average_rounds_half_up() {
        let groups = aggregate(vec![rec("ACCT7420001", 0, 1), rec("ACCT7420001", 1, 2)]);
        assert_eq!(build_course(&groups[0]).unwrap().avg_price, 2);
    }

    #[test]
    fn courses_sorted_by_latest_price_descending() {
        let groups = aggregate(vec![
            rec("OIDD6150001", 0, 280),
            rec("FNCE7500001", 0, 890),
            rec("WHCP8940001", 0, 0),
            rec("MKTG7120001", 0, 520),
            rec("STAT7010001", 0, 520),
        ]);
        let report = build_report(&groups, vec!["T0".to_string()], ts());

        for pair in report.courses.windows(2) {
            assert!(pair[0].latest_price >= pair[1].latest_price);
        }
        // Tie keeps first-seen order.
        assert_eq!(report.courses[1].section, "MKTG7120001");
        assert_eq!(report.courses[2].section, "STAT7010001");
    }

    #[test]
    fn corpus_stats_and_departments() {
        let groups = aggregate(vec![
            rec("FNCE7500001", 0, 890),
            rec("FNCE7210001", 0, 500),
            rec("MGMT6910001", 0, 450),
            rec("WHCP8940001", 0, 0),
        ]);
        let report = build_report(&groups, vec!["T0".to_string(), "T1".to_string()], ts());

        assert_eq!(report.departments, vec!["FNCE", "MGMT", "WHCP"]);
        let stats = &report.stats;
        assert_eq!(stats.total_courses, 4);
        assert_eq!(stats.departments, 3);
        assert_eq!(stats.avg_price, 460);
        assert_eq!(stats.free_courses, 1);
        assert_eq!(stats.high_demand, 2);
        assert_eq!(stats.terms_available, vec!["T0", "T1"]);
        assert_eq!(stats.last_updated, ts());
    }

    #[test]
    fn empty_corpus_reports_zeros() {
        let report = build_report(&[], vec!["T0".to_string()], ts());
        assert!(report.courses.is_empty());
        assert!(report.departments.is_empty());
        assert_eq!(report.stats.total_courses, 0);
        assert_eq!(report.stats.avg_price, 0);
        assert_eq!(report.stats.terms_available, vec!["T0"]);
    }

    #[test]
    fn rankings_select_increases_and_gems() {
        let groups = aggregate(vec![
            // rising: 100, 200 → predicted 300 (+100)
            rec("FNCE7500001", 0, 100),
            rec("FNCE7500001", 1, 200),
            // rising slowly: 50, 60, 70 → predicted 80 (+10), gem candidate
            rec("MGMT6910001", 0, 50),
            rec("MGMT6910001", 1, 60),
            rec("MGMT6910001", 2, 70),
            // cheap and flat with three terms: gem
            rec("LGST8060001", 0, 20),
            rec("LGST8060001", 1, 20),
            rec("LGST8060001", 2, 20),
            // free: never an increase or a gem
            rec("WHCP8940001", 0, 0),
            rec("WHCP8940001", 1, 0),
            rec("WHCP8940001", 2, 0),
        ]);
        let report = build_report(&groups, Vec::new(), ts());
        let rankings = rank(&report.courses, 10);

        assert_eq!(rankings.top_priced.len(), 4);
        assert_eq!(rankings.top_priced[0].section, "FNCE7500001");

        let inc: Vec<&str> = rankings.increases.iter().map(|c| c.section.as_str()).collect();
        assert_eq!(inc, vec!["FNCE7500001", "MGMT6910001"]);

        let gems: Vec<&str> = rankings.gems.iter().map(|c| c.section.as_str()).collect();
        assert_eq!(gems, vec!["LGST8060001", "MGMT6910001"]);

        let top_one = rank(&report.courses, 1);
        assert_eq!(top_one.top_priced.len(), 1);
        assert_eq!(top_one.increases.len(), 1);
        assert_eq!(top_one.gems.len(), 1);
    }
}
