//! JSON artifacts consumed by the browsing UI.
//!
//! - `courses.json`: course histories, descending by latest price
//! - `stats.json`: corpus summary
//! - `departments.json`: department codes, ascending
//!
//! Each file is serialized fully in memory and written once.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::CourseHistory;
use crate::error::AppError;
use crate::report::Report;

pub const COURSES_FILE: &str = "courses.json";
pub const STATS_FILE: &str = "stats.json";
pub const DEPARTMENTS_FILE: &str = "departments.json";

/// Write the three artifacts into `dir`, creating it if needed.
pub fn write_artifacts(dir: &Path, report: &Report) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| {
            AppError::new(2, format!("Failed to create output dir '{}': {e}", dir.display()))
        })?;

    let courses = write_json(&dir.join(COURSES_FILE), &report.courses)?;
    let stats = write_json(&dir.join(STATS_FILE), &report.stats)?;
    let departments = write_json(&dir.join(DEPARTMENTS_FILE), &report.departments)?;

    Ok(vec![courses, stats, departments])
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf, AppError> {
    let body = serde_json::to_vec_pretty(value)
        .map_err(|e| AppError::new(2, format!("Failed to serialize '{}': {e}", path.display())))?;
    fs::write(path, body)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(path.to_path_buf())
}

/// Read a previously written `courses.json`.
pub fn read_courses(path: &Path) -> Result<Vec<CourseHistory>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| {
            AppError::new(4, format!("Failed to open courses JSON '{}': {e}", path.display()))
        })?;
    serde_json::from_str(&text).map_err(|e| AppError::new(4, format!("Invalid courses JSON: {e}")))
}
