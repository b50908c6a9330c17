//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves them against the environment
//! - sets up logging
//! - runs the ingestion pipeline
//! - writes the JSON artifacts and prints operator summaries

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FetchArgs, RegistryArgs, ReportArgs};
use crate::data::{Fetcher, Registry};
use crate::error::AppError;

pub mod pipeline;

pub const REGISTRY_ENV: &str = "CLEARING_PRICES_REGISTRY";
pub const OUT_DIR_ENV: &str = "CLEARING_PRICES_OUT_DIR";
pub const DEFAULT_OUT_DIR: &str = "public/data";

/// Resolved settings for a fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub registry: Registry,
    pub out_dir: PathBuf,
    pub top_n: usize,
}

/// Entry point for the `prices` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // `prices` and `prices --top 5` behave like `prices fetch ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fetch(args) => handle_fetch(&args),
        Command::Report(args) => handle_report(&args),
        Command::Terms(args) => handle_terms(&args),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_fetch(args: &FetchArgs) -> Result<(), AppError> {
    let config = fetch_config_from_args(args, env_var)?;
    println!("{}", crate::report::format_banner());

    let fetcher = Fetcher::new(config.registry.base_dir().map(Path::to_path_buf));
    let run = pipeline::run_pipeline(&config.registry, &fetcher, Utc::now());
    let report = &run.report;

    println!(
        "{}",
        crate::report::format_term_summary(&run.outcomes, run.total_records, report.courses.len())
    );
    println!("{}", crate::report::format_departments(&report.departments));

    let written = crate::io::export::write_artifacts(&config.out_dir, report)?;
    println!("{}", crate::report::format_written(&config.out_dir, &written));

    let rankings = crate::report::rank(&report.courses, config.top_n);
    let latest_term = report.stats.terms_available.last().map(String::as_str);
    println!("{}", crate::report::format_rankings(&rankings, latest_term));

    Ok(())
}

fn handle_report(args: &ReportArgs) -> Result<(), AppError> {
    let courses = crate::io::export::read_courses(&args.courses)?;
    let rankings = crate::report::rank(&courses, args.top);
    println!("{}", crate::report::format_rankings(&rankings, None));

    if let Some(dept) = &args.department {
        let dept = dept.trim().to_uppercase();
        for course in courses.iter().filter(|c| c.department == dept) {
            println!("{}", crate::report::format_course_line(course));
        }
    }

    Ok(())
}

fn handle_terms(args: &RegistryArgs) -> Result<(), AppError> {
    let registry = resolve_registry(args, env_var)?;
    println!("{}", crate::report::format_terms(registry.terms()));
    Ok(())
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Registry precedence: `--registry`, then the environment, then built-in.
pub fn resolve_registry(
    args: &RegistryArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Registry, AppError> {
    let path = args.registry.clone().or_else(|| env(REGISTRY_ENV).map(PathBuf::from));
    match path {
        Some(path) => Registry::from_file(&path),
        None => Registry::builtin(),
    }
}

pub fn fetch_config_from_args(
    args: &FetchArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<FetchConfig, AppError> {
    let registry = resolve_registry(&args.registry, &env)?;
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| env(OUT_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

    Ok(FetchConfig {
        registry,
        out_dir,
        top_n: args.top,
    })
}

/// Rewrite argv so `prices` defaults to `prices fetch`.
///
/// Rules:
/// - `prices`                      -> `prices fetch`
/// - `prices --top 5 ...`          -> `prices fetch --top 5 ...`
/// - `prices --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fetch".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "fetch".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fetch_args(registry: Option<&str>, out_dir: Option<&str>) -> FetchArgs {
        FetchArgs {
            registry: RegistryArgs {
                registry: registry.map(PathBuf::from),
            },
            out_dir: out_dir.map(PathBuf::from),
            top: 10,
        }
    }

    #[test]
    fn rewrite_defaults_to_fetch() {
        assert_eq!(rewrite_args(argv(&["prices"])), argv(&["prices", "fetch"]));
        assert_eq!(
            rewrite_args(argv(&["prices", "--top", "5"])),
            argv(&["prices", "fetch", "--top", "5"])
        );
        assert_eq!(rewrite_args(argv(&["prices", "--help"])), argv(&["prices", "--help"]));
        assert_eq!(rewrite_args(argv(&["prices", "report"])), argv(&["prices", "report"]));
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let config = fetch_config_from_args(&fetch_args(None, None), |_| None).unwrap();
        assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(config.registry.len(), 26);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn flags_win_over_environment() {
        let dir = tempfile::tempdir().unwrap();
        let flag_registry = dir.path().join("flag.json");
        let env_registry = dir.path().join("env.json");
        std::fs::write(&flag_registry, r#"[{"term": "Fall2024", "url": "a.xlsx"}]"#).unwrap();
        std::fs::write(
            &env_registry,
            r#"[{"term": "Fall2024", "url": "a.xlsx"}, {"term": "Spring2025", "url": "b.xlsx"}]"#,
        )
        .unwrap();

        let env: HashMap<&str, String> = HashMap::from([
            (REGISTRY_ENV, env_registry.display().to_string()),
            (OUT_DIR_ENV, "env-out".to_string()),
        ]);
        let lookup = |key: &str| env.get(key).cloned();

        let from_env = fetch_config_from_args(&fetch_args(None, None), lookup).unwrap();
        assert_eq!(from_env.registry.len(), 2);
        assert_eq!(from_env.out_dir, PathBuf::from("env-out"));

        let flag_path = flag_registry.display().to_string();
        let from_flags =
            fetch_config_from_args(&fetch_args(Some(&flag_path), Some("flag-out")), lookup)
                .unwrap();
        assert_eq!(from_flags.registry.len(), 1);
        assert_eq!(from_flags.out_dir, PathBuf::from("flag-out"));
        assert_eq!(from_flags.registry.base_dir(), Some(dir.path()));
    }

    #[test]
    fn missing_registry_file_is_exit_code_2() {
        let args = fetch_args(Some("/nonexistent/registry.json"), None);
        let err = fetch_config_from_args(&args, |_| None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
