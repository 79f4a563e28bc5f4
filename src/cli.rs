// src/cli.rs
use crate::process::{self, date_parser, MostActive, Query};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, error, info};

pub const DEFAULT_LOG_FILE: &str = "mac-log.log";

#[derive(Parser, Debug)]
#[command(name = "most_active_cookie")]
#[command(version, about = "Find the most active cookie(s) in a cookie log on a given date")]
pub struct Args {
    /// Cookie log CSV file
    pub file: PathBuf,

    /// Date to search for most active cookie (YYYY-MM-DD)
    #[arg(short, long, value_parser = date_parser::parse_target_date)]
    pub date: NaiveDate,

    /// Column holding the cookie identifier (zero-indexed)
    #[arg(long, default_value_t = 0)]
    pub key_column: usize,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    pub no_header: bool,

    /// Append log records to this file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One cookie per line
    Text,
    /// A single JSON object
    Json,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Report {
    pub date: NaiveDate,
    pub count: usize,
    pub cookies: Vec<String>,
}

/// Load `args.file`, normalize timestamps and select the cookies most active on `args.date`.
pub fn run(args: &Args) -> Result<Report> {
    let target = args.date.format("%Y-%m-%d").to_string();
    info!(path = %args.file.display(), date = %target, "searching for most active cookie");

    let query = Query::new(Some(&target), Some(args.key_column))?;
    let MostActive { count, keys } =
        process::find_most_active(&args.file, &query, !args.no_header).with_context(|| {
            format!(
                "finding most active cookie in {} on {}",
                args.file.display(),
                target
            )
        })?;
    debug!(count, cookies = keys.len(), "selected most active");

    Ok(Report {
        date: args.date,
        count,
        cookies: keys,
    })
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.cookies.join("\n")),
        OutputFormat::Json => serde_json::to_string(report).context("serializing report"),
    }
}

/// Run, print the result and log any failure. Returns the process exit code.
pub fn execute(args: &Args) -> ExitCode {
    match run(args).and_then(|report| render(&report, args.format)) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CookieError;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn test_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .finish()
    }

    fn parse(extra: &[&str]) -> std::result::Result<Args, clap::Error> {
        let mut argv = vec!["most_active_cookie"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn parses_defaults() {
        let args = parse(&["cookie_log.csv", "-d", "2018-12-09"]).unwrap();
        assert_eq!(args.file, PathBuf::from("cookie_log.csv"));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2018, 12, 9).unwrap());
        assert_eq!(args.key_column, 0);
        assert!(!args.no_header);
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.verbose);
    }

    #[test]
    fn parses_long_options() {
        let args = parse(&[
            "log.csv",
            "--date",
            "2021-12-03",
            "--key-column",
            "2",
            "--no-header",
            "--format",
            "json",
            "--log-file",
            "other.log",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.key_column, 2);
        assert!(args.no_header);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.log_file, PathBuf::from("other.log"));
        assert!(args.verbose);
    }

    #[test]
    fn rejects_missing_or_malformed_arguments() {
        assert!(parse(&["cookie_log.csv"]).is_err());
        assert!(parse(&["-d", "2018-12-09"]).is_err());
        assert!(parse(&["cookie_log.csv", "-d", "2018/12/09"]).is_err());
        assert!(parse(&["cookie_log.csv", "-d", "2018-02-30"]).is_err());
    }

    #[test]
    fn run_against_bundled_log() -> Result<()> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/cookie_log.csv");
        let args = parse(&[path.to_str().context("utf-8 path")?, "-d", "2018-12-09"])?;

        let report = tracing::subscriber::with_default(test_subscriber(), || run(&args))?;
        assert_eq!(report.count, 2);
        assert_eq!(report.cookies, vec!["AtY0laUfhglK3lC7"]);
        assert_eq!(render(&report, OutputFormat::Text)?, "AtY0laUfhglK3lC7");

        let json: serde_json::Value = serde_json::from_str(&render(&report, OutputFormat::Json)?)?;
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2018-12-09",
                "count": 2,
                "cookies": ["AtY0laUfhglK3lC7"]
            })
        );
        Ok(())
    }

    #[test]
    fn run_reports_ties_one_per_line() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            "cookie,timestamp\nb,2018-12-08T22:03:00+00:00\na,2018-12-08T21:30:00+00:00\n"
        )?;
        let args = parse(&[tmp.path().to_str().context("utf-8 path")?, "-d", "2018-12-08"])?;
        let report = run(&args)?;
        assert_eq!(render(&report, OutputFormat::Text)?, "a\nb");
        Ok(())
    }

    #[test]
    fn run_keeps_core_error_kind() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing.csv");
        let args = parse(&[missing.to_str().context("utf-8 path")?, "-d", "2018-12-09"])?;

        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CookieError>(),
            Some(CookieError::SourceUnavailable { .. })
        ));
        assert!(format!("{:#}", err).contains("missing.csv"));
        Ok(())
    }

    #[test]
    fn run_without_matches_is_an_error() -> Result<()> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/cookie_log.csv");
        let args = parse(&[path.to_str().context("utf-8 path")?, "-d", "2001-01-01"])?;
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CookieError>(),
            Some(CookieError::NoMatches)
        ));
        Ok(())
    }
}
