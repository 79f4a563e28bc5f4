// src/logging.rs
use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing::Subscriber;
use tracing_subscriber::{fmt, fmt::time::ChronoLocal, prelude::*, EnvFilter};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `RUST_LOG` if set, otherwise warnings only (debug with `verbose`).
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Build a subscriber writing to stdout and appending to `log_file`.
///
/// Nothing is installed globally; callers scope it with
/// [`tracing::subscriber::with_default`].
pub fn subscriber(log_file: &Path, verbose: bool) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    Ok(tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tracing::error;

    #[test]
    fn failures_reach_the_log_file() -> Result<()> {
        let dir = tempdir()?;
        let log = dir.path().join("mac-log.log");

        tracing::subscriber::with_default(subscriber(&log, false)?, || {
            error!("Incorrect syntax (invalid or missing args)");
        });

        let contents = fs::read_to_string(&log)?;
        assert!(contents.contains("ERROR"));
        assert!(contents.contains("Incorrect syntax"));
        Ok(())
    }

    #[test]
    fn log_file_is_appended() -> Result<()> {
        let dir = tempdir()?;
        let log = dir.path().join("mac-log.log");
        fs::write(&log, "previous run\n")?;

        tracing::subscriber::with_default(subscriber(&log, false)?, || {
            error!("second run");
        });

        let contents = fs::read_to_string(&log)?;
        assert!(contents.starts_with("previous run\n"));
        assert!(contents.contains("second run"));
        Ok(())
    }

    #[test]
    fn unwritable_log_path_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        assert!(subscriber(&dir.path().join("no/such/dir/mac.log"), false).is_err());
        Ok(())
    }
}
