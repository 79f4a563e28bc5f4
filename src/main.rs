use clap::Parser;
use most_active_cookie::{
    cli::{self, Args, DEFAULT_LOG_FILE},
    logging,
};
use std::{path::Path, process::ExitCode};
use tracing::error;

fn main() -> ExitCode {
    // ─── 1) parse args; --help and --version exit here ───────────────
    let parsed = Args::try_parse();
    if let Err(e) = &parsed {
        if !e.use_stderr() {
            e.exit();
        }
    }

    // ─── 2) init logging ─────────────────────────────────────────────
    let (log_file, verbose) = match &parsed {
        Ok(args) => (args.log_file.as_path(), args.verbose),
        Err(_) => (Path::new(DEFAULT_LOG_FILE), false),
    };
    let subscriber = match logging::subscriber(log_file, verbose) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // ─── 3) run under the scoped subscriber ──────────────────────────
    tracing::subscriber::with_default(subscriber, || match parsed {
        Ok(args) => cli::execute(&args),
        Err(e) => {
            error!("Incorrect syntax (invalid or missing args): {}", e);
            ExitCode::from(2)
        }
    })
}
