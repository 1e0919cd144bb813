//! Command-line entry point for pdf-unlock.

use std::process::exit;

use pdf_unlock::config::{BuildInfo, Cli, Settings};
use pdf_unlock::{Console, LopdfDecryptor, logging};

/// Exit code when at least one file could not be unlocked.
const EXIT_FAILED_FILES: i32 = 2;

fn main() {
    let args = Cli::parse_normalized();
    let mut console = Console::new();

    if args.version {
        let info = BuildInfo::current();
        console.version(info.version, info.build_time, info.author, info.commit);
        return;
    }

    let settings = Settings::from_cli(args);

    let _log_guard = match logging::setup_logging(settings.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            console.fatal(format!("{e:#}"));
            exit(1);
        }
    };

    console.start_banner();
    tracing::info!(
        input = %settings.input.display(),
        output = %settings.output.display(),
        candidates = settings.passwords.len(),
        "starting batch"
    );

    let summary = match pdf_unlock::run(&settings, LopdfDecryptor::new(), &mut console) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "batch aborted");
            console.fatal(&e);
            console.rule();
            exit(1);
        }
    };

    console.summary(summary.succeeded(), &summary.ledger);
    console.rule();

    if summary.failed() > 0 {
        exit(EXIT_FAILED_FILES);
    }
}
