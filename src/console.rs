//! Colored terminal output with a file progress bar underneath.

use std::fmt::Display;
use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ledger::{ErrorLedger, Failure};

const RULE: &str = "--------------------------------------";
const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} {pos}/{len} [{wide_bar:.cyan/blue}] ({eta} remaining)";

/// User-facing output. Lines are printed above the progress bar.
pub struct Console {
    bar: ProgressBar,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Console without a visible progress bar.
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Shows a progress bar over `total` files.
    pub fn start(&mut self, total: u64) {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        self.bar = bar;
    }

    /// Marks one more file as done.
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Clears the progress bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn line(&self, text: impl Display) {
        self.bar.suspend(|| println!("{text}"));
    }

    /// Closing magenta rule.
    pub fn rule(&self) {
        self.line(style(format!(" {RULE}")).magenta());
    }

    /// Opening rule and start message.
    pub fn start_banner(&self) {
        self.line(style(format!("\n {RULE}")).magenta());
        self.line(style(" Start pdf-unlock ...").magenta());
    }

    /// Version and build metadata block.
    pub fn version(&self, version: &str, build_time: &str, author: &str, commit: &str) {
        for (label, value) in [
            ("Version", version),
            ("BuildTime", build_time),
            ("Author", author),
            ("CommitId", commit),
        ] {
            self.line(style(format!(" |  {label}: {value}")).magenta());
        }
    }

    /// A file unlocked with `password`.
    pub fn decrypted(&self, name: &str, password: &str) {
        let detail = format!(" PassWord: {password}");
        self.line(format!(
            "{}{}{}{}",
            style(" Decrypting: ").cyan(),
            style(name).white(),
            style(" Decrypted!").green(),
            style(detail).white()
        ));
    }

    /// A file copied through because it was not encrypted.
    pub fn copied(&self, name: &str) {
        self.line(format!(
            "{}{}{}",
            style(" Decrypting: ").cyan(),
            style(name).white(),
            style(" Not encrypted").green()
        ));
    }

    /// A failed attempt with `password`.
    pub fn failed(&self, name: &str, password: &str, failure: &Failure) {
        let detail = match failure {
            Failure::WrongPassword => format!(" PassError: {password}"),
            Failure::Other(message) => format!(" {message}"),
        };
        self.line(format!(
            "{}{}{}",
            style(" Decrypting: ").cyan(),
            style(name).white(),
            style(detail).yellow()
        ));
    }

    /// An empty output directory that was removed.
    pub fn removed(&self, dir: &Path) {
        self.line(format!(
            "{}{}",
            style(" Remove Folder: ").red(),
            style(dir.display()).white()
        ));
    }

    /// End-of-run counts and the failure ledger.
    pub fn summary(&self, succeeded: usize, ledger: &ErrorLedger) {
        self.line(style(format!("\n Decrypted {succeeded} File")).green());
        self.line(style(format!(" Decrypt Error {} Files", ledger.len())).green());
        for (path, failure) in ledger.iter() {
            self.line(style(format!("   {path}: {failure}")).yellow());
        }
    }

    /// A fatal error; the progress bar is abandoned.
    pub fn fatal(&self, err: impl Display) {
        self.bar.abandon();
        self.line(style(format!(" {err}")).yellow());
    }
}
