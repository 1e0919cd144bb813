//! The decrypt loop.
//!
//! Files are handled one at a time, in discovery order. For each file the
//! candidate passwords are tried in order until one unlocks it:
//!
//! - an accepted password writes the decrypted copy and ends the file;
//! - a "not encrypted" answer copies the input bytes verbatim and ends the file;
//! - a wrong password is recorded and the next candidate is tried;
//! - any other library error is recorded and the remaining candidates are
//!   skipped, since a structural problem with the file will not go away with
//!   a different password.
//!
//! Per-file failures never stop the batch. Filesystem errors around the
//! library call (path resolution, copy-through) do.

use std::fs;
use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::decrypt::{DecryptError, Decryptor};
use crate::error::{Error, Result};
use crate::ledger::{ErrorLedger, Failure};
use crate::paths;

/// How one file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Decrypted,
    Copied,
    Failed,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub decrypted: usize,
    pub copied: usize,
    pub ledger: ErrorLedger,
}

impl Summary {
    /// Files with an output written, decrypted or copied through.
    pub fn succeeded(&self) -> usize {
        self.decrypted + self.copied
    }

    /// Files left without output, one per ledger entry.
    pub fn failed(&self) -> usize {
        self.ledger.len()
    }
}

/// Run context for one batch: roots, candidates and accumulated results.
pub struct Batch<'a, D> {
    input_root: PathBuf,
    output_root: PathBuf,
    passwords: &'a [String],
    decryptor: D,
    console: &'a Console,
    summary: Summary,
}

impl<'a, D: Decryptor> Batch<'a, D> {
    /// Sets up a run over `input_root`, writing below `output_root`.
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        passwords: &'a [String],
        decryptor: D,
        console: &'a Console,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            passwords,
            decryptor,
            console,
            summary: Summary::default(),
        }
    }

    /// Processes `files` in order and returns the accumulated summary.
    pub fn run(mut self, files: &[PathBuf]) -> Result<Summary> {
        for file in files {
            match self.process(file)? {
                Outcome::Decrypted => self.summary.decrypted += 1,
                Outcome::Copied => self.summary.copied += 1,
                Outcome::Failed => {}
            }
            self.console.advance();
        }
        Ok(self.summary)
    }

    /// Tries every candidate against one file until one settles it.
    pub fn process(&mut self, file: &Path) -> Result<Outcome> {
        let rel = paths::relative_to(&self.input_root, file)?;
        let key = paths::display_key(rel);
        let output = self.output_root.join(rel);

        if self.passwords.is_empty() {
            self.fail(&key, "", Failure::WrongPassword);
            return Ok(Outcome::Failed);
        }

        for password in self.passwords {
            tracing::debug!(file = %key, "trying candidate password");

            match self.decryptor.decrypt(file, &output, password) {
                Ok(()) => {
                    self.summary.ledger.clear(&key);
                    tracing::info!(file = %key, "decrypted");
                    self.console.decrypted(&key, password);
                    return Ok(Outcome::Decrypted);
                }
                Err(DecryptError::NotEncrypted) => {
                    copy_through(file, &output)?;
                    self.summary.ledger.clear(&key);
                    tracing::info!(file = %key, "not encrypted, copied");
                    self.console.copied(&key);
                    return Ok(Outcome::Copied);
                }
                Err(DecryptError::IncorrectPassword) => {
                    self.fail(&key, password, Failure::WrongPassword);
                }
                Err(DecryptError::Other(message)) => {
                    self.fail(&key, password, Failure::Other(message));
                    return Ok(Outcome::Failed);
                }
            }
        }

        Ok(Outcome::Failed)
    }

    fn fail(&mut self, key: &str, password: &str, failure: Failure) {
        tracing::warn!(file = %key, %failure, "decrypt attempt failed");
        self.console.failed(key, password, &failure);
        self.summary.ledger.record(key, failure);
    }
}

fn copy_through(input: &Path, output: &Path) -> Result<()> {
    let bytes = fs::read(input).map_err(|e| Error::io("reading", input, e))?;
    fs::write(output, bytes).map_err(|e| Error::io("writing", output, e))
}
