//! Per-file failure bookkeeping.

use std::fmt;

use indexmap::IndexMap;

/// Why a file could not be unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    WrongPassword,
    Other(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::WrongPassword => f.write_str("wrong password"),
            Failure::Other(message) => write!(f, "other: {message}"),
        }
    }
}

/// Latest failure per relative file path, in first-failure order.
///
/// Recording a path that is already present replaces its entry in place, so
/// a file that fails against several candidates shows up once.
#[derive(Debug, Default, Clone)]
pub struct ErrorLedger {
    entries: IndexMap<String, Failure>,
}

impl ErrorLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `failure` for `key`, replacing any earlier entry in place.
    pub fn record(&mut self, key: impl Into<String>, failure: Failure) {
        self.entries.insert(key.into(), failure);
    }

    /// Forgets `key`, e.g. after a later candidate unlocked the file.
    pub fn clear(&mut self, key: &str) -> Option<Failure> {
        self.entries.shift_remove(key)
    }

    /// Latest failure recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&Failure> {
        self.entries.get(key)
    }

    /// Number of failed files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no file has failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-failure order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
