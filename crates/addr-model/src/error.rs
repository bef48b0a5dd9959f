//! Error types for rule set loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a rule set.
#[derive(Debug, Error)]
pub enum RuleSetError {
    /// Rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not valid TOML or does not match the rule schema.
    #[error("failed to parse rule file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Rule set contains no rules.
    #[error("rule set is empty")]
    Empty,

    /// A rule has an empty term.
    #[error("rule {index} has an empty term")]
    EmptyTerm { index: usize },

    /// A rule has an empty abbreviation.
    #[error("rule {index} ('{term}') has an empty abbreviation")]
    EmptyAbbreviation { index: usize, term: String },

    /// Two rules share the same term (compared case-insensitively).
    #[error("duplicate term '{term}' (rules {first} and {second})")]
    DuplicateTerm {
        term: String,
        first: usize,
        second: usize,
    },
}

impl RuleSetError {
    /// Wraps an I/O failure for the given rule file.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for rule set operations.
pub type Result<T> = std::result::Result<T, RuleSetError>;
