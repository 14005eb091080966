// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

/// A single pre-release verification that did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("verification '{check}' failed: {reason}")]
pub struct VerificationFailure {
    pub check: String,
    pub reason: String,
}

impl VerificationFailure {
    pub fn new(check: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RelkitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task already registered: {0}")]
    DuplicateTask(String),

    #[error("Cycle detected in task graph: {0}")]
    DagCycle(String),

    #[error("Version record error: {0}")]
    VersionRecord(String),

    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    #[error("External command `{command}` failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of [`RelkitError`]s, as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wiring or configuration mistake; aborts configuration immediately.
    ConfigurationFault,
    /// A pre-release check failed; fatal to the gated build task only.
    VerificationFailure,
    /// An external command exited non-zero; never retried.
    ExternalCommandFailure,
    Io,
}

impl RelkitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelkitError::ConfigError(_)
            | RelkitError::TaskNotFound(_)
            | RelkitError::DuplicateTask(_)
            | RelkitError::DagCycle(_)
            | RelkitError::VersionRecord(_)
            | RelkitError::TomlError(_) => ErrorKind::ConfigurationFault,
            RelkitError::Verification(_) => ErrorKind::VerificationFailure,
            RelkitError::CommandFailed { .. } => ErrorKind::ExternalCommandFailure,
            RelkitError::IoError(_) | RelkitError::Other(_) => ErrorKind::Io,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RelkitError>;
