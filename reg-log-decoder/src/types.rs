//! Core types for the register log decoder library
//!
//! Error types and the outcome/statistics types emitted while rewriting log
//! lines. The header data model itself lives in [`crate::header`].

use serde::Serialize;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur while loading headers or rewriting logs
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Header format error at line {line}: {message}")]
    HeaderFormatError { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// What happened to a single log line during rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line lacked an address or value literal and was passed through
    NoMatch,
    /// Both literals were found but no register has this address
    UnknownAddress(u64),
    /// The address was replaced by the named register
    Rewritten {
        /// Register macro name substituted for the address
        register: String,
        /// True if the value literal was also replaced
        value_decoded: bool,
    },
}

impl LineOutcome {
    /// True if the line contained both an address and a value literal
    pub fn is_candidate(&self) -> bool {
        !matches!(self, LineOutcome::NoMatch)
    }
}

/// Totals collected over one rewrite pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Every line seen, modified or not
    pub total_lines: usize,
    /// Lines containing both an address and a value literal
    pub candidate_lines: usize,
    /// Candidate lines whose address matched a register
    pub rewritten_lines: usize,
    /// Candidate lines whose address matched nothing
    pub unknown_addresses: usize,
}

impl RewriteStats {
    /// Account for one processed line
    pub fn record(&mut self, outcome: &LineOutcome) {
        self.total_lines += 1;
        if !outcome.is_candidate() {
            return;
        }
        self.candidate_lines += 1;
        match outcome {
            LineOutcome::NoMatch => {}
            LineOutcome::UnknownAddress(_) => self.unknown_addresses += 1,
            LineOutcome::Rewritten { .. } => self.rewritten_lines += 1,
        }
    }
}

impl fmt::Display for RewriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} with addr/val, {} rewritten, {} unknown addresses",
            self.total_lines, self.candidate_lines, self.rewritten_lines, self.unknown_addresses
        )
    }
}
