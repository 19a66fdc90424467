//! Core error type.
//!
//! Every error here is a construction-time invariant violation.  Nothing in
//! the simulation loop itself returns `CoreError`; malformed inputs are
//! rejected before a run starts.

use thiserror::Error;

use crate::TimeOfDay;

/// The base error type for `sg-core` and the domain types built on it.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid clock time {hour:02}:{minute:02}")]
    InvalidTime { hour: u16, minute: u16 },

    #[error("shift window ends ({end}) before it starts ({start})")]
    InvalidWindow { start: TimeOfDay, end: TimeOfDay },

    #[error("weekly template must have 7 entries, got {0}")]
    TemplateLength(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
