use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("shift assignment has no drivers")]
    EmptyAssignment,

    #[error("{what} length {got} does not match {expected_what} {expected}")]
    LengthMismatch {
        expected:      usize,
        got:           usize,
        what:          &'static str,
        expected_what: &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
