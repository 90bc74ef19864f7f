use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostStratError {
    /// Inconsistent or malformed inputs, detected before anything is computed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A division that would silently produce NaN or infinity.
    #[error("Arithmetic indeterminate: {0}")]
    ArithmeticIndeterminate(String),
}

impl PostStratError {
    pub fn configuration(what: &str) -> PostStratError {
        PostStratError::Configuration(what.to_string())
    }

    pub fn indeterminate(what: &str) -> PostStratError {
        PostStratError::ArithmeticIndeterminate(what.to_string())
    }

    pub fn length_mismatch(what: &str, expected: usize, got: usize) -> PostStratError {
        PostStratError::Configuration(format!("length of {} is {}, expected {}", what, got, expected))
    }
}

pub type Result<T> = std::result::Result<T, PostStratError>;
