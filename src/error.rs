use thiserror::Error;

/// Errors raised while validating a simulation request.
///
/// Nothing is simulated once one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    #[error("unknown team id: {0}")]
    UnknownTeam(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

impl SimError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        SimError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Error parsing a `"W-L-T"` record string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("expected \"W-L\" or \"W-L-T\", got {0:?}")]
    Format(String),

    #[error("invalid count {0:?} in record")]
    Count(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
