use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the drill engines and the host facade.
///
/// "No content" and "fewer quiz options than requested" are not errors; they
/// are reported as `None` and `QuizOptions::is_partial` respectively.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{operation} requires {requirement}")]
    PreconditionNotMet {
        operation: &'static str,
        requirement: &'static str,
    },

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("cannot pick an element from an empty sequence")]
    EmptyInput,
}

impl EngineError {
    pub(crate) fn precondition(operation: &'static str, requirement: &'static str) -> Self {
        Self::PreconditionNotMet {
            operation,
            requirement,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
