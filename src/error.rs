//! Error types for host calls and the actions built on them
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// A host API promise rejected
    #[error("{call} failed: {message}")]
    Call { call: &'static str, message: String },
    /// A value could not be converted to or from its JS form
    #[error("failed to convert {what}: {message}")]
    Convert { what: &'static str, message: String },
}

impl HostError {
    pub fn call(call: &'static str, message: impl Into<String>) -> HostError {
        HostError::Call {
            call,
            message: message.into(),
        }
    }

    pub fn convert(what: &'static str, message: impl ToString) -> HostError {
        HostError::Convert {
            what,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("could not find {0}")]
    NotFound(String),
    #[error(transparent)]
    Host(#[from] HostError),
}
