//! Error types for action dispatch.

use thiserror::Error;

/// Message carried by the error raised when a record action handler does not
/// return a serialized record.
pub const RECORD_ACTION_CONTRACT_MESSAGE: &str =
    "handler of a recordAction should return a RecordJSON object";

/// Errors surfaced by the dispatcher to the HTTP boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Resource or action id does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// The action's accessibility predicate rejected the caller.
    ///
    /// Only names the action and resource; the caller's identity is never
    /// part of the error.
    #[error("you are not allowed to perform action '{action_name}' on resource '{resource_id}'")]
    Forbidden {
        action_name: String,
        resource_id: String,
    },

    /// A registered action violates its output contract. This is a
    /// programming error in the action, not a caller error.
    #[error("{message} (in {origin})")]
    Configuration { message: String, origin: String },

    /// Failure raised inside an action or dashboard handler.
    #[error(transparent)]
    Handler(anyhow::Error),

    /// Failure raised by a resource or the populator.
    #[error(transparent)]
    Storage(anyhow::Error),
}

impl DispatchError {
    pub fn resource_not_found(resource_id: &str) -> Self {
        Self::NotFound(format!("resource '{}' is not registered", resource_id))
    }

    pub fn action_not_found(resource_id: &str, action_name: &str) -> Self {
        Self::NotFound(format!(
            "action '{}' is not registered on resource '{}'",
            action_name, resource_id
        ))
    }

    pub fn record_not_found(resource_id: &str) -> Self {
        Self::NotFound(format!("record not found in resource '{}'", resource_id))
    }

    pub fn forbidden(action_name: &str, resource_id: &str) -> Self {
        Self::Forbidden {
            action_name: action_name.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            origin: origin.into(),
        }
    }

    /// Wrap a handler failure. A `DispatchError` raised by the handler itself
    /// is returned as-is so typed failures keep their kind.
    pub fn from_handler(err: anyhow::Error) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(typed) => typed,
            Err(err) => Self::Handler(err),
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::NotFound(_) => "not_found",
            DispatchError::Forbidden { .. } => "forbidden",
            DispatchError::Configuration { .. } => "configuration",
            DispatchError::Handler(_) => "handler",
            DispatchError::Storage(_) => "storage",
        }
    }
}
