//! # Error Types
//!
//! Two layers of errors: [`ClientError`] for anything the work item service or
//! its transport reports, and [`BatchError`] for the workflow that drives a
//! batch. Transport errors never cross into the workflow unconverted.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Workflow result type
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors raised by a work item client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Work item not found: {id} - {message}")]
    WorkItemNotFound { id: i64, message: String },

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },
}

impl ClientError {
    /// Create an API error from an HTTP status and service message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid response error for a malformed service payload
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The message reported by the service, without the variant prefix.
    ///
    /// Failures are logged with the service's own wording where one exists.
    pub fn service_message(&self) -> String {
        match self {
            ClientError::ApiError { message, .. } => message.clone(),
            ClientError::AuthError(message) => message.clone(),
            ClientError::WorkItemNotFound { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A typed accessor over a work item did not find what it expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingFieldError {
    #[error("work item {item} has no field '{name}'")]
    Field { item: String, name: String },

    #[error("work item {item} field '{name}' is not a string")]
    NotAString { item: String, name: String },

    #[error("work item {item} has no '{name}' link")]
    Link { item: String, name: String },
}

/// Errors raised while resolving the parent or creating child tasks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error("No parent work item configured")]
    NoParentConfigured,

    #[error("Failed to resolve parent work item {parent_id}: {message}")]
    ContextResolution { parent_id: i64, message: String },

    #[error("Parent work item {parent_id} was returned without an id")]
    MissingIdentity { parent_id: i64 },

    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    #[error("Error creating Task '{title}': {message}")]
    TaskCreation { title: String, message: String },

    #[error("Invalid task '{title}': {reason}")]
    InvalidTask { title: String, reason: String },

    #[error("Invalid state transition from {from} on {event}")]
    StateTransition { from: String, event: String },
}

impl BatchError {
    /// Whether this error stops the whole batch rather than a single task
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BatchError::NoParentConfigured
                | BatchError::ContextResolution { .. }
                | BatchError::MissingIdentity { .. }
                | BatchError::MissingField(_)
        )
    }
}
