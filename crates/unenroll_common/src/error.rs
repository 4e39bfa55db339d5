// --- File: crates/unenroll_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Fallback client message for failures that carry nothing presentable.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// The base error type shared by all Unenroll crates.
///
/// Integration crates define their own error enums and convert into this one
/// with `From<SpecificError> for UnenrollError`.
#[derive(Error, Debug)]
pub enum UnenrollError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call.
    ///
    /// `message` is what the caller sees; `detail` stays server-side.
    #[error("External service error: {service_name} - {message} ({detail})")]
    ExternalServiceError {
        service_name: String,
        message: String,
        detail: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl UnenrollError {
    /// The message safe to put in a response body.
    ///
    /// Validation and not-found messages are returned in full. Upstream detail
    /// of external service failures is never included.
    pub fn client_message(&self) -> String {
        match self {
            UnenrollError::ValidationError(msg)
            | UnenrollError::NotFoundError(msg)
            | UnenrollError::InternalError(msg)
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            UnenrollError::ExternalServiceError { message, .. } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for UnenrollError {
    fn status_code(&self) -> u16 {
        match self {
            UnenrollError::ConfigError(_) => 500,
            UnenrollError::ValidationError(_) => 400,
            UnenrollError::ExternalServiceError { .. } => 500,
            UnenrollError::NotFoundError(_) => 404,
            UnenrollError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, UnenrollError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, UnenrollError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, UnenrollError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| UnenrollError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, UnenrollError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| UnenrollError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> UnenrollError {
    UnenrollError::ConfigError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> UnenrollError {
    UnenrollError::NotFoundError(message.to_string())
}

pub fn external_service_error<M: fmt::Display, D: fmt::Display>(
    service_name: &str,
    message: M,
    detail: D,
) -> UnenrollError {
    UnenrollError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
        detail: detail.to_string(),
    }
}
