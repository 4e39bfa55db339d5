// --- File: crates/unenroll_apollo/src/error.rs ---
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use unenroll_common::{
    external_service_error, not_found, HttpStatusCode, InvalidModeError, UnenrollError,
};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search for contact";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to remove contact from sequence";
pub const CONTACT_NOT_FOUND_MESSAGE: &str = "Contact not found in Apollo";

/// Apollo-specific error types.
#[derive(Error, Debug)]
pub enum ApolloError {
    /// A required field is missing or malformed. The message is shown to the caller.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),

    /// The contact search call failed or returned something unusable.
    #[error("Apollo contact search failed (status: {status:?}): {detail}")]
    LookupFailure {
        status: Option<u16>,
        detail: String,
    },

    /// The search succeeded but matched no contact.
    #[error("Contact not found in Apollo")]
    ContactNotFound,

    /// The sequence update call failed or returned something unusable.
    #[error("Apollo sequence update failed (status: {status:?}): {detail}")]
    UpdateFailure {
        status: Option<u16>,
        detail: String,
    },

    #[error("Internal processing error: {0}")]
    Internal(String),
}

impl ApolloError {
    pub(crate) fn lookup_transport(err: reqwest::Error) -> Self {
        ApolloError::LookupFailure {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }

    pub(crate) fn update_transport(err: reqwest::Error) -> Self {
        ApolloError::UpdateFailure {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}

/// Convert ApolloError to UnenrollError
impl From<ApolloError> for UnenrollError {
    fn from(err: ApolloError) -> Self {
        match err {
            ApolloError::Validation(msg) => UnenrollError::ValidationError(msg),
            ApolloError::InvalidMode(e) => UnenrollError::ValidationError(e.to_string()),
            e @ ApolloError::LookupFailure { .. } => {
                external_service_error("Apollo", SEARCH_FAILED_MESSAGE, e)
            }
            ApolloError::ContactNotFound => not_found(CONTACT_NOT_FOUND_MESSAGE),
            e @ ApolloError::UpdateFailure { .. } => {
                external_service_error("Apollo", UPDATE_FAILED_MESSAGE, e)
            }
            ApolloError::Internal(msg) => UnenrollError::InternalError(msg),
        }
    }
}

impl HttpStatusCode for ApolloError {
    fn status_code(&self) -> u16 {
        match self {
            ApolloError::Validation(_) | ApolloError::InvalidMode(_) => 400,
            ApolloError::ContactNotFound => 404,
            ApolloError::LookupFailure { .. }
            | ApolloError::UpdateFailure { .. }
            | ApolloError::Internal(_) => 500,
        }
    }
}

impl IntoResponse for ApolloError {
    fn into_response(self) -> Response {
        UnenrollError::from(self).into_response()
    }
}
