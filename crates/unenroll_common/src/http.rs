// --- File: crates/unenroll_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::{HttpStatusCode, UnenrollError};

pub mod client;

/// Extension trait for UnenrollError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for UnenrollError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Full detail goes to the log, the trimmed message to the caller.
        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        } else {
            warn!("Request rejected with {}: {}", status_code, self);
        }

        (status_code, failure_body(&self.client_message())).into_response()
    }
}

/// Implement IntoResponse for UnenrollError to make it easier to use in Axum handlers.
impl IntoResponse for UnenrollError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// `{"success": false, "message": ...}`, the body of every failed API call.
pub fn failure_body(message: &str) -> Json<serde_json::Value> {
    Json(json!({
        "success": false,
        "message": message,
    }))
}

/// 405 response in the same envelope as the other API failures.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, failure_body("Method not allowed")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::external_service_error;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = UnenrollError::ValidationError("Email is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "message": "Email is required"})
        );
    }

    #[tokio::test]
    async fn test_external_error_response_hides_detail() {
        let response = external_service_error(
            "Apollo",
            "Failed to remove contact from sequence",
            "HTTP 422: {\"error\":\"campaign archived\"}",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Failed to remove contact from sequence");
        assert!(!body.to_string().contains("archived"));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let response = method_not_allowed().await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["message"], "Method not allowed");
    }
}
