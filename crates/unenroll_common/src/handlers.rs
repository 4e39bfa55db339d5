// --- File: crates/unenroll_common/src/handlers.rs ---
use axum::{extract::State, Json};
use std::sync::Arc;
use unenroll_config::AppConfig;

use crate::models::HealthResponse;

pub const HEALTH_MESSAGE: &str = "Apollo Auto Remove API is running";
pub const HEALTH_NOTE: &str = "API key and Campaign ID can now be provided via the frontend form";

#[derive(Clone)]
pub struct CommonState {
    pub config: Arc<AppConfig>,
}

/// Liveness probe. Reports whether server-side fallbacks are configured
/// without revealing the API key.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
))]
#[axum::debug_handler]
pub async fn health_handler(State(state): State<Arc<CommonState>>) -> Json<HealthResponse> {
    let apollo = &state.config.apollo;
    Json(HealthResponse {
        status: "OK".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        has_api_key: apollo.fallback_api_key().is_some(),
        campaign_id: apollo.fallback_campaign_id().map(str::to_string),
        note: HEALTH_NOTE.to_string(),
    })
}
