// --- File: crates/unenroll_common/src/routes.rs ---
use axum::{routing::get, Router};
use std::sync::Arc;
use unenroll_config::AppConfig;

use crate::handlers::{health_handler, CommonState};
use crate::http::method_not_allowed;

/// Routes shared by every deployment. Mounted under `/api`.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(CommonState { config });

    Router::new()
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .with_state(state)
}
