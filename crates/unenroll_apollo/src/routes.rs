// --- File: crates/unenroll_apollo/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;
use unenroll_common::method_not_allowed;
use unenroll_config::AppConfig;

use crate::error::ApolloError;
use crate::handlers::{remove_contact_handler, ApolloState};
use crate::logic::ApolloClient;

/// Creates a router containing all routes for the Apollo feature.
///
/// Builds the outbound client from `config.apollo` once; it is shared by every
/// request through [`ApolloState`].
pub fn routes(config: Arc<AppConfig>) -> Result<Router, ApolloError> {
    let client = ApolloClient::from_config(&config.apollo)?;
    Ok(routes_with_client(config, client))
}

/// Same as [`routes`] with a caller-supplied client.
pub fn routes_with_client(config: Arc<AppConfig>, client: ApolloClient) -> Router {
    let apollo_state = Arc::new(ApolloState { config, client });

    Router::new()
        .route(
            "/remove-contact",
            post(remove_contact_handler).fallback(method_not_allowed),
        )
        .with_state(apollo_state)
}
