// --- File: crates/unenroll_apollo/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use unenroll_config::AppConfig;
use uuid::Uuid;

use crate::error::ApolloError;
use crate::logic::{
    remove_contact_from_sequence, validate_request, ApolloClient, RemoveContactRequest,
    RemoveContactResponse,
};

// --- State for Apollo Handlers ---
#[derive(Clone)]
pub struct ApolloState {
    pub config: Arc<AppConfig>,
    pub client: ApolloClient,
}

/// Removes a contact from an Apollo sequence, or marks it finished.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/remove-contact",
    request_body = RemoveContactRequest,
    responses(
        (
            status = 200,
            description = "Contact removed or marked as finished",
            body = RemoveContactResponse
        ),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "No Apollo contact matches the email"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Apollo call failed or internal error")
    ),
    tag = "Apollo"
))]
#[axum::debug_handler]
pub async fn remove_contact_handler(
    State(state): State<Arc<ApolloState>>,
    payload: Result<Json<RemoveContactRequest>, JsonRejection>,
) -> Result<Json<RemoveContactResponse>, ApolloError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("remove_contact", %request_id);
    process_remove_contact(&state, payload).instrument(span).await
}

async fn process_remove_contact(
    state: &ApolloState,
    payload: Result<Json<RemoveContactRequest>, JsonRejection>,
) -> Result<Json<RemoveContactResponse>, ApolloError> {
    let Json(payload) =
        payload.map_err(|rejection| ApolloError::Validation(rejection.body_text()))?;
    let validated = validate_request(&payload, &state.config.apollo)?;
    info!(
        "Processing {} for {} in campaign {}",
        validated.mode, validated.email, validated.campaign_id
    );

    let response = remove_contact_from_sequence(&state.client, &validated).await?;
    Ok(Json(response))
}
