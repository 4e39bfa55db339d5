// --- File: crates/unenroll_apollo/src/logic.rs ---
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, error, info, warn};
use unenroll_common::{create_client, BoxFuture, SequenceMode, SequenceService};
use unenroll_config::ApolloConfig;

use crate::error::ApolloError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

const API_KEY_HEADER: &str = "x-api-key";

// --- Data Structures ---

/// Body of `POST /api/remove-contact`. Every field is optional on the wire;
/// `apiKey` and `campaignId` fall back to the server configuration.
#[derive(Deserialize, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RemoveContactRequest {
    #[cfg_attr(feature = "openapi", schema(example = "your-apollo-api-key"))]
    pub api_key: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "68d1103b41c0f700155cd927"))]
    pub campaign_id: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: Option<String>,
    /// `remove` (default) or `mark-finished`.
    #[cfg_attr(feature = "openapi", schema(example = "remove"))]
    pub mode: Option<String>,
}

impl fmt::Debug for RemoveContactRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveContactRequest")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("campaign_id", &self.campaign_id)
            .field("email", &self.email)
            .field("mode", &self.mode)
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RemoveContactResponse {
    pub success: bool,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "Contact successfully removed from sequence")
    )]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    /// Apollo's acknowledgement, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// A request whose required fields are all present, trimmed and checked.
#[derive(Clone, PartialEq)]
pub struct ValidatedRequest {
    pub api_key: String,
    pub email: String,
    pub campaign_id: String,
    pub mode: SequenceMode,
}

impl fmt::Debug for ValidatedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRequest")
            .field("api_key", &"<redacted>")
            .field("email", &self.email)
            .field("campaign_id", &self.campaign_id)
            .field("mode", &self.mode)
            .finish()
    }
}

#[derive(Deserialize, Debug)]
struct ContactSearchResponse {
    #[serde(default)]
    contacts: Option<Vec<ContactSummary>>,
}

#[derive(Deserialize, Debug)]
struct ContactSummary {
    #[serde(default)]
    id: Option<String>,
}

// --- Validation ---

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Structural check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot with at least one character on either side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Applies the configured fallbacks and checks the request.
///
/// Checks run in a fixed order: API key, email, campaign id, email format, mode.
/// The first failure wins.
pub fn validate_request(
    request: &RemoveContactRequest,
    apollo: &ApolloConfig,
) -> Result<ValidatedRequest, ApolloError> {
    let api_key = non_blank(request.api_key.as_deref())
        .or_else(|| apollo.fallback_api_key())
        .ok_or_else(|| ApolloError::Validation("Apollo API key is required".to_string()))?;

    let email = non_blank(request.email.as_deref())
        .ok_or_else(|| ApolloError::Validation("Email is required".to_string()))?;

    let campaign_id = non_blank(request.campaign_id.as_deref())
        .or_else(|| apollo.fallback_campaign_id())
        .ok_or_else(|| ApolloError::Validation("Campaign ID is required".to_string()))?;

    if !is_valid_email(email) {
        return Err(ApolloError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let mode = SequenceMode::from_request(request.mode.as_deref())?;

    Ok(ValidatedRequest {
        api_key: api_key.to_string(),
        email: email.to_string(),
        campaign_id: campaign_id.to_string(),
        mode,
    })
}

// --- Apollo Client ---

/// Thin client for the two Apollo endpoints this service needs.
#[derive(Clone, Debug)]
pub struct ApolloClient {
    client: Client,
    base_url: String,
}

impl ApolloClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Builds a client with its own connection pool from the Apollo settings.
    pub fn from_config(apollo: &ApolloConfig) -> Result<Self, ApolloError> {
        let client = create_client(apollo.timeout_secs)
            .map_err(|e| ApolloError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(client, apollo.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the id of the first contact matching `email`, or `None` when
    /// Apollo has no match or the first match carries no id.
    pub async fn search_contact_by_email(
        &self,
        api_key: &str,
        email: &str,
    ) -> Result<Option<String>, ApolloError> {
        let url = format!("{}/contacts/search", self.base_url);
        debug!("Searching Apollo contacts for {}", email);

        let response = self
            .client
            .get(&url)
            .query(&[("q_keywords", email)])
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApolloError::lookup_transport)?;

        let (status, body) = read_body(response)
            .await
            .map_err(ApolloError::lookup_transport)?;

        if !status.is_success() {
            return Err(ApolloError::LookupFailure {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        let parsed: ContactSearchResponse =
            serde_json::from_str(&body).map_err(|e| ApolloError::LookupFailure {
                status: Some(status.as_u16()),
                detail: format!("Undecodable search response ({}): {}", e, body),
            })?;

        Ok(parsed
            .contacts
            .and_then(|contacts| contacts.into_iter().next())
            .and_then(|contact| contact.id)
            .filter(|id| !id.trim().is_empty()))
    }

    /// Removes the contact from the campaign, or marks it finished, depending
    /// on `mode`. Both modes use the same endpoint.
    pub async fn update_sequence_membership(
        &self,
        api_key: &str,
        contact_id: &str,
        campaign_id: &str,
        mode: SequenceMode,
    ) -> Result<Value, ApolloError> {
        let url = format!(
            "{}/emailer_campaigns/remove_or_stop_contact_ids",
            self.base_url
        );
        debug!(
            "Updating Apollo sequence {} for contact {} (mode: {})",
            campaign_id,
            contact_id,
            mode.as_apollo_param()
        );

        let response = self
            .client
            .post(&url)
            .query(&[
                ("emailer_campaign_ids[]", campaign_id),
                ("contact_ids[]", contact_id),
                ("mode", mode.as_apollo_param()),
            ])
            .header(API_KEY_HEADER, api_key)
            .json(&json!({}))
            .send()
            .await
            .map_err(ApolloError::update_transport)?;

        let (status, body) = read_body(response)
            .await
            .map_err(ApolloError::update_transport)?;

        if !status.is_success() {
            return Err(ApolloError::UpdateFailure {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApolloError::UpdateFailure {
            status: Some(status.as_u16()),
            detail: format!("Undecodable update response ({}): {}", e, body),
        })
    }
}

async fn read_body(response: Response) -> Result<(StatusCode, String), reqwest::Error> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

impl SequenceService for ApolloClient {
    type Error = ApolloError;

    fn find_contact_id(
        &self,
        api_key: &str,
        email: &str,
    ) -> BoxFuture<'_, Option<String>, Self::Error> {
        let api_key = api_key.to_string();
        let email = email.to_string();
        Box::pin(async move { self.search_contact_by_email(&api_key, &email).await })
    }

    fn update_membership(
        &self,
        api_key: &str,
        contact_id: &str,
        campaign_id: &str,
        mode: SequenceMode,
    ) -> BoxFuture<'_, Value, Self::Error> {
        let api_key = api_key.to_string();
        let contact_id = contact_id.to_string();
        let campaign_id = campaign_id.to_string();
        Box::pin(async move {
            self.update_sequence_membership(&api_key, &contact_id, &campaign_id, mode)
                .await
        })
    }
}

// --- Core Logic Function ---

/// Resolves the contact and updates its sequence membership.
///
/// The update is only issued once the search has produced a contact id.
pub async fn remove_contact_from_sequence<S>(
    service: &S,
    request: &ValidatedRequest,
) -> Result<RemoveContactResponse, ApolloError>
where
    S: SequenceService<Error = ApolloError>,
{
    let contact_id = match service
        .find_contact_id(&request.api_key, &request.email)
        .await
    {
        Ok(Some(id)) => id,
        Ok(None) => {
            warn!("No Apollo contact found for {}", request.email);
            return Err(ApolloError::ContactNotFound);
        }
        Err(e) => {
            error!("Apollo contact search failed: {}", e);
            return Err(e);
        }
    };
    info!("Found Apollo contact {} for {}", contact_id, request.email);

    let result = service
        .update_membership(
            &request.api_key,
            &contact_id,
            &request.campaign_id,
            request.mode,
        )
        .await
        .inspect_err(|e| error!("Apollo sequence update failed: {}", e))?;

    info!(
        "Contact {} {} sequence {}",
        contact_id,
        request.mode.action_description(),
        request.campaign_id
    );

    Ok(RemoveContactResponse {
        success: true,
        message: format!(
            "Contact successfully {} sequence",
            request.mode.action_description()
        ),
        contact_id: Some(contact_id),
        result: Some(result),
    })
}
