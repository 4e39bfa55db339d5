// --- File: crates/unenroll_common/src/models.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// What happens to a contact's membership in an email sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Take the contact out of the sequence entirely.
    #[default]
    Remove,
    /// Keep the membership but stop further steps.
    MarkFinished,
}

impl SequenceMode {
    /// Value of the `mode` query parameter Apollo expects.
    pub fn as_apollo_param(&self) -> &'static str {
        match self {
            SequenceMode::Remove => "remove",
            SequenceMode::MarkFinished => "mark_as_finished",
        }
    }

    /// Phrase used in the success message, e.g. "removed from".
    pub fn action_description(&self) -> &'static str {
        match self {
            SequenceMode::Remove => "removed from",
            SequenceMode::MarkFinished => "marked as finished in",
        }
    }

    /// Parses an optional inbound mode. Absent or blank means [`SequenceMode::Remove`].
    pub fn from_request(raw: Option<&str>) -> Result<Self, InvalidModeError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(SequenceMode::Remove),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for SequenceMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove" => Ok(SequenceMode::Remove),
            "mark-finished" | "mark_as_finished" => Ok(SequenceMode::MarkFinished),
            other => Err(InvalidModeError(other.to_string())),
        }
    }
}

impl fmt::Display for SequenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceMode::Remove => write!(f, "remove"),
            SequenceMode::MarkFinished => write!(f, "mark-finished"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModeError(pub String);

impl fmt::Display for InvalidModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid mode '{}': expected 'remove' or 'mark-finished'",
            self.0
        )
    }
}

impl std::error::Error for InvalidModeError {}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// Whether a server-side fallback API key is configured. The key itself is never returned.
    pub has_api_key: bool,
    /// Omitted when no fallback campaign is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    pub note: String,
}
