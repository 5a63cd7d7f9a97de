use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A researcher who can participate in conferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scientist {
    /// Store-assigned identifier, immutable once created.
    pub id: i32,
    pub full_name: String,
    pub country: String,
    pub degree: String,
    pub specialization: String,
    pub organization: String,
    /// Contact address; optional.
    pub email: Option<String>,
    /// ORCID identifier, stored as free text.
    pub orcid: Option<String>,
    /// Non-negative citation index, defaults to 0.
    pub h_index: i32,
}

/// A scientific conference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub id: i32,
    pub topic: String,
    pub name: String,
    pub country: String,
    pub location: String,
    /// When the conference takes place, emitted as an ISO-8601 string.
    pub date: DateTime<Utc>,
    /// Maximum number of attendees, defaults to 0 (unspecified).
    pub capacity: i32,
}

/// A scientist's talk at a conference. Links the two other entities with
/// restrict-on-delete foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: i32,
    pub talk_title: String,
    pub participation_type: String,
    pub duration_minutes: i32,
    pub scientist_id: i32,
    pub conference_id: i32,
    /// Free-text workflow status, defaults to "confirmed".
    pub status: String,
    /// Opaque JSON document. Serialized as a structured value when present
    /// and as an explicit null otherwise.
    pub metadata: Option<JsonValue>,
}
