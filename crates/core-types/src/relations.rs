use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use utoipa::ToSchema;

/// The fixed subset of scientist fields exposed when a scientist is nested
/// inside another record. Never the full row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScientistSummary {
    pub id: i32,
    pub full_name: String,
    pub country: String,
    pub organization: String,
}

/// The fixed subset of conference fields exposed when a conference is nested
/// inside another record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSummary {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

/// A participation together with trimmed summaries of its related scientist
/// and conference, as returned by the with-details listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationDetails {
    pub id: i32,
    pub talk_title: String,
    pub participation_type: String,
    pub duration_minutes: i32,
    pub status: String,
    pub metadata: Option<JsonValue>,
    pub scientist: ScientistSummary,
    pub conference: ConferenceSummary,
}

/// One match from the metadata regex search: the participation plus the
/// names of its owners, flattened. Mapped straight off the joined query
/// row, hence the `FromRow` derive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSearchHit {
    pub id: i32,
    pub talk_title: String,
    pub participation_type: String,
    pub status: String,
    pub metadata: Option<JsonValue>,
    pub scientist_name: String,
    pub conference_name: String,
}
