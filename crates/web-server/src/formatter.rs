//! Shapes raw store records into the external representation: list
//! envelopes with pagination metadata, and joined rows nested into their
//! trimmed relation summaries. Total functions; shaping never fails.

use core_types::{ConferenceSummary, ParticipationDetails, ScientistSummary};
use database::ParticipationDetailRow;
use query::{PageInfo, Pagination};
use serde::Serialize;
use utoipa::ToSchema;

/// The envelope of every list endpoint that reports totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// The envelope of the metadata search, which does not compute totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// Body of a successful DELETE.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of the bulk status update: only the affected-row count, with no
/// indication of which rows were skipped.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkUpdateResponse {
    pub updated: u64,
}

pub fn paginated<T>(data: Vec<T>, page: i64, limit: i64, total: i64) -> ListResponse<T> {
    ListResponse {
        data,
        pagination: Pagination::new(page, limit, total),
    }
}

pub fn search_page<T>(data: Vec<T>, page: i64, limit: i64) -> SearchResponse<T> {
    SearchResponse {
        data,
        pagination: PageInfo::new(page, limit),
    }
}

pub fn deleted(entity: &str) -> MessageResponse {
    MessageResponse {
        message: format!("{entity} deleted successfully"),
    }
}

/// Nests one flat join row into the external with-details shape. Only the
/// allow-listed subset of each related entity is exposed, never the full
/// row.
pub fn participation_details(row: ParticipationDetailRow) -> ParticipationDetails {
    ParticipationDetails {
        id: row.id,
        talk_title: row.talk_title,
        participation_type: row.participation_type,
        duration_minutes: row.duration_minutes,
        status: row.status,
        metadata: row.metadata,
        scientist: ScientistSummary {
            id: row.scientist_id,
            full_name: row.scientist_full_name,
            country: row.scientist_country,
            organization: row.scientist_organization,
        },
        conference: ConferenceSummary {
            id: row.conference_id,
            name: row.conference_name,
            country: row.conference_country,
            location: row.conference_location,
            date: row.conference_date,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn detail_row() -> ParticipationDetailRow {
        ParticipationDetailRow {
            id: 7,
            talk_title: "Regex over JSONB".to_string(),
            participation_type: "talk".to_string(),
            duration_minutes: 45,
            status: "confirmed".to_string(),
            metadata: Some(json!({ "track": "storage" })),
            scientist_id: 3,
            scientist_full_name: "Ada Lovelace".to_string(),
            scientist_country: "United Kingdom".to_string(),
            scientist_organization: "Analytical Engine Society".to_string(),
            conference_id: 5,
            conference_name: "PGConf".to_string(),
            conference_country: "Germany".to_string(),
            conference_location: "Berlin".to_string(),
            conference_date: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn details_expose_only_the_relation_allow_list() {
        let details = participation_details(detail_row());
        let value = serde_json::to_value(&details).unwrap();

        let scientist = value.get("scientist").unwrap();
        assert_eq!(scientist.get("id"), Some(&json!(3)));
        assert_eq!(scientist.get("fullName"), Some(&json!("Ada Lovelace")));
        // Fields outside the allow-list never appear on the summary.
        assert!(scientist.get("email").is_none());
        assert!(scientist.get("hIndex").is_none());

        let conference = value.get("conference").unwrap();
        assert_eq!(conference.get("id"), Some(&json!(5)));
        assert!(conference.get("capacity").is_none());
        assert!(conference.get("topic").is_none());
    }

    #[test]
    fn dates_serialize_as_iso_8601_strings() {
        let value = serde_json::to_value(participation_details(detail_row())).unwrap();
        let date = value["conference"]["date"].as_str().unwrap();
        assert!(date.starts_with("2026-03-14T09:00:00"));
    }

    #[test]
    fn absent_metadata_serializes_as_explicit_null() {
        let mut row = detail_row();
        row.metadata = None;
        let value = serde_json::to_value(participation_details(row)).unwrap();
        assert!(value.get("metadata").is_some(), "key must be present");
        assert!(value["metadata"].is_null());
    }

    #[test]
    fn present_metadata_stays_structured() {
        let value = serde_json::to_value(participation_details(detail_row())).unwrap();
        assert_eq!(value["metadata"]["track"], json!("storage"));
    }

    #[test]
    fn list_envelope_carries_computed_pages() {
        let envelope = paginated(vec![1, 2, 3], 2, 3, 7);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["pagination"]["pages"], json!(3));
        assert_eq!(value["pagination"]["total"], json!(7));
    }

    #[test]
    fn search_envelope_omits_totals() {
        let envelope = search_page(vec![1], 1, 10);
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value["pagination"].get("total").is_none());
        assert!(value["pagination"].get("pages").is_none());
    }
}
