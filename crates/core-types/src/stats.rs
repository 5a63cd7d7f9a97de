use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Aggregated conference statistics for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    pub country: String,
    /// Number of conferences held in this country.
    pub total_conferences: i64,
    /// Participations across all of this country's conferences.
    pub total_participations: i64,
    /// Average conference capacity, rounded to the nearest integer.
    /// 0 when no conference in the group has a capacity.
    pub average_capacity: i64,
    /// Conference count per topic within this country. BTreeMap keeps the
    /// serialized order deterministic.
    pub topics: BTreeMap<String, i64>,
}
