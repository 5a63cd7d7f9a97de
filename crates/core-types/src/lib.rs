//! # Symposia Core Types
//!
//! The shared data structures of the conference management system: the three
//! persisted entities (Scientist, Conference, Participation), the trimmed
//! relation summaries exposed on joined endpoints, and the per-country
//! statistics shapes.
//!
//! These structs carry three derive families at once:
//! - `serde` with camelCase renames — the external JSON representation,
//! - `sqlx::FromRow` — direct mapping from the snake_case database columns,
//! - `utoipa::ToSchema` — inclusion in the generated OpenAPI document.

pub mod entities;
pub mod error;
pub mod payloads;
pub mod relations;
pub mod stats;

// Re-export the core types to provide a clean public API.
pub use entities::{Conference, Participation, Scientist};
pub use error::ValidationError;
pub use payloads::{
    BulkStatusUpdate, NewConference, NewParticipation, NewScientist, UpdateConference,
    UpdateParticipation, UpdateScientist,
};
pub use relations::{
    ConferenceSummary, MetadataSearchHit, ParticipationDetails, ScientistSummary,
};
pub use stats::CountryStats;
