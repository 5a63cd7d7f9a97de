//! # Symposia Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL store holding scientists, conferences, and participations.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** encapsulates all SQL. The rest of the application talks to
//!   `DbRepository` and never sees a query string.
//! - **Tagged errors:** `DbError` distinguishes true absence (`NotFound`)
//!   from constraint conflicts and other query failures, so the web layer
//!   can map each to the right status code instead of a catch-all 404.
//! - **Asynchronous & Pooled:** all operations run against a shared
//!   `PgPool`; list endpoints issue their page and count queries
//!   concurrently.
//!
//! ## Public API
//!
//! - `connect`: establishes the database connection pool from `DATABASE_URL`.
//! - `run_migrations`: applies the embedded schema migrations at startup.
//! - `DbRepository`: the data-access methods for the three entities plus the
//!   statistics and metadata-search read paths.
//! - `DbError`: the error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::conferences::{ConferenceFilter, ConferenceSort};
pub use repository::participations::{
    ParticipationDetailRow, ParticipationFilter, ParticipationSort,
};
pub use repository::scientists::{ScientistFilter, ScientistSort};
pub use repository::DbRepository;
