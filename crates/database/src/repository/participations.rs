use crate::error::DbError;
use crate::repository::{push_list_tail, DbRepository};
use chrono::{DateTime, Utc};
use core_types::{
    BulkStatusUpdate, MetadataSearchHit, NewParticipation, Participation, UpdateParticipation,
};
use query::{like_pattern, ListQuery, SortField, SortOrder};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, Postgres, QueryBuilder};

/// Entity-specific filter parameters of the participations list endpoint:
/// contains-filters on the text fields, exact equality on the two foreign
/// keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationFilter {
    pub status: Option<String>,
    pub participation_type: Option<String>,
    pub scientist_id: Option<i32>,
    pub conference_id: Option<i32>,
}

/// Allow-list of sortable participation fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationSort {
    Id,
    TalkTitle,
    DurationMinutes,
    Status,
}

impl SortField for ParticipationSort {
    const DEFAULT: Self = ParticipationSort::Id;
    const DEFAULT_ORDER: SortOrder = SortOrder::Asc;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(ParticipationSort::Id),
            "talkTitle" => Some(ParticipationSort::TalkTitle),
            "durationMinutes" => Some(ParticipationSort::DurationMinutes),
            "status" => Some(ParticipationSort::Status),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            ParticipationSort::Id => "id",
            ParticipationSort::TalkTitle => "talk_title",
            ParticipationSort::DurationMinutes => "duration_minutes",
            ParticipationSort::Status => "status",
        }
    }
}

// Every participation query aliases the table as `p` so the same qualified
// filter clauses work for the plain list and the joined read paths.
const COLUMNS: &str = "p.id, p.talk_title, p.participation_type, p.duration_minutes, \
                       p.scientist_id, p.conference_id, p.status, p.metadata";

/// One row of the with-details join: the participation columns plus the
/// allow-listed subset of its scientist's and conference's columns, flat.
/// The web layer nests this into the external representation.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipationDetailRow {
    pub id: i32,
    pub talk_title: String,
    pub participation_type: String,
    pub duration_minutes: i32,
    pub status: String,
    pub metadata: Option<JsonValue>,
    pub scientist_id: i32,
    pub scientist_full_name: String,
    pub scientist_country: String,
    pub scientist_organization: String,
    pub conference_id: i32,
    pub conference_name: String,
    pub conference_country: String,
    pub conference_location: String,
    pub conference_date: DateTime<Utc>,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ParticipationFilter) {
    builder.push(" WHERE 1=1");
    if let Some(status) = &filter.status {
        builder
            .push(" AND p.status ILIKE ")
            .push_bind(like_pattern(status));
    }
    if let Some(participation_type) = &filter.participation_type {
        builder
            .push(" AND p.participation_type ILIKE ")
            .push_bind(like_pattern(participation_type));
    }
    if let Some(scientist_id) = filter.scientist_id {
        builder.push(" AND p.scientist_id = ").push_bind(scientist_id);
    }
    if let Some(conference_id) = filter.conference_id {
        builder
            .push(" AND p.conference_id = ")
            .push_bind(conference_id);
    }
}

impl DbRepository {
    /// Fetches one page of participations plus the total count matching the
    /// same filter predicate. The two queries run concurrently.
    pub async fn list_participations(
        &self,
        list: &ListQuery<ParticipationSort>,
        filter: &ParticipationFilter,
    ) -> Result<(Vec<Participation>, i64), DbError> {
        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM participations AS p"));
        push_filters(&mut page_query, filter);
        push_list_tail(&mut page_query, list, "p.");

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM participations AS p");
        push_filters(&mut count_query, filter);

        let rows = page_query
            .build_query_as::<Participation>()
            .fetch_all(self.pool());
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool());
        let (rows, total) = tokio::join!(rows, total);

        Ok((
            rows.map_err(DbError::from_query)?,
            total.map_err(DbError::from_query)?,
        ))
    }

    pub async fn find_participation(&self, id: i32) -> Result<Participation, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM participations AS p WHERE p.id = $1");
        sqlx::query_as::<_, Participation>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Creates a participation. The insert fails with `ForeignKeyViolation`
    /// when either referenced row does not exist; `status` defaults to
    /// "confirmed".
    pub async fn create_participation(
        &self,
        new: &NewParticipation,
    ) -> Result<Participation, DbError> {
        let sql = format!(
            "INSERT INTO participations AS p \
             (talk_title, participation_type, duration_minutes, scientist_id, conference_id, status, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participation>(&sql)
            .bind(&new.talk_title)
            .bind(&new.participation_type)
            .bind(new.duration_minutes)
            .bind(new.scientist_id)
            .bind(new.conference_id)
            .bind(new.status.as_deref().unwrap_or("confirmed"))
            .bind(&new.metadata)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Partial update: absent fields keep their stored values (COALESCE).
    /// The two foreign keys are immutable after creation.
    pub async fn update_participation(
        &self,
        id: i32,
        patch: &UpdateParticipation,
    ) -> Result<Participation, DbError> {
        let sql = format!(
            "UPDATE participations AS p SET \
             talk_title = COALESCE($2, talk_title), \
             participation_type = COALESCE($3, participation_type), \
             duration_minutes = COALESCE($4, duration_minutes), \
             status = COALESCE($5, status), \
             metadata = COALESCE($6, metadata) \
             WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participation>(&sql)
            .bind(id)
            .bind(&patch.talk_title)
            .bind(&patch.participation_type)
            .bind(patch.duration_minutes)
            .bind(&patch.status)
            .bind(&patch.metadata)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    pub async fn delete_participation(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM participations WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(DbError::from_query)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// The with-details listing: one page of participations joined with the
    /// allow-listed fields of their scientist and conference, plus the
    /// total count.
    pub async fn list_participations_with_details(
        &self,
        list: &ListQuery<ParticipationSort>,
    ) -> Result<(Vec<ParticipationDetailRow>, i64), DbError> {
        let mut page_query = QueryBuilder::<Postgres>::new(
            "SELECT p.id, p.talk_title, p.participation_type, p.duration_minutes, p.status, p.metadata, \
             s.id AS scientist_id, s.full_name AS scientist_full_name, \
             s.country AS scientist_country, s.organization AS scientist_organization, \
             c.id AS conference_id, c.name AS conference_name, c.country AS conference_country, \
             c.location AS conference_location, c.date AS conference_date \
             FROM participations AS p \
             JOIN scientists AS s ON s.id = p.scientist_id \
             JOIN conferences AS c ON c.id = p.conference_id",
        );
        push_list_tail(&mut page_query, list, "p.");

        let rows = page_query
            .build_query_as::<ParticipationDetailRow>()
            .fetch_all(self.pool());
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM participations")
            .fetch_one(self.pool());
        let (rows, total) = tokio::join!(rows, total);

        Ok((
            rows.map_err(DbError::from_query)?,
            total.map_err(DbError::from_query)?,
        ))
    }

    /// Case-insensitive regex search over the textual serialization of the
    /// metadata document, joined with the owning scientist and conference
    /// names. Backed by the trigram index; no total is computed for this
    /// path.
    pub async fn search_participation_metadata(
        &self,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MetadataSearchHit>, DbError> {
        sqlx::query_as::<_, MetadataSearchHit>(
            "SELECT p.id, p.talk_title, p.participation_type, p.status, p.metadata, \
             s.full_name AS scientist_name, c.name AS conference_name \
             FROM participations AS p \
             JOIN scientists AS s ON s.id = p.scientist_id \
             JOIN conferences AS c ON c.id = p.conference_id \
             WHERE p.metadata IS NOT NULL AND p.metadata::text ~* $1 \
             ORDER BY p.id ASC LIMIT $2 OFFSET $3",
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::from_query)
    }

    /// Conditional bulk status transition in a single statement: every
    /// participation of the conference currently in `oldStatus` moves to
    /// `newStatus`, optionally restricted to conferences dated strictly
    /// before the cutoff. Returns the number of rows updated.
    pub async fn bulk_update_participation_status(
        &self,
        update: &BulkStatusUpdate,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            "UPDATE participations AS p SET status = $3 \
             FROM conferences AS c \
             WHERE c.id = p.conference_id \
               AND p.conference_id = $1 \
               AND p.status = $2 \
               AND ($4::timestamptz IS NULL OR c.date < $4)",
        )
        .bind(update.conference_id)
        .bind(&update.old_status)
        .bind(&update.new_status)
        .bind(update.before_date)
        .execute(self.pool())
        .await
        .map_err(DbError::from_query)?;
        Ok(result.rows_affected())
    }
}
