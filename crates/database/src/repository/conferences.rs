use crate::error::DbError;
use crate::repository::{push_list_tail, DbRepository};
use core_types::{Conference, NewConference, UpdateConference};
use query::{like_pattern, ListQuery, SortField, SortOrder};
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

/// Entity-specific filter parameters of the conferences list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceFilter {
    pub country: Option<String>,
    pub topic: Option<String>,
    pub name: Option<String>,
}

/// Allow-list of sortable conference fields. Conferences list newest-first
/// by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConferenceSort {
    Id,
    Date,
    Name,
    Country,
    Capacity,
}

impl SortField for ConferenceSort {
    const DEFAULT: Self = ConferenceSort::Date;
    const DEFAULT_ORDER: SortOrder = SortOrder::Desc;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(ConferenceSort::Id),
            "date" => Some(ConferenceSort::Date),
            "name" => Some(ConferenceSort::Name),
            "country" => Some(ConferenceSort::Country),
            "capacity" => Some(ConferenceSort::Capacity),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            ConferenceSort::Id => "id",
            ConferenceSort::Date => "date",
            ConferenceSort::Name => "name",
            ConferenceSort::Country => "country",
            ConferenceSort::Capacity => "capacity",
        }
    }
}

const COLUMNS: &str = "id, topic, name, country, location, date, capacity";

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ConferenceFilter) {
    builder.push(" WHERE 1=1");
    if let Some(country) = &filter.country {
        builder
            .push(" AND country ILIKE ")
            .push_bind(like_pattern(country));
    }
    if let Some(topic) = &filter.topic {
        builder
            .push(" AND topic ILIKE ")
            .push_bind(like_pattern(topic));
    }
    if let Some(name) = &filter.name {
        builder
            .push(" AND name ILIKE ")
            .push_bind(like_pattern(name));
    }
}

impl DbRepository {
    /// Fetches one page of conferences plus the total count matching the
    /// same filter predicate. The two queries run concurrently.
    pub async fn list_conferences(
        &self,
        list: &ListQuery<ConferenceSort>,
        filter: &ConferenceFilter,
    ) -> Result<(Vec<Conference>, i64), DbError> {
        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM conferences"));
        push_filters(&mut page_query, filter);
        push_list_tail(&mut page_query, list, "");

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM conferences");
        push_filters(&mut count_query, filter);

        let rows = page_query
            .build_query_as::<Conference>()
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

    pub async fn find_conference(&self, id: i32) -> Result<Conference, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM conferences WHERE id = $1");
        sqlx::query_as::<_, Conference>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    pub async fn create_conference(&self, new: &NewConference) -> Result<Conference, DbError> {
        let sql = format!(
            "INSERT INTO conferences (topic, name, country, location, date, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conference>(&sql)
            .bind(&new.topic)
            .bind(&new.name)
            .bind(&new.country)
            .bind(&new.location)
            .bind(new.date)
            .bind(new.capacity.unwrap_or(0))
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Partial update: absent fields keep their stored values (COALESCE).
    pub async fn update_conference(
        &self,
        id: i32,
        patch: &UpdateConference,
    ) -> Result<Conference, DbError> {
        let sql = format!(
            "UPDATE conferences SET \
             topic = COALESCE($2, topic), \
             name = COALESCE($3, name), \
             country = COALESCE($4, country), \
             location = COALESCE($5, location), \
             date = COALESCE($6, date), \
             capacity = COALESCE($7, capacity) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conference>(&sql)
            .bind(id)
            .bind(&patch.topic)
            .bind(&patch.name)
            .bind(&patch.country)
            .bind(&patch.location)
            .bind(patch.date)
            .bind(patch.capacity)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Deletes a conference. Fails with `NotFound` when absent and with
    /// `ForeignKeyViolation` while participations still reference the row.
    pub async fn delete_conference(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM conferences WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(DbError::from_query)?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
