use crate::error::DbError;
use crate::repository::{push_list_tail, DbRepository};
use core_types::{NewScientist, Scientist, UpdateScientist};
use query::{like_pattern, ListQuery, SortField, SortOrder};
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

/// Entity-specific filter parameters of the scientists list endpoint.
/// Every field is a case-insensitive contains-filter; absent fields impose
/// no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientistFilter {
    pub country: Option<String>,
    pub specialization: Option<String>,
    pub organization: Option<String>,
    pub degree: Option<String>,
}

/// Allow-list of sortable scientist fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScientistSort {
    Id,
    FullName,
    Country,
    HIndex,
}

impl SortField for ScientistSort {
    const DEFAULT: Self = ScientistSort::Id;
    const DEFAULT_ORDER: SortOrder = SortOrder::Asc;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(ScientistSort::Id),
            "fullName" => Some(ScientistSort::FullName),
            "country" => Some(ScientistSort::Country),
            "hIndex" => Some(ScientistSort::HIndex),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            ScientistSort::Id => "id",
            ScientistSort::FullName => "full_name",
            ScientistSort::Country => "country",
            ScientistSort::HIndex => "h_index",
        }
    }
}

const COLUMNS: &str =
    "id, full_name, country, degree, specialization, organization, email, orcid, h_index";

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ScientistFilter) {
    builder.push(" WHERE 1=1");
    if let Some(country) = &filter.country {
        builder
            .push(" AND country ILIKE ")
            .push_bind(like_pattern(country));
    }
    if let Some(specialization) = &filter.specialization {
        builder
            .push(" AND specialization ILIKE ")
            .push_bind(like_pattern(specialization));
    }
    if let Some(organization) = &filter.organization {
        builder
            .push(" AND organization ILIKE ")
            .push_bind(like_pattern(organization));
    }
    if let Some(degree) = &filter.degree {
        builder
            .push(" AND degree ILIKE ")
            .push_bind(like_pattern(degree));
    }
}

impl DbRepository {
    /// Fetches one page of scientists plus the total count matching the
    /// same filter predicate. The two queries run concurrently.
    pub async fn list_scientists(
        &self,
        list: &ListQuery<ScientistSort>,
        filter: &ScientistFilter,
    ) -> Result<(Vec<Scientist>, i64), DbError> {
        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM scientists"));
        push_filters(&mut page_query, filter);
        push_list_tail(&mut page_query, list, "");

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM scientists");
        push_filters(&mut count_query, filter);

        let rows = page_query
            .build_query_as::<Scientist>()
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

    pub async fn find_scientist(&self, id: i32) -> Result<Scientist, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM scientists WHERE id = $1");
        sqlx::query_as::<_, Scientist>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    pub async fn create_scientist(&self, new: &NewScientist) -> Result<Scientist, DbError> {
        let sql = format!(
            "INSERT INTO scientists \
             (full_name, country, degree, specialization, organization, email, orcid, h_index) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scientist>(&sql)
            .bind(&new.full_name)
            .bind(&new.country)
            .bind(&new.degree)
            .bind(&new.specialization)
            .bind(&new.organization)
            .bind(&new.email)
            .bind(&new.orcid)
            .bind(new.h_index.unwrap_or(0))
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Partial update: absent fields keep their stored values (COALESCE).
    /// Fails with `NotFound` when the id does not exist.
    pub async fn update_scientist(
        &self,
        id: i32,
        patch: &UpdateScientist,
    ) -> Result<Scientist, DbError> {
        let sql = format!(
            "UPDATE scientists SET \
             full_name = COALESCE($2, full_name), \
             country = COALESCE($3, country), \
             degree = COALESCE($4, degree), \
             specialization = COALESCE($5, specialization), \
             organization = COALESCE($6, organization), \
             email = COALESCE($7, email), \
             orcid = COALESCE($8, orcid), \
             h_index = COALESCE($9, h_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scientist>(&sql)
            .bind(id)
            .bind(&patch.full_name)
            .bind(&patch.country)
            .bind(&patch.degree)
            .bind(&patch.specialization)
            .bind(&patch.organization)
            .bind(&patch.email)
            .bind(&patch.orcid)
            .bind(patch.h_index)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from_query)
    }

    /// Deletes a scientist. Fails with `NotFound` when absent and with
    /// `ForeignKeyViolation` while participations still reference the row.
    pub async fn delete_scientist(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM scientists WHERE id = $1")
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
