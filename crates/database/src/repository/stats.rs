use crate::error::DbError;
use crate::repository::DbRepository;
use core_types::CountryStats;
use sqlx::FromRow;
use std::collections::BTreeMap;

#[derive(Debug, FromRow)]
struct CountryGroupRow {
    country: String,
    total_conferences: i64,
    average_capacity: Option<f64>,
}

#[derive(Debug, FromRow)]
struct TopicGroupRow {
    country: String,
    topic: String,
    conferences: i64,
    participations: i64,
}

impl DbRepository {
    /// Per-country conference statistics: conference count, participation
    /// total, average capacity (rounded, missing average reported as 0) and
    /// the topic distribution.
    ///
    /// Two fixed queries regardless of how many countries exist: a
    /// group-by on country and a single grouped join over (country, topic)
    /// carrying the participation counts, folded in memory.
    pub async fn conference_stats_by_country(&self) -> Result<Vec<CountryStats>, DbError> {
        let countries = sqlx::query_as::<_, CountryGroupRow>(
            "SELECT country, COUNT(*) AS total_conferences, \
             AVG(capacity)::float8 AS average_capacity \
             FROM conferences GROUP BY country ORDER BY country ASC",
        )
        .fetch_all(self.pool());

        let topics = sqlx::query_as::<_, TopicGroupRow>(
            "SELECT c.country, c.topic, \
             COUNT(DISTINCT c.id) AS conferences, COUNT(p.id) AS participations \
             FROM conferences AS c \
             LEFT JOIN participations AS p ON p.conference_id = c.id \
             GROUP BY c.country, c.topic",
        )
        .fetch_all(self.pool());

        let (countries, topics) = tokio::join!(countries, topics);
        let countries = countries.map_err(DbError::from_query)?;
        let topics = topics.map_err(DbError::from_query)?;

        let mut by_country: BTreeMap<String, CountryStats> = countries
            .into_iter()
            .map(|row| {
                let stats = CountryStats {
                    country: row.country.clone(),
                    total_conferences: row.total_conferences,
                    total_participations: 0,
                    average_capacity: row
                        .average_capacity
                        .map(|avg| avg.round() as i64)
                        .unwrap_or(0),
                    topics: BTreeMap::new(),
                };
                (row.country, stats)
            })
            .collect();

        for row in topics {
            if let Some(stats) = by_country.get_mut(&row.country) {
                stats.topics.insert(row.topic, row.conferences);
                stats.total_participations += row.participations;
            }
        }

        Ok(by_country.into_values().collect())
    }
}
