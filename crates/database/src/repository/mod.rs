use query::{ListQuery, SortField};
use sqlx::postgres::PgPool;
use sqlx::{Postgres, QueryBuilder};

pub mod conferences;
pub mod participations;
pub mod scientists;
pub mod stats;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic;
/// one instance wraps the shared pool and is cloned into every handler.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Appends the ORDER BY / LIMIT / OFFSET tail of a validated list query.
///
/// The sort column comes from the entity's `SortField` allow-list, never
/// from raw request text; `prefix` qualifies it with a table alias for
/// joined queries (pass "" for unqualified).
pub(crate) fn push_list_tail<S: SortField>(
    builder: &mut QueryBuilder<'_, Postgres>,
    list: &ListQuery<S>,
    prefix: &str,
) {
    builder
        .push(" ORDER BY ")
        .push(prefix)
        .push(list.sort.column())
        .push(" ")
        .push(list.order.as_sql());
    builder.push(" LIMIT ").push_bind(list.limit);
    builder.push(" OFFSET ").push_bind(list.offset());
}
