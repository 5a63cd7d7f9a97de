use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested row does not exist.")]
    NotFound,

    #[error("A foreign-key constraint was violated: {0}")]
    ForeignKeyViolation(String),

    #[error("A uniqueness constraint was violated: {0}")]
    UniqueViolation(String),

    #[error("Database query failed: {0}")]
    QueryError(sqlx::Error),
}

impl DbError {
    /// Maps a query-time `sqlx::Error` onto the tagged taxonomy: row
    /// absence becomes `NotFound`, Postgres constraint codes become their
    /// named variants, everything else stays a query failure.
    pub fn from_query(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return DbError::NotFound;
        }
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                // foreign_key_violation
                Some("23503") => {
                    return DbError::ForeignKeyViolation(db_err.message().to_string());
                }
                // unique_violation
                Some("23505") => {
                    return DbError::UniqueViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        DbError::QueryError(err)
    }
}
