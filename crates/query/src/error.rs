use thiserror::Error;

/// Validation failures while shaping a list query. Every variant is a
/// client error; the web layer surfaces them as 400 responses with the
/// message below as the body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("page must be a positive integer (got \"{0}\")")]
    InvalidPage(String),

    #[error("limit must be a positive integer (got \"{0}\")")]
    InvalidLimit(String),

    #[error("unknown sortBy field \"{0}\"")]
    UnknownSortField(String),

    #[error("sortOrder must be \"asc\" or \"desc\" (got \"{0}\")")]
    InvalidSortOrder(String),
}
