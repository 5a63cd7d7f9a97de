use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ValidationError;
use database::DbError;
use query::QueryError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing client input. The message is client-facing.
    #[error("{0}")]
    Validation(String),

    /// The addressed row does not exist. Carries the entity name for the
    /// "<Entity> not found" body.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A foreign-key or uniqueness conflict. The store does not always
    /// disclose which constraint failed, so the body stays generic.
    #[error("Operation failed; check related records")]
    Constraint,

    /// Any other store failure. Only this variant maps to a 500.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.0)
    }
}

/// Maps a repository error into the response taxonomy for one entity:
/// absence becomes a 404 with the entity's name, constraint conflicts a
/// 400, anything else stays a tagged database error (500).
pub fn store_error(entity: &'static str) -> impl FnOnce(DbError) -> AppError {
    move |err| match err {
        DbError::NotFound => AppError::NotFound(entity),
        DbError::ForeignKeyViolation(_) | DbError::UniqueViolation(_) => AppError::Constraint,
        other => AppError::Database(other),
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            AppError::Constraint => (
                StatusCode::BAD_REQUEST,
                "Operation failed; check related records".to_string(),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
