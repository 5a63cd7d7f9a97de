use crate::error::{store_error, AppError};
use crate::formatter::{self, ListResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_types::{NewScientist, Scientist, UpdateScientist};
use database::{ScientistFilter, ScientistSort};
use query::ListParams;
use std::sync::Arc;

const ENTITY: &str = "Scientist";

/// # GET /scientists
/// One page of scientists; filterable by country, specialization,
/// organization, and degree (contains, case-insensitive).
#[utoipa::path(
    get,
    path = "/scientists",
    tag = "scientists",
    responses(
        (status = 200, description = "One page of scientists with pagination metadata"),
        (status = 400, description = "Invalid pagination, sort, or filter parameters"),
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ScientistFilter>,
) -> Result<Json<ListResponse<Scientist>>, AppError> {
    let list = params.parse::<ScientistSort>()?;
    let (rows, total) = state
        .repo
        .list_scientists(&list, &filter)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::paginated(rows, list.page, list.limit, total)))
}

/// # GET /scientists/:id
#[utoipa::path(
    get,
    path = "/scientists/{id}",
    tag = "scientists",
    responses(
        (status = 200, description = "The scientist", body = Scientist),
        (status = 404, description = "Scientist not found"),
    )
)]
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Scientist>, AppError> {
    let scientist = state
        .repo
        .find_scientist(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(scientist))
}

/// # POST /scientists
#[utoipa::path(
    post,
    path = "/scientists",
    tag = "scientists",
    request_body = NewScientist,
    responses(
        (status = 201, description = "The created scientist", body = Scientist),
        (status = 400, description = "Validation error"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewScientist>,
) -> Result<(StatusCode, Json<Scientist>), AppError> {
    payload.validate()?;
    let scientist = state
        .repo
        .create_scientist(&payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok((StatusCode::CREATED, Json(scientist)))
}

/// # PUT /scientists/:id
/// Partial update; absent fields keep their stored values.
#[utoipa::path(
    put,
    path = "/scientists/{id}",
    tag = "scientists",
    request_body = UpdateScientist,
    responses(
        (status = 200, description = "The updated scientist", body = Scientist),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Scientist not found"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateScientist>,
) -> Result<Json<Scientist>, AppError> {
    payload.validate()?;
    let scientist = state
        .repo
        .update_scientist(id, &payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(scientist))
}

/// # DELETE /scientists/:id
/// Fails with 400 while participations still reference the scientist.
#[utoipa::path(
    delete,
    path = "/scientists/{id}",
    tag = "scientists",
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Still referenced by participations"),
        (status = 404, description = "Scientist not found"),
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .repo
        .delete_scientist(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::deleted(ENTITY)))
}
