use crate::error::{store_error, AppError};
use crate::formatter::{self, ListResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_types::{Conference, CountryStats, NewConference, UpdateConference};
use database::{ConferenceFilter, ConferenceSort};
use query::ListParams;
use std::sync::Arc;

const ENTITY: &str = "Conference";

/// # GET /conferences
/// One page of conferences; filterable by country, topic, and name
/// (contains, case-insensitive). Newest-first by default.
#[utoipa::path(
    get,
    path = "/conferences",
    tag = "conferences",
    responses(
        (status = 200, description = "One page of conferences with pagination metadata"),
        (status = 400, description = "Invalid pagination, sort, or filter parameters"),
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ConferenceFilter>,
) -> Result<Json<ListResponse<Conference>>, AppError> {
    let list = params.parse::<ConferenceSort>()?;
    let (rows, total) = state
        .repo
        .list_conferences(&list, &filter)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::paginated(rows, list.page, list.limit, total)))
}

/// # GET /conferences/stats
/// Per-country statistics: conference count, participation total, average
/// capacity, and the topic distribution.
#[utoipa::path(
    get,
    path = "/conferences/stats",
    tag = "conferences",
    responses(
        (status = 200, description = "Per-country conference statistics", body = [CountryStats]),
    )
)]
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CountryStats>>, AppError> {
    let stats = state
        .repo
        .conference_stats_by_country()
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(stats))
}

/// # GET /conferences/:id
#[utoipa::path(
    get,
    path = "/conferences/{id}",
    tag = "conferences",
    responses(
        (status = 200, description = "The conference", body = Conference),
        (status = 404, description = "Conference not found"),
    )
)]
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Conference>, AppError> {
    let conference = state
        .repo
        .find_conference(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(conference))
}

/// # POST /conferences
#[utoipa::path(
    post,
    path = "/conferences",
    tag = "conferences",
    request_body = NewConference,
    responses(
        (status = 201, description = "The created conference", body = Conference),
        (status = 400, description = "Validation error"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewConference>,
) -> Result<(StatusCode, Json<Conference>), AppError> {
    payload.validate()?;
    let conference = state
        .repo
        .create_conference(&payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok((StatusCode::CREATED, Json(conference)))
}

/// # PUT /conferences/:id
/// Partial update; absent fields keep their stored values.
#[utoipa::path(
    put,
    path = "/conferences/{id}",
    tag = "conferences",
    request_body = UpdateConference,
    responses(
        (status = 200, description = "The updated conference", body = Conference),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Conference not found"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateConference>,
) -> Result<Json<Conference>, AppError> {
    payload.validate()?;
    let conference = state
        .repo
        .update_conference(id, &payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(conference))
}

/// # DELETE /conferences/:id
/// Fails with 400 while participations still reference the conference.
#[utoipa::path(
    delete,
    path = "/conferences/{id}",
    tag = "conferences",
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Still referenced by participations"),
        (status = 404, description = "Conference not found"),
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .repo
        .delete_conference(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::deleted(ENTITY)))
}
