use crate::error::{store_error, AppError};
use crate::formatter::{self, BulkUpdateResponse, ListResponse, MessageResponse, SearchResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use core_types::{
    BulkStatusUpdate, MetadataSearchHit, NewParticipation, Participation, ParticipationDetails,
    UpdateParticipation,
};
use database::{ParticipationFilter, ParticipationSort};
use query::ListParams;
use serde::Deserialize;
use std::sync::Arc;

const ENTITY: &str = "Participation";

/// # GET /participations
/// One page of participations; filterable by status and participationType
/// (contains) and by scientistId/conferenceId (exact).
#[utoipa::path(
    get,
    path = "/participations",
    tag = "participations",
    responses(
        (status = 200, description = "One page of participations with pagination metadata"),
        (status = 400, description = "Invalid pagination, sort, or filter parameters"),
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ParticipationFilter>,
) -> Result<Json<ListResponse<Participation>>, AppError> {
    let list = params.parse::<ParticipationSort>()?;
    let (rows, total) = state
        .repo
        .list_participations(&list, &filter)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::paginated(rows, list.page, list.limit, total)))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// # GET /participations/search?q=...
/// Case-insensitive regex search over the textual form of the metadata
/// document. Paginated, but no total is computed for this path.
#[utoipa::path(
    get,
    path = "/participations/search",
    tag = "participations",
    responses(
        (status = 200, description = "Matching participations with owner names"),
        (status = 400, description = "Missing q parameter or invalid pagination"),
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(search): Query<SearchParams>,
) -> Result<Json<SearchResponse<MetadataSearchHit>>, AppError> {
    let pattern = search
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("q is required".to_string()))?;
    // Only page/limit apply here; sort parameters are ignored.
    let page = params.parse_page()?;
    let hits = state
        .repo
        .search_participation_metadata(&pattern, page.limit, page.offset())
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::search_page(hits, page.page, page.limit)))
}

/// # GET /participations/with-details
/// Joined listing: each participation nests the allow-listed summary of its
/// scientist and conference.
#[utoipa::path(
    get,
    path = "/participations/with-details",
    tag = "participations",
    responses(
        (status = 200, description = "One page of participations with nested summaries"),
        (status = 400, description = "Invalid pagination or sort parameters"),
    )
)]
pub async fn with_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<ParticipationDetails>>, AppError> {
    let list = params.parse::<ParticipationSort>()?;
    let (rows, total) = state
        .repo
        .list_participations_with_details(&list)
        .await
        .map_err(store_error(ENTITY))?;
    let data = rows.into_iter().map(formatter::participation_details).collect();
    Ok(Json(formatter::paginated(data, list.page, list.limit, total)))
}

/// # PATCH /participations/bulk-update-status
/// Conditional bulk transition: every participation of the conference in
/// `oldStatus` moves to `newStatus`, optionally only where the conference
/// is dated before the cutoff. Reports only the affected-row count.
#[utoipa::path(
    patch,
    path = "/participations/bulk-update-status",
    tag = "participations",
    request_body = BulkStatusUpdate,
    responses(
        (status = 200, description = "Count of updated rows"),
        (status = 400, description = "Validation error"),
    )
)]
pub async fn bulk_update_status(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkStatusUpdate>,
) -> Result<Json<BulkUpdateResponse>, AppError> {
    payload.validate()?;
    let updated = state
        .repo
        .bulk_update_participation_status(&payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(BulkUpdateResponse { updated }))
}

/// # GET /participations/:id
#[utoipa::path(
    get,
    path = "/participations/{id}",
    tag = "participations",
    responses(
        (status = 200, description = "The participation", body = Participation),
        (status = 404, description = "Participation not found"),
    )
)]
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Participation>, AppError> {
    let participation = state
        .repo
        .find_participation(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(participation))
}

/// # POST /participations
/// Fails with 400 when `scientistId` or `conferenceId` does not reference
/// an existing row.
#[utoipa::path(
    post,
    path = "/participations",
    tag = "participations",
    request_body = NewParticipation,
    responses(
        (status = 201, description = "The created participation", body = Participation),
        (status = 400, description = "Validation error or unknown referenced row"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewParticipation>,
) -> Result<(StatusCode, Json<Participation>), AppError> {
    payload.validate()?;
    let participation = state
        .repo
        .create_participation(&payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok((StatusCode::CREATED, Json(participation)))
}

/// # PUT /participations/:id
/// Partial update; the two foreign keys are immutable after creation.
#[utoipa::path(
    put,
    path = "/participations/{id}",
    tag = "participations",
    request_body = UpdateParticipation,
    responses(
        (status = 200, description = "The updated participation", body = Participation),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Participation not found"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateParticipation>,
) -> Result<Json<Participation>, AppError> {
    payload.validate()?;
    let participation = state
        .repo
        .update_participation(id, &payload)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(participation))
}

/// # DELETE /participations/:id
#[utoipa::path(
    delete,
    path = "/participations/{id}",
    tag = "participations",
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Participation not found"),
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .repo
        .delete_participation(id)
        .await
        .map_err(store_error(ENTITY))?;
    Ok(Json(formatter::deleted(ENTITY)))
}
