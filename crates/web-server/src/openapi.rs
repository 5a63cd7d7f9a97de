use crate::handlers;
use axum::Json;
use core_types::{
    BulkStatusUpdate, Conference, ConferenceSummary, CountryStats, MetadataSearchHit,
    NewConference, NewParticipation, NewScientist, Participation, ParticipationDetails,
    Scientist, ScientistSummary, UpdateConference, UpdateParticipation, UpdateScientist,
};
use utoipa::OpenApi;

/// The generated OpenAPI description of the CRUD surface. Paths are
/// relative to the configured base path (default `/api/v1`).
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Symposia API",
        description = "CRUD API for scientific conferences, scientists, and their participations."
    ),
    paths(
        handlers::scientists::list,
        handlers::scientists::get_one,
        handlers::scientists::create,
        handlers::scientists::update,
        handlers::scientists::delete,
        handlers::conferences::list,
        handlers::conferences::stats,
        handlers::conferences::get_one,
        handlers::conferences::create,
        handlers::conferences::update,
        handlers::conferences::delete,
        handlers::participations::list,
        handlers::participations::search,
        handlers::participations::with_details,
        handlers::participations::bulk_update_status,
        handlers::participations::get_one,
        handlers::participations::create,
        handlers::participations::update,
        handlers::participations::delete,
    ),
    components(schemas(
        Scientist,
        Conference,
        Participation,
        ScientistSummary,
        ConferenceSummary,
        ParticipationDetails,
        MetadataSearchHit,
        CountryStats,
        NewScientist,
        UpdateScientist,
        NewConference,
        UpdateConference,
        NewParticipation,
        UpdateParticipation,
        BulkStatusUpdate,
    )),
    tags(
        (name = "scientists", description = "Scientist CRUD"),
        (name = "conferences", description = "Conference CRUD and statistics"),
        (name = "participations", description = "Participation CRUD, search, and bulk operations"),
    )
)]
pub struct ApiDoc;

/// # GET /openapi.json
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
