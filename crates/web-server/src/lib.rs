use axum::http::HeaderValue;
use axum::{
    routing::{get, patch},
    Router,
};
use configuration::Settings;
use database::DbRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod formatter;
pub mod handlers;
pub mod openapi;

/// The shared application state that all handlers can access. Built once at
/// startup and injected through axum's `State` extractor; there is no
/// global store handle.
#[derive(Clone)]
pub struct AppState {
    pub repo: DbRepository,
    pub settings: Settings,
}

/// Builds the full application router for the given state: the three entity
/// routers nested under the configured base path, plus the health check and
/// the OpenAPI document.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/scientists",
            get(handlers::scientists::list).post(handlers::scientists::create),
        )
        .route(
            "/scientists/:id",
            get(handlers::scientists::get_one)
                .put(handlers::scientists::update)
                .delete(handlers::scientists::delete),
        )
        .route(
            "/conferences",
            get(handlers::conferences::list).post(handlers::conferences::create),
        )
        .route("/conferences/stats", get(handlers::conferences::stats))
        .route(
            "/conferences/:id",
            get(handlers::conferences::get_one)
                .put(handlers::conferences::update)
                .delete(handlers::conferences::delete),
        )
        .route(
            "/participations",
            get(handlers::participations::list).post(handlers::participations::create),
        )
        .route(
            "/participations/search",
            get(handlers::participations::search),
        )
        .route(
            "/participations/with-details",
            get(handlers::participations::with_details),
        )
        .route(
            "/participations/bulk-update-status",
            patch(handlers::participations::bulk_update_status),
        )
        .route(
            "/participations/:id",
            get(handlers::participations::get_one)
                .put(handlers::participations::update)
                .delete(handlers::participations::delete),
        )
        .route("/openapi.json", get(openapi::serve));

    let base_path = state.settings.base_path();
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest(&base_path, api)
        .with_state(state)
        .layer(cors)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origin = if settings.allow_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = settings
            .cors_origins()
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparseable CORS origin.");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// The main function to configure and run the web server: connects the
/// pool, applies migrations, and serves until the process is stopped.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let repo = DbRepository::new(db_pool);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let base_path = settings.base_path();
    let app = router(Arc::new(AppState { repo, settings }));

    tracing::info!(%addr, %base_path, "Web server listening.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
