use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/datasets",
            get(handlers::list_datasets_handler)
                .post(handlers::upload_dataset_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/datasets/{name}", delete(handlers::delete_dataset_handler))
        .route("/datasets/{name}/analysis", get(handlers::get_analysis_handler))
        .route(
            "/datasets/{name}/media/{kind}/{filename}",
            get(handlers::serve_media_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
