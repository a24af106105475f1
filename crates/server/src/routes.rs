//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/folder", post(handlers::create_folder))
        .route(
            "/folder/{folder_id}",
            get(handlers::get_folder).delete(handlers::delete_folder),
        )
        .route(
            "/folder/{folder_id}/download",
            get(handlers::download_archive),
        )
        .route("/file/{folder_id}/{filename}", get(handlers::fetch_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
