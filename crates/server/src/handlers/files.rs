//! Single-file download endpoint.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{attachment_response, parse_folder_id};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Response;
use satchel_core::validate_filename;

/// GET /file/{folder_id}/{filename} - Stream one file as an attachment.
pub async fn fetch_file(
    State(state): State<AppState>,
    Path((folder_id, filename)): Path<(String, String)>,
) -> ApiResult<Response> {
    let id = parse_folder_id(&folder_id)?;
    validate_filename(&filename).map_err(|e| ApiError::Validation(e.to_string()))?;

    let path = state.store.file_path(&id, &filename).await?;
    attachment_response(&path, &filename, "application/octet-stream").await
}
