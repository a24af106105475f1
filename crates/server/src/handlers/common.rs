//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::Response;
use satchel_core::FolderId;
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Parse a caller-supplied folder identifier, mapping shape failures to a
/// validation error before any path is built from it.
pub fn parse_folder_id(value: &str) -> ApiResult<FolderId> {
    FolderId::parse(value).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Stream a file back as an attachment download.
///
/// The download name has already been validated (identifier or filename
/// shape), so it cannot break out of the quoted disposition value.
pub async fn attachment_response(
    path: &Path,
    download_name: &str,
    content_type: &str,
) -> ApiResult<Response> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to open {download_name}: {e}")))?;
    let len = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("failed to stat {download_name}: {e}")))?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));
    Response::builder()
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, len)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(format!("failed to build response: {e}")))
}
