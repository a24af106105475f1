//! Folder lifecycle endpoints.

use crate::auth::authorize;
use crate::error::ApiResult;
use crate::handlers::common::{attachment_response, parse_folder_id};
use crate::state::AppState;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::header::{AUTHORIZATION, LOCATION, USER_AGENT};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use satchel_core::FolderMeta;
use satchel_store::FileEntry;
use serde::Serialize;
use std::net::SocketAddr;
use time::OffsetDateTime;

/// Folder listing response.
#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub folder: String,
    pub created: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "user-agent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub settings: FolderSettings,
    pub files: Vec<FileEntry>,
}

/// Deployment settings echoed to clients.
#[derive(Debug, Serialize)]
pub struct FolderSettings {
    pub retention_days: i64,
}

fn header_str(req: &Request, name: axum::http::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn client_host(req: &Request) -> Option<String> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
}

/// POST /folder - Allocate a new drop folder behind the credential gate.
///
/// Expired folders are reaped opportunistically before allocation, so sweep
/// latency is paid by the creating client. Responds `303 See Other` pointing
/// at the new folder resource.
pub async fn create_folder(State(state): State<AppState>, req: Request) -> ApiResult<Response> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let masked = authorize(auth_header, &state.config.auth).await?;

    let stats = state.store.sweep().await?;
    if stats.purged > 0 || stats.failed > 0 {
        tracing::info!(
            purged = stats.purged,
            failed = stats.failed,
            "retention sweep before creation"
        );
    }

    let meta = FolderMeta {
        created: OffsetDateTime::now_utc().unix_timestamp(),
        host: client_host(&req),
        user_agent: header_str(&req, USER_AGENT),
        secret: Some(masked.as_str().to_string()),
        synthesized: false,
    };
    let (id, _) = state.store.create(&state.corpus, meta).await?;

    Ok((
        StatusCode::SEE_OTHER,
        [(LOCATION, format!("/folder/{id}"))],
    )
        .into_response())
}

/// GET /folder/{folder_id} - Folder metadata and file listing.
pub async fn get_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> ApiResult<Json<FolderResponse>> {
    let id = parse_folder_id(&folder_id)?;
    let (meta, files) = state.store.folder_info(&id).await?;

    Ok(Json(FolderResponse {
        folder: id.to_string(),
        created: meta.created,
        host: meta.host,
        user_agent: meta.user_agent,
        secret: meta.secret,
        settings: FolderSettings {
            retention_days: state.store.retention_days(),
        },
        files,
    }))
}

/// GET /folder/{folder_id}/download - Read-through archive download.
///
/// Builds or extends the folder's ZIP cache, then streams it back.
pub async fn download_archive(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_folder_id(&folder_id)?;
    let archive_path = state.store.archive(&id).await?;
    attachment_response(&archive_path, &format!("{id}.zip"), "application/zip").await
}

/// DELETE /folder/{folder_id} - Remove a folder and its derived artifacts.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    req: Request,
) -> ApiResult<Json<serde_json::Value>> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    authorize(auth_header, &state.config.auth).await?;

    let id = parse_folder_id(&folder_id)?;
    state.store.delete(&id).await?;
    Ok(Json(serde_json::json!({})))
}
