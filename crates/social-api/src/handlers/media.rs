//! Media handlers
//!
//! Upload target for issued upload URLs and the public download route.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use social_service::{MediaService, MediaUploadResponse};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Store the body under the issued storage id
///
/// PUT /api/v1/media/{storage_id}
pub async fn upload_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(storage_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<MediaUploadResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let service = MediaService::new(state.service_context());
    let response = service
        .upload(&auth.caller, &storage_id, content_type, body.to_vec())
        .await?;
    Ok(Json(response))
}

/// Serve stored media
///
/// GET /media/{storage_id}
pub async fn download_media(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let service = MediaService::new(state.service_context());
    let (content_type, bytes) = service.download(&storage_id).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
