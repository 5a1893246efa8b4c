//! Request handlers for the HTTP surface.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};

use crate::storage::{format_mb, FileRepository};
use crate::web::dto::{
    download_url, DeleteResponse, FileEntryResponse, ListFilesResponse, UploadResponse,
};
use crate::web::error::ApiError;
use crate::DepotError;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File repository rooted at the configured storage directory.
    pub repository: FileRepository,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: FileRepository) -> Self {
        Self { repository }
    }
}

/// Generate a safe Content-Disposition header value for downloads.
///
/// Control characters are stripped and quotes replaced so a stored name can
/// never inject headers; non-ASCII names get an RFC 5987 `filename*`
/// parameter alongside the ASCII fallback.
fn content_disposition_header(filename: &str) -> String {
    if filename.is_ascii()
        && !filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\')
    {
        return format!("attachment; filename=\"{filename}\"");
    }

    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();
    let encoded = urlencoding::encode(filename);

    format!("attachment; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

/// POST /upload - store the multipart `file` field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("failed to read multipart field: {e}");
        ApiError::bad_request("Invalid multipart data")
    })? {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("failed to read file content: {e}");
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("File is required"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("File is required"))?;

    let (stored, free_space) = state.repository.upload(&filename, &content).map_err(|e| {
        match e {
            e @ (DepotError::InvalidName(_) | DepotError::InsufficientStorage { .. }) => {
                ApiError::from(e)
            }
            e => {
                tracing::error!("failed to save file: {e}");
                ApiError::internal("Failed to save file")
            }
        }
    })?;

    tracing::info!(filename = %stored.name, size = stored.size, "file uploaded");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        filename: stored.name.clone(),
        path: stored.path.display().to_string(),
        download_url: download_url(&stored.name),
        free_space: format!("{} MB", format_mb(free_space)),
        file_size: format!("{} MB", format_mb(stored.size)),
    }))
}

/// GET /files - list stored files with disk-space accounting.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let listing = state.repository.list().map_err(|e| {
        tracing::error!("failed to list storage root: {e}");
        ApiError::internal("Failed to read uploads directory")
    })?;

    let files: Vec<FileEntryResponse> = listing
        .files
        .iter()
        .map(|f| FileEntryResponse {
            name: f.name.clone(),
            size: format!("{} MB", format_mb(f.size)),
            created: f.modified_rfc3339(),
            download_url: download_url(&f.name),
        })
        .collect();

    Ok(Json(ListFilesResponse {
        file_count: files.len(),
        files,
        storage_used_mb: format_mb(listing.used_bytes),
        storage_total_mb: format_mb(listing.capacity.total_bytes),
        storage_free_mb: format_mb(listing.capacity.available_bytes),
    }))
}

/// GET /download/:filename - stream a stored file as a binary attachment.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let (name, content) = state.repository.load(&filename)?;

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&name),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("failed to build download response: {e}");
            ApiError::internal("Failed to build response")
        })
}

/// DELETE /delete/:filename - remove a stored file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let name = state.repository.delete(&filename).map_err(|e| match e {
        e @ (DepotError::InvalidName(_) | DepotError::NotFound(_)) => ApiError::from(e),
        e => {
            tracing::error!("failed to delete file: {e}");
            ApiError::internal("Failed to delete file")
        }
    })?;

    tracing::info!(filename = %name, "file deleted");

    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
        filename: name,
    }))
}
