use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use service_core::error::AppError;

/// Serve a stored result as a file attachment.
///
/// Results are PNG regardless of what was uploaded; both the remote model
/// and the local fallback emit PNG bytes.
pub async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state.store.read_result(&name).await?;

    tracing::info!(result = %name, size = bytes.len(), "Result download completed");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    ))
}
