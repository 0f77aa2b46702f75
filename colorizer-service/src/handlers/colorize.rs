use crate::dtos::{BatchItemResponse, BatchResponse, ColorizeResponse};
use crate::models::{ArtifactRef, ArtifactRole, ColorizationOutcome};
use crate::services::store::ArtifactStore;
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Multipart, State},
    extract::multipart::Field,
    response::IntoResponse,
};
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use service_core::error::AppError;

/// An uploaded file: the client-supplied filename plus its bytes.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

async fn read_upload(field: Field<'_>) -> Result<Upload, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e)))?
        .to_vec();
    Ok(Upload { filename, bytes })
}

async fn discard(store: &ArtifactStore, artifact: &ArtifactRef) {
    if let Err(e) = store.delete(artifact).await {
        tracing::warn!(artifact = %artifact.name, error = %e, "Failed to delete transient artifact");
    }
}

pub async fn colorize_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image: Option<Upload> = None;
    let mut reference: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("image") => image = Some(read_upload(field).await?),
            Some("reference") => reference = Some(read_upload(field).await?),
            _ => continue,
        }
    }

    // Validate before anything touches disk, so a rejected request leaves
    // no stray file behind.
    let image = image.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No image file provided")))?;
    if image.filename.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "No image file selected"
        )));
    }
    // A reference part with an empty filename means "no reference".
    let reference = reference.filter(|r| !r.filename.is_empty());

    metrics::counter!("colorize_requests_total").increment(1);

    let input = state
        .store
        .save(&image.bytes, ArtifactRole::Input, Some(&image.filename))
        .await?;

    let reference_ref = match &reference {
        Some(upload) => Some(
            state
                .store
                .save(
                    &upload.bytes,
                    ArtifactRole::Reference,
                    Some(&upload.filename),
                )
                .await?,
        ),
        None => None,
    };

    tracing::info!(
        input = %input.name,
        filename = %image.filename,
        size = image.bytes.len(),
        has_reference = reference_ref.is_some(),
        "Colorization request started"
    );

    let outcome = state.colorizer.colorize(&input, reference_ref.as_ref()).await;

    // Inputs are transient: drop them whether or not the request succeeded.
    discard(&state.store, &input).await;
    if let Some(r) = &reference_ref {
        discard(&state.store, r).await;
    }

    let result = outcome?;
    let result_bytes = state.store.read(&result).await?;

    Ok(Json(ColorizeResponse {
        success: true,
        colorized_image: general_purpose::STANDARD.encode(&result_bytes),
        result_path: result.name,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

pub async fn colorize_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut images: Vec<Upload> = Vec::new();
    let mut reference: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("images") => images.push(read_upload(field).await?),
            Some("reference") => reference = Some(read_upload(field).await?),
            _ => continue,
        }
    }

    if images.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "No image files provided"
        )));
    }
    let reference = reference.filter(|r| !r.filename.is_empty());

    metrics::counter!("colorize_batch_requests_total").increment(1);

    let reference_ref = match &reference {
        Some(upload) => Some(
            state
                .store
                .save(
                    &upload.bytes,
                    ArtifactRole::Reference,
                    Some(&upload.filename),
                )
                .await?,
        ),
        None => None,
    };

    // Unnamed parts never reach the coordinator, but they are still
    // reported per item below so the counts reflect what was uploaded.
    let mut inputs = Vec::with_capacity(images.len());
    for upload in &images {
        if upload.filename.is_empty() {
            continue;
        }
        let artifact = state
            .store
            .save(&upload.bytes, ArtifactRole::Input, Some(&upload.filename))
            .await?;
        inputs.push((artifact, upload.filename.clone()));
    }

    tracing::info!(
        count = inputs.len(),
        has_reference = reference_ref.is_some(),
        "Batch colorization request started"
    );

    let batch = state
        .colorizer
        .colorize_batch(inputs, reference_ref.as_ref())
        .await;

    // The shared reference is deleted exactly once, after the whole batch.
    if let Some(r) = &reference_ref {
        discard(&state.store, r).await;
    }

    let mut outcomes = batch.outcomes.into_iter();
    let mut results = Vec::with_capacity(images.len());
    for upload in &images {
        if upload.filename.is_empty() {
            results.push(BatchItemResponse::failure(
                upload.filename.clone(),
                "No image file selected".to_string(),
            ));
            continue;
        }
        match outcomes.next() {
            Some(ColorizationOutcome::Success {
                original_name,
                result,
            }) => match state.store.read(&result).await {
                Ok(bytes) => results.push(BatchItemResponse::success(
                    original_name,
                    general_purpose::STANDARD.encode(&bytes),
                    result.name,
                )),
                Err(e) => results.push(BatchItemResponse::failure(original_name, e.to_string())),
            },
            Some(ColorizationOutcome::Failure {
                original_name,
                error,
            }) => results.push(BatchItemResponse::failure(original_name, error)),
            None => break,
        }
    }

    let processed_count = results.iter().filter(|r| r.success).count();
    let total_count = results.len();

    tracing::info!(
        processed = processed_count,
        total = total_count,
        "Batch colorization completed"
    );

    Ok(Json(BatchResponse {
        success: true,
        results,
        processed_count,
        total_count,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
