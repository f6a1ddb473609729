//! Endpoints of HTTP server.
//!
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Extension, Json,
};
use bytes::Bytes;
use common::protocol::PredictionResponse;

use crate::{error::PredictError, AppState};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Liveness endpoint.
pub async fn home() -> &'static str {
    "AI Model Backend Running"
}

/// Health check endpoint.
pub async fn healthcheck() -> &'static str {
    "healthy"
}

/// Classify the image uploaded in the `image` field of a multipart form.
pub async fn predict(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionResponse>, PredictError> {
    let multipart = multipart.map_err(|rejection| {
        log::debug!("Request without multipart body: {}", rejection);
        PredictError::MissingInput
    })?;

    let (client_name, data) = read_image_field(multipart).await?;
    let scratch_file = state.scratch.store(client_name.as_deref(), &data).await?;
    log::info!(
        "Stored upload {:?} ({} bytes) as {}",
        client_name.as_deref().unwrap_or("<unnamed>"),
        data.len(),
        scratch_file.path().display()
    );

    // Decoding, inference and removing the upload all block
    let state_ = Arc::clone(&state);
    let label = tokio::task::spawn_blocking(move || {
        let label = state_.inferer.infer(&data);
        drop(scratch_file);
        label
    })
    .await
    .map_err(|e| PredictError::Model(e.into()))??;

    log::info!("Predicted {}", &label);
    Ok(Json(PredictionResponse::new(label)))
}

/// Find the image field and buffer its content.
async fn read_image_field(
    mut multipart: Multipart,
) -> Result<(Option<String>, Bytes), PredictError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            log::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let client_name = field.file_name().map(ToOwned::to_owned);
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(PredictError::MissingInput);
        }

        return Ok((client_name, data));
    }

    Err(PredictError::MissingInput)
}
