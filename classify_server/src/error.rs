//! Errors raised while serving a prediction request.
//!
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("No image provided")]
    MissingInput,

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("model invocation failed: {0:#}")]
    Model(anyhow::Error),

    #[error("model returned no comparable scores")]
    InvalidOutput,

    #[error("model returned {scores} scores for {labels} class labels")]
    LabelMismatch { scores: usize, labels: usize },

    #[error("failed to store upload: {0}")]
    Filesystem(#[from] std::io::Error),
}

impl PredictError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictError::MissingInput | PredictError::Multipart(_) => StatusCode::BAD_REQUEST,
            PredictError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PredictError::Model(_)
            | PredictError::InvalidOutput
            | PredictError::LabelMismatch { .. }
            | PredictError::Filesystem(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Prediction failed: {self}");
        } else {
            log::warn!("Rejected prediction request: {self}");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
