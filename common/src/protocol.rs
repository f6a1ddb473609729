//! JSON bodies exchanged with the prediction endpoint.
//!
use serde::{Deserialize, Serialize};

/// Successful classification of an uploaded image.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

impl PredictionResponse {
    pub fn new(prediction: impl Into<String>) -> Self {
        Self {
            prediction: prediction.into(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
