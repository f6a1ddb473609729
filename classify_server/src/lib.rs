//! HTTP server classifying uploaded images with a pre-trained ONNX model.

pub mod endpoints;
pub mod error;
pub mod inferer;
pub mod labels;
pub mod nn;
pub mod preproc;
pub mod router;
pub mod scratch;
pub mod utils;

use inferer::Inferer;
use scratch::ScratchDir;

/// Read-only state shared by all request handlers.
pub struct AppState {
    pub inferer: Inferer,
    pub scratch: ScratchDir,
}
