//! Classify server binary.
//!
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use classify_server::{
    inferer::Inferer, labels::ClassLabels, nn::OnnxClassifier, router::build_router,
    scratch::ScratchDir, utils::ensure_model, AppState,
};
use env_logger::TimestampPrecision;

#[derive(Parser, Debug)]
#[clap(author, version)]
struct Args {
    /// Address to serve HTTP on
    #[clap(long, env = "SERVER_ADDRESS", default_value = "127.0.0.1:5000")]
    server_address: String,

    /// Path of the ONNX classifier
    #[clap(long, env = "MODEL_PATH", default_value = "lung_model.onnx")]
    model_path: PathBuf,

    /// URL to download the model from if it is not present at `model_path`
    #[clap(long, env = "MODEL_URL")]
    model_url: Option<String>,

    /// File with one class label per line, in model output order
    #[clap(long, env = "LABELS_PATH")]
    labels: Option<PathBuf>,

    /// Directory uploads are written to
    #[clap(long, env = "UPLOAD_DIR", default_value = "uploads")]
    upload_dir: PathBuf,

    /// Width of the model input
    #[clap(long, env = "INPUT_WIDTH", default_value_t = 224)]
    input_width: u32,

    /// Height of the model input
    #[clap(long, env = "INPUT_HEIGHT", default_value_t = 224)]
    input_height: u32,

    /// Keep uploaded files instead of removing them after each request
    #[clap(long, env = "KEEP_UPLOADS")]
    keep_uploads: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logger
    env_logger::builder()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    ensure_model(&args.model_path, args.model_url.as_deref()).await?;
    let model = OnnxClassifier::load(&args.model_path, args.input_width, args.input_height)?;
    log::info!("Loaded model {}", args.model_path.display());

    let labels = match &args.labels {
        Some(path) => ClassLabels::from_file(path)?,
        None => ClassLabels::default(),
    };

    // Refuses to start if the model output does not line up with the labels
    let inferer = Inferer::new(Arc::new(model), labels, args.input_width, args.input_height)?;
    log::info!(
        "Class labels: {}",
        inferer.labels().iter().collect::<Vec<_>>().join(", ")
    );

    let scratch = ScratchDir::create(&args.upload_dir, args.keep_uploads)?;

    let state = Arc::new(AppState { inferer, scratch });
    let app = build_router(state);

    // Serve HTTP server
    let addr: SocketAddr = args.server_address.parse()?;
    log::info!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
