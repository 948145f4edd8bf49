use celebrity_atoms::recognition::{CelebrityRecognizer, RekognitionRecognizer};
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod http_handler;

use config::Config;
use http_handler::function_handler;

/// Shared across invocations of one execution environment.
pub(crate) struct AppState {
    pub recognizer: Arc<dyn CelebrityRecognizer>,
    pub config: Config,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch stamps every line, so no timestamps here.
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Starting Rekognition Lambda - route: {} region override: {:?}",
        config.route_path,
        config.region
    );

    let recognizer = RekognitionRecognizer::from_env(config.region.clone()).await;
    let state = Arc::new(AppState {
        recognizer: Arc::new(recognizer),
        config,
    });

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { function_handler(event, state).await }
    }))
    .await
}
