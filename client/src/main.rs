use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use celebrity_client::{
    ClientConfig, DataUrlReader, HttpRecognitionApi, PreviewRegistry, SelectedFile,
    SubmissionController,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Recognize celebrities in a PNG or JPEG image.
#[derive(Debug, Parser)]
#[command(name = "recognize", version)]
struct Args {
    /// Image to analyze (PNG or JPEG, at most 5MB)
    path: PathBuf,

    /// Recognition endpoint; defaults to $CELEBRITY_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds; defaults to $CELEBRITY_API_TIMEOUT_SECS or 30
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the raw response as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.api_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let api = HttpRecognitionApi::new(&config)?;
    let controller = SubmissionController::new(
        Arc::new(api),
        Arc::new(DataUrlReader),
        Box::new(PreviewRegistry::default()),
    );

    let file = SelectedFile::from_path(&args.path)
        .await
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    tracing::info!(name = %file.name, media_type = %file.media_type, size = file.size, "submitting image");

    let result = controller.run(file).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
    }

    Ok(())
}
