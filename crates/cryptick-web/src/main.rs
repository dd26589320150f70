//! Service binary: load the dataset once, then serve queries over it.

mod dto;
mod error;
mod routes;
mod settings;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cryptick_core::{AnalyticsEngine, CsvLoader};
use tracing::info;

use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::parse();
    init_tracing();

    let loader = CsvLoader::new(&settings.data_dir, settings.compiled_pattern()?)?;
    let dataset = loader.load_all().await?;
    info!(symbols = dataset.len(), "dataset loaded");

    let engine = Arc::new(AnalyticsEngine::new(dataset));
    let app = routes::router(engine);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
