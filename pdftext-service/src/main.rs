use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

mod api;
mod config;
mod error;
mod extractor;
mod fetcher;
mod formatter;
mod pipeline;

use crate::config::StaticConfig;
use crate::extractor::PdftotextExtractor;
use crate::fetcher::PdfFetcher;
use crate::pipeline::Pipeline;

// Re-export config crate types to avoid namespace collision
use ::config::{Config as ConfigBuilder, Environment, File};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_logging();

    info!(
        "Starting PDF text extraction service v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load static configuration (server binding, fetch/extraction settings)
    let static_config: StaticConfig = ConfigBuilder::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("PDFTEXT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    info!(
        host = %static_config.server.host,
        port = static_config.server.port,
        tool = %static_config.extractor.tool_path,
        "Static configuration loaded"
    );

    // Assemble the pipeline once; it is shared by all requests
    let fetcher = PdfFetcher::new(static_config.fetcher.clone())?;
    let extractor = PdftotextExtractor::new(static_config.extractor.clone());
    let pipeline = Pipeline::new(fetcher, extractor);

    // Build the router
    let app = api::router(Arc::new(api::AppState::new(pipeline)));

    // Start the server
    let addr = format!(
        "{}:{}",
        static_config.server.host, static_config.server.port
    );
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdftext_service=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(format))
        .with(filter)
        .init();
}
