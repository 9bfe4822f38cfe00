//! Bike rental prediction server
//!
//! Loads the artifact bundle once, then serves the input form, the
//! prediction endpoint, a health check and Prometheus metrics.

pub(crate) mod handlers;
pub(crate) mod pages;
pub(crate) mod types;

pub(crate) use types::ServerConfig;


use crate::error::{Result, ServeError};
use bikecast::pipeline::InferenceContext;
use colored::Colorize;
use std::path::Path;
use types::AppState;

/// Serve command entry point (blocking)
pub(crate) fn run(bundle_path: &Path, config: &ServerConfig) -> Result<()> {
    println!("{}", "=== Bikecast Serve ===".cyan().bold());
    println!();
    println!("Bundle: {}", bundle_path.display());
    println!("Binding: {}", config.bind_addr());
    println!();

    if !bundle_path.exists() {
        return Err(ServeError::BundleNotFound(bundle_path.to_path_buf()));
    }

    let ctx = InferenceContext::load(bundle_path)?;
    tracing::info!(
        k = ctx.k(),
        training_samples = ctx.training_samples(),
        columns = ctx.schema().len(),
        "bundle loaded"
    );
    println!(
        "{}",
        format!(
            "Model: KNN k={} over {} training samples",
            ctx.k(),
            ctx.training_samples()
        )
        .dimmed()
    );

    let state = AppState::new(ctx, bundle_path.to_path_buf());

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| ServeError::Server(format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    let metrics = config.metrics;

    runtime.block_on(async move {
        let app = handlers::build_router(state, metrics);

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServeError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        print_banner(&bind_addr, metrics);
        tracing::info!(addr = %bind_addr, "listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServeError::Server(e.to_string()))?;

        println!();
        println!("{}", "Server stopped".yellow());
        Ok(())
    })
}

fn print_banner(bind_addr: &str, metrics: bool) {
    println!();
    println!(
        "{}",
        format!("Bikecast listening on http://{bind_addr}")
            .green()
            .bold()
    );
    println!();
    println!("{}", "Endpoints:".cyan());
    println!("  GET  /         - Input form");
    println!("  POST /predict  - Demand prediction");
    println!("  GET  /health   - Health check");
    if metrics {
        println!("  GET  /metrics  - Prometheus metrics");
    }
    println!();
    println!("{}", "Press Ctrl+C to stop".dimmed());
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
