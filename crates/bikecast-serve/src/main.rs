//! bikecast-serve - bike rental demand prediction server
//!
//! Usage:
//!   bikecast-serve                          # serve ./bike_model.apr on 127.0.0.1:8000
//!   bikecast-serve --bundle model.apr       # serve another bundle
//!   bikecast-serve --host 0.0.0.0 -p 9000   # bind elsewhere
//!   bikecast-serve --no-metrics -v          # no /metrics, debug logging

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod error;
mod serve;

use serve::ServerConfig;

/// Serve the bike renter prediction form.
#[derive(Parser, Debug)]
#[command(name = "bikecast-serve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the artifact bundle
    #[arg(short, long, value_name = "FILE", default_value = bikecast::bundle::DEFAULT_BUNDLE_PATH)]
    bundle: PathBuf,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Disable the /metrics endpoint
    #[arg(long)]
    no_metrics: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            host: self.host.clone(),
            metrics: !self.no_metrics,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match serve::run(&cli.bundle, &cli.server_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    }
}
