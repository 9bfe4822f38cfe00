//! Server configuration, metrics and shared state

use bikecast::pipeline::{DemandLevel, InferenceContext};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Host to bind to
    pub host: String,
    /// Enable Prometheus metrics endpoint
    pub metrics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            metrics: true,
        }
    }
}

impl ServerConfig {
    /// Create config with custom port (builder pattern, used in tests)
    #[cfg(test)]
    pub(crate) fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get bind address
    pub(crate) fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Server metrics (thread-safe)
#[derive(Debug, Default)]
pub(crate) struct ServerMetrics {
    /// Requests to `/`, `/predict` and `/health`; scrapes of `/metrics`
    /// are not counted
    pub requests_total: AtomicU64,
    /// Predictions rendered
    pub predictions_success: AtomicU64,
    /// Predictions answered with `Error:`
    pub predictions_error: AtomicU64,
    /// Total pipeline time in microseconds
    pub inference_time_us: AtomicU64,
    demand_low: AtomicU64,
    demand_medium: AtomicU64,
    demand_high: AtomicU64,
}

impl ServerMetrics {
    /// Create new metrics
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Count an incoming request. Not called for `/metrics`.
    pub(crate) fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one pipeline run. `level` is `None` on failure.
    pub(crate) fn record_prediction(&self, level: Option<DemandLevel>, elapsed: Duration) {
        match level {
            Some(level) => {
                self.predictions_success.fetch_add(1, Ordering::Relaxed);
                self.level_counter(level).fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.predictions_error.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.inference_time_us
            .fetch_add(micros(elapsed), Ordering::Relaxed);
    }

    fn level_counter(&self, level: DemandLevel) -> &AtomicU64 {
        match level {
            DemandLevel::Low => &self.demand_low,
            DemandLevel::Medium => &self.demand_medium,
            DemandLevel::High => &self.demand_high,
        }
    }

    /// Predictions that landed in `level`.
    pub(crate) fn demand_count(&self, level: DemandLevel) -> u64 {
        self.level_counter(level).load(Ordering::Relaxed)
    }

    /// Get Prometheus-format metrics
    pub(crate) fn prometheus_output(&self) -> String {
        let total = self.requests_total.load(Ordering::Relaxed);
        let success = self.predictions_success.load(Ordering::Relaxed);
        let errors = self.predictions_error.load(Ordering::Relaxed);
        let inference_us = self.inference_time_us.load(Ordering::Relaxed);

        let mut out = format!(
            r"# HELP bikecast_requests_total Requests served, excluding metrics scrapes
# TYPE bikecast_requests_total counter
bikecast_requests_total {total}

# HELP bikecast_predictions_success Predictions rendered
# TYPE bikecast_predictions_success counter
bikecast_predictions_success {success}

# HELP bikecast_predictions_error Predictions that returned an error
# TYPE bikecast_predictions_error counter
bikecast_predictions_error {errors}

# HELP bikecast_inference_duration_seconds_total Total inference time
# TYPE bikecast_inference_duration_seconds_total counter
bikecast_inference_duration_seconds_total {:.6}

# HELP bikecast_demand_level_total Predictions per demand level
# TYPE bikecast_demand_level_total counter
",
            inference_us as f64 / 1_000_000.0
        );
        for level in DemandLevel::ALL {
            out.push_str(&format!(
                "bikecast_demand_level_total{{level=\"{}\"}} {}\n",
                level.as_str().to_lowercase(),
                self.demand_count(level)
            ));
        }
        out
    }
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
pub(crate) fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// State shared by all handlers
#[derive(Clone)]
pub(crate) struct AppState {
    /// Loaded artifacts
    pub ctx: Arc<InferenceContext>,
    /// Request counters
    pub metrics: Arc<ServerMetrics>,
    /// Where the bundle was loaded from
    pub bundle_path: Arc<PathBuf>,
}

impl AppState {
    pub(crate) fn new(ctx: InferenceContext, bundle_path: PathBuf) -> Self {
        Self {
            ctx: Arc::new(ctx),
            metrics: ServerMetrics::new(),
            bundle_path: Arc::new(bundle_path),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub k: usize,
    pub training_samples: usize,
}
