//! HTTP handlers and router

use super::pages;
use super::types::{self, AppState, HealthResponse};
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use bikecast::pipeline::RawSubmission;
use std::time::Instant;

/// Build the axum Router. `/metrics` is only mounted when enabled.
pub(crate) fn build_router(state: AppState, metrics: bool) -> Router {
    let router = Router::new()
        .route("/", get(form_handler))
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler));
    let router = if metrics {
        router.route("/metrics", get(metrics_handler))
    } else {
        router
    };
    router.with_state(state)
}

/// `GET /`
pub(crate) async fn form_handler(State(state): State<AppState>) -> Html<String> {
    state.metrics.record_request();
    Html(pages::form_page(state.ctx.k()))
}

/// `POST /predict`
///
/// Every failure, including an unreadable form body, is answered with 200
/// and a plain `Error: <message>` body.
pub(crate) async fn predict_handler(
    State(state): State<AppState>,
    form: Result<Form<RawSubmission>, FormRejection>,
) -> Response {
    state.metrics.record_request();

    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable form submission");
            state
                .metrics
                .record_prediction(None, std::time::Duration::ZERO);
            return error_response(&rejection.body_text());
        }
    };

    let start = Instant::now();
    let outcome = state.ctx.predict_submission(&raw);
    let elapsed = start.elapsed();

    match outcome {
        Ok(prediction) => {
            state
                .metrics
                .record_prediction(Some(prediction.level), elapsed);
            tracing::debug!(
                value = prediction.value,
                renters = prediction.renters,
                level = %prediction.level,
                latency_us = types::micros(elapsed),
                "prediction"
            );
            Html(pages::result_page(&prediction)).into_response()
        }
        Err(e) => {
            state.metrics.record_prediction(None, elapsed);
            tracing::warn!(error = %e, "prediction failed");
            error_response(&e.to_string())
        }
    }
}

fn error_response(message: &str) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Error: {message}"),
    )
        .into_response()
}

/// `GET /health`
pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    state.metrics.record_request();
    Json(HealthResponse {
        status: "healthy",
        model: state.bundle_path.display().to_string(),
        k: state.ctx.k(),
        training_samples: state.ctx.training_samples(),
    })
}

/// `GET /metrics`
///
/// Scrapes are left out of `bikecast_requests_total`.
pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.prometheus_output(),
    )
        .into_response()
}
