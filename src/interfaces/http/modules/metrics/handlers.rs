//! Prometheus metrics handler
//!
//! `GET /metrics` renders the process-wide `metrics-exporter-prometheus`
//! recorder. Billing counters (`bills_issued_total`, `payments_total`) are
//! emitted by the application services and show up here.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`, no auth
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
