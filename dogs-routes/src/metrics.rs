use crate::error::MetricsInitError;
use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::IntoResponse;
use error_stack::{Report, ResultExt};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::time::Instant;
use tracing::error;

const REQUESTS_TOTAL_METRIC_NAME: &str = "http_requests_total";
const REQUEST_DURATION_METRIC_NAME: &str = "http_requests_duration_seconds";
const REQUEST_SIZE_METRIC_NAME: &str = "http_request_size";

const DOGS_RETRIEVED_METRIC_NAME: &str = "dogs_retrieved";
const DOGS_CREATED_METRIC_NAME: &str = "num_dogs_created";
const DOGS_UPDATED_METRIC_NAME: &str = "num_dogs_updated";
const DOGS_DELETED_METRIC_NAME: &str = "num_dogs_deleted";

/// Installs the process-wide prometheus recorder. Only the first call in a process can succeed.
pub fn setup_recorder() -> Result<PrometheusHandle, Report<MetricsInitError>> {
    const EXPONENTIAL_SECONDS: &[f64] = &[0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    const REQ_RES_BUCKETS: &[f64] = &[128.0, 256.0, 512.0, 1024.0, 2048.0, 4096.0, 8192.0, 16384.0];

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_METRIC_NAME.to_string()),
            EXPONENTIAL_SECONDS,
        )
        .change_context(MetricsInitError)
        .attach(REQUEST_DURATION_METRIC_NAME)?
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_SIZE_METRIC_NAME.to_string()),
            REQ_RES_BUCKETS,
        )
        .change_context(MetricsInitError)
        .attach(REQUEST_SIZE_METRIC_NAME)?
        .install_recorder()
        .change_context(MetricsInitError)
}

pub async fn track_http(req: Request, next: Next) -> impl IntoResponse {
    let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
        matched_path.as_str().to_owned()
    } else {
        req.uri().path().to_owned()
    };

    if path.ends_with("metrics") {
        return next.run(req).await;
    }

    let method = req.method().clone();

    let req_size = req
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok());

    if let Some(req_size) = req_size {
        metrics::histogram!(REQUEST_SIZE_METRIC_NAME).record(f64::from(req_size));
    }

    let start = Instant::now();
    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", status),
    ];

    metrics::counter!(REQUESTS_TOTAL_METRIC_NAME, &labels).increment(1);
    metrics::histogram!(REQUEST_DURATION_METRIC_NAME, &labels).record(latency);
    response
}

#[inline]
pub fn increment_dogs_retrieved() {
    metrics::counter!(DOGS_RETRIEVED_METRIC_NAME).increment(1);
}

pub fn increment_dogs_retrieved_by(amt: usize) {
    match u64::try_from(amt) {
        Ok(amt) => metrics::counter!(DOGS_RETRIEVED_METRIC_NAME).increment(amt),
        Err(e) => error!("could not increment dogs retrieved metric: {e}"),
    }
}

#[inline]
pub fn increment_dogs_created() {
    metrics::counter!(DOGS_CREATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_dogs_updated() {
    metrics::counter!(DOGS_UPDATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_dogs_deleted_by(amt: u64) {
    metrics::counter!(DOGS_DELETED_METRIC_NAME).increment(amt);
}
