use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::Report;
use std::error::Error;

#[derive(Debug, thiserror::Error)]
#[error("dog service failed")]
pub struct DogServiceError;

#[derive(Debug, thiserror::Error)]
#[error("failed to install the metrics recorder")]
pub struct MetricsInitError;

/// Anything a handler could not recover from. Always answers 500 with an empty body;
/// the report itself is logged by the handler's span.
#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error + Send + Sync + 'static>(Report<T>);

impl<T: Error + Send + Sync + 'static> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error + Send + Sync + 'static,
{
    fn from(value: Report<T>) -> Self {
        Self(value)
    }
}

impl<T: Error + Send + Sync + 'static> IntoResponse for EndpointError<T> {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
