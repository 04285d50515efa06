use crate::error::MetricsInitError;
use crate::metrics;
use crate::routes::links::LinkAssembler;
use crate::service::DogService;
use axum::extract::FromRef;
use dogs_core::DogEngine;
use error_stack::Report;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct DogAppState<T: DogEngine> {
    pub service: DogService<T>,
    pub links: LinkAssembler,
    /// `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

pub type StateResult<T> = Result<T, Report<MetricsInitError>>;

impl<T: DogEngine> DogAppState<T> {
    /// Installs the process-wide metrics recorder, so this can only succeed once per process.
    #[instrument(skip_all)]
    pub fn new_with_metrics(engine: T, links: LinkAssembler) -> StateResult<Self> {
        info!("creating new dog state with metrics");
        Ok(Self {
            service: DogService::new(engine),
            links,
            metrics: Some(metrics::setup_recorder()?),
        })
    }

    #[instrument(skip_all)]
    pub fn new_without_metrics(engine: T, links: LinkAssembler) -> Self {
        info!("creating new dog state without metrics");
        Self {
            service: DogService::new(engine),
            links,
            metrics: None,
        }
    }
}

impl<T: DogEngine> FromRef<DogAppState<T>> for DogService<T> {
    fn from_ref(input: &DogAppState<T>) -> Self {
        input.service.clone()
    }
}

impl<T: DogEngine> FromRef<DogAppState<T>> for LinkAssembler {
    fn from_ref(input: &DogAppState<T>) -> Self {
        input.links.clone()
    }
}
