use crate::error::DogServiceError;
use error_stack::Report;

pub mod error;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;

pub type ServiceResult<T> = Result<T, Report<DogServiceError>>;
pub type OptServiceResult<T> = Result<Option<T>, Report<DogServiceError>>;
