//! The one table of route templates. The router registers these and the link assembler
//! expands them, so an href can never drift from the route that serves it.
use const_format::concatcp;

pub const DOGS_ROOT_PATH: &str = "/dogs";

pub const DOG_LIST_PATH: &str = "/";
pub const DOG_CREATE_PATH: &str = "/";
pub const DOG_GET_PATH: &str = "/{id}";
pub const DOG_UPSERT_PATH: &str = "/{id}";
pub const DOG_DELETE_PATH: &str = "/{id}";
pub const DOG_LIST_BY_BREED_PATH: &str = "/breeds";
pub const DOG_LIST_BY_WEIGHT_PATH: &str = "/weight";
pub const DOG_FIND_BY_BREED_PATH: &str = "/breeds/{breed}";
pub const DOG_DELETE_BY_BREED_PATH: &str = "/breeds/{breed}";
pub const DOG_FIND_APARTMENT_PATH: &str = "/apartment";
pub const DOG_METRICS_PATH: &str = "/metrics";

pub const SWAGGER_UI_PATH: &str = concatcp!(DOGS_ROOT_PATH, "/swagger-ui");
pub const OPENAPI_DOC_PATH: &str = concatcp!(DOGS_ROOT_PATH, "/api-docs/openapi.json");

/// Full templates, as seen by clients.
pub mod full {
    use super::*;

    pub const DOG: &str = concatcp!(DOGS_ROOT_PATH, DOG_GET_PATH);
    pub const DOGS_BY_BREED: &str = concatcp!(DOGS_ROOT_PATH, DOG_LIST_BY_BREED_PATH);
    pub const DOGS_BY_WEIGHT: &str = concatcp!(DOGS_ROOT_PATH, DOG_LIST_BY_WEIGHT_PATH);
    pub const DOGS_OF_BREED: &str = concatcp!(DOGS_ROOT_PATH, DOG_FIND_BY_BREED_PATH);
    pub const APARTMENT_DOGS: &str = concatcp!(DOGS_ROOT_PATH, DOG_FIND_APARTMENT_PATH);
}
