use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use dogs_core::model::{Dog, DogId};
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// A dog plus its `self` and `dogs` links.
#[derive(Debug, Serialize, ToSchema)]
pub struct DogResource {
    #[serde(flatten)]
    pub dog: Dog,
    pub links: Vec<Link>,
}

impl DogResource {
    pub fn new(dog: Dog, links: Vec<Link>) -> Self {
        Self { dog, links }
    }

    fn self_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "self")
            .map(|l| l.href.as_str())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DogCollection {
    pub content: Vec<DogResource>,
    pub links: Vec<Link>,
}

impl DogCollection {
    pub fn new(content: Vec<DogResource>, links: Vec<Link>) -> Self {
        Self { content, links }
    }
}

impl IntoResponse for DogCollection {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct DogResponse {
    status_code: StatusCode,
    resource: DogResource,
}

impl DogResponse {
    pub fn ok(resource: DogResource) -> Self {
        Self {
            status_code: StatusCode::OK,
            resource,
        }
    }

    /// 201 with a `Location` header pointing at the resource's `self` link.
    pub fn created(resource: DogResource) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            resource,
        }
    }
}

impl IntoResponse for DogResponse {
    fn into_response(self) -> Response {
        let location = match self.status_code {
            StatusCode::CREATED => self.resource.self_href().map(str::to_owned),
            _ => None,
        };

        match location {
            Some(location) => (
                self.status_code,
                [(header::LOCATION, location)],
                Json(self.resource),
            )
                .into_response(),
            None => (self.status_code, Json(self.resource)).into_response(),
        }
    }
}

pub type ErrorMessageType = Cow<'static, str>;

#[derive(Debug, Serialize, ToSchema)]
pub struct DogError {
    #[serde(skip)]
    status_code: StatusCode,
    message: Cow<'static, str>,
}

impl DogError {
    pub fn not_found(id: DogId) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Could not find dog {id}"))
    }

    pub fn bad_request(message: impl Into<ErrorMessageType>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn new(status_code: StatusCode, message: impl Into<ErrorMessageType>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl IntoResponse for DogError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Rejection for request bodies. Every way a body can be unusable is a 400.
#[derive(Debug)]
pub struct ApiError(DogError);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DogError::bad_request(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}
