use crate::error::{DogServiceError, EndpointError};
use crate::metrics;
use crate::service::DogService;
use crate::state::DogAppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use dogs_core::DogEngine;
use dogs_core::list_filter::ListOperation;
use dogs_core::model::DogId;
use links::LinkAssembler;
use paths::*;
use requests::DogRequest;
use responses::{ApiError, DogCollection, DogError, DogResource, DogResponse};
use tracing::{debug, info, instrument};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod links;
pub mod paths;
mod requests;
pub mod responses;


#[derive(OpenApi)]
#[openapi(
    nest(
        (path = DOGS_ROOT_PATH, api = DogDocs),
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    list_dogs,
    list_dogs_by_breed,
    list_dogs_by_weight,
    find_dogs_of_breed,
    find_apartment_dogs,
    get_dog,
    create_dog,
    upsert_dog,
    delete_dog,
    delete_dogs_of_breed,
))]
struct DogDocs;

pub fn build<T: DogEngine>(app_state: DogAppState<T>) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes(app_state))
        .split_for_parts();

    router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_DOC_PATH, api))
}

fn routes<S, T: DogEngine>(app_state: DogAppState<T>) -> OpenApiRouter<S> {
    let main_router = OpenApiRouter::new()
        .route(DOG_LIST_PATH, get(list_dogs::<T>))
        .route(DOG_CREATE_PATH, post(create_dog::<T>))
        .route(DOG_LIST_BY_BREED_PATH, get(list_dogs_by_breed::<T>))
        .route(DOG_LIST_BY_WEIGHT_PATH, get(list_dogs_by_weight::<T>))
        .route(DOG_FIND_BY_BREED_PATH, get(find_dogs_of_breed::<T>))
        .route(DOG_DELETE_BY_BREED_PATH, delete(delete_dogs_of_breed::<T>))
        .route(DOG_FIND_APARTMENT_PATH, get(find_apartment_dogs::<T>))
        .route(DOG_GET_PATH, get(get_dog::<T>))
        .route(DOG_UPSERT_PATH, put(upsert_dog::<T>))
        .route(DOG_DELETE_PATH, delete(delete_dog::<T>));

    let router = match app_state.metrics.clone() {
        Some(handle) => {
            info!("metrics enabled, setting up metrics handler");
            main_router
                .route(DOG_METRICS_PATH, get(|| async move { handle.render() }))
                .route_layer(middleware::from_fn(metrics::track_http))
        }
        None => {
            info!("metrics not enabled, setting up service unavailable metrics handler");
            main_router.route(
                DOG_METRICS_PATH,
                get(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Metrics endpoint is disabled. Metrics must be enabled and the service restarted",
                    )
                }),
            )
        }
    };

    OpenApiRouter::new()
        .nest(DOGS_ROOT_PATH, router)
        .with_state(app_state)
}

async fn list<T: DogEngine>(
    service: DogService<T>,
    links: LinkAssembler,
    operation: ListOperation,
) -> Result<Response, EndpointError<DogServiceError>> {
    let dogs = service.list(operation.clone()).await?;
    Ok(links.to_collection(&operation, dogs).into_response())
}

/// List every dog, ordered by id.
#[utoipa::path(
    get,
    path = DOG_LIST_PATH,
    responses(
        (status = OK, description = "All dogs, possibly none", body = DogCollection),
    ),
)]
#[instrument(skip_all, err(Debug))]
pub async fn list_dogs<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
) -> Result<Response, EndpointError<DogServiceError>> {
    list(service, links, ListOperation::All).await
}

/// List every dog, ordered by breed.
#[utoipa::path(
    get,
    path = DOG_LIST_BY_BREED_PATH,
    responses(
        (status = OK, description = "All dogs ordered by breed, then id", body = DogCollection),
    ),
)]
#[instrument(skip_all, err(Debug))]
pub async fn list_dogs_by_breed<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
) -> Result<Response, EndpointError<DogServiceError>> {
    list(service, links, ListOperation::ByBreed).await
}

/// List every dog, ordered by weight.
#[utoipa::path(
    get,
    path = DOG_LIST_BY_WEIGHT_PATH,
    responses(
        (status = OK, description = "All dogs ordered by weight, then id", body = DogCollection),
    ),
)]
#[instrument(skip_all, err(Debug))]
pub async fn list_dogs_by_weight<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
) -> Result<Response, EndpointError<DogServiceError>> {
    list(service, links, ListOperation::ByWeight).await
}

/// Find the dogs of exactly this breed. Matching is case-sensitive.
#[utoipa::path(
    get,
    path = DOG_FIND_BY_BREED_PATH,
    responses(
        (status = OK, description = "Dogs of the given breed, possibly none", body = DogCollection),
    ),
    params(
        ("breed" = String, Path, description = "The breed to match"),
    )
)]
#[instrument(skip(service, links), err(Debug))]
pub async fn find_dogs_of_breed<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
    Path(breed): Path<String>,
) -> Result<Response, EndpointError<DogServiceError>> {
    list(service, links, ListOperation::Breed(breed)).await
}

/// Find the dogs suited to apartment living.
#[utoipa::path(
    get,
    path = DOG_FIND_APARTMENT_PATH,
    responses(
        (status = OK, description = "Apartment friendly dogs, possibly none", body = DogCollection),
    ),
)]
#[instrument(skip_all, err(Debug))]
pub async fn find_apartment_dogs<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
) -> Result<Response, EndpointError<DogServiceError>> {
    list(service, links, ListOperation::Apartment).await
}

/// Get the dog with the given id.
#[utoipa::path(
    get,
    path = DOG_GET_PATH,
    responses(
        (status = OK, description = "The dog was found", body = DogResource),
        (status = NOT_FOUND, description = "No dog has the given id", body = DogError),
    ),
    params(
        ("id" = i64, Path, description = "The id of the dog to find"),
    )
)]
#[instrument(skip(service, links), err(Debug))]
pub async fn get_dog<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
    Path(id): Path<DogId>,
) -> Result<Response, EndpointError<DogServiceError>> {
    let dog = service.get(id).await?;

    Ok(dog
        .map(|d| DogResponse::ok(links.to_resource(d)).into_response())
        .unwrap_or_else(|| DogError::not_found(id).into_response()))
}

/// Create a new dog. Any id in the body is ignored.
#[utoipa::path(
    post,
    path = DOG_CREATE_PATH,
    responses(
        (status = CREATED, description = "The dog was created. `Location` holds its self link", body = DogResource),
        (status = BAD_REQUEST, description = "The body was not a valid dog", body = DogError),
    ),
    request_body = DogRequest
)]
#[instrument(skip_all, err(Debug), fields(req.breed = dog.breed.as_str(), req.weight = dog.weight, req.apartment = dog.apartment))]
pub async fn create_dog<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
    WithRejection(Json(dog), _): WithRejection<Json<DogRequest>, ApiError>,
) -> Result<Response, EndpointError<DogServiceError>> {
    let dog = service.create(dog.into()).await?;
    Ok(DogResponse::created(links.to_resource(dog)).into_response())
}

/// Replace the dog with the given id, or create it under that id if it does not exist.
/// The id in the path always wins over one in the body.
#[utoipa::path(
    put,
    path = DOG_UPSERT_PATH,
    responses(
        (status = CREATED, description = "The dog was replaced or created. `Location` holds its self link", body = DogResource),
        (status = BAD_REQUEST, description = "The body was not a valid dog", body = DogError),
    ),
    params(
        ("id" = i64, Path, description = "The id of the dog to replace"),
    ),
    request_body = DogRequest
)]
#[instrument(skip(service, links, dog), err(Debug), fields(req.body_id = dog.id, req.breed = dog.breed.as_str()))]
pub async fn upsert_dog<T: DogEngine>(
    State(service): State<DogService<T>>,
    State(links): State<LinkAssembler>,
    Path(id): Path<DogId>,
    WithRejection(Json(dog), _): WithRejection<Json<DogRequest>, ApiError>,
) -> Result<Response, EndpointError<DogServiceError>> {
    let outcome = service.upsert(id, dog.into()).await?;
    debug!("upsert outcome: {outcome:?}");
    Ok(DogResponse::created(links.to_resource(outcome.into_dog())).into_response())
}

/// Delete the dog with the given id. Deleting a dog that does not exist is not an error.
#[utoipa::path(
    delete,
    path = DOG_DELETE_PATH,
    responses(
        (status = NO_CONTENT, description = "The dog was deleted, or never existed"),
    ),
    params(
        ("id" = i64, Path, description = "The id of the dog to delete"),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_dog<T: DogEngine>(
    State(service): State<DogService<T>>,
    Path(id): Path<DogId>,
) -> Result<Response, EndpointError<DogServiceError>> {
    if !service.delete(id).await? {
        debug!("dog {id} did not exist");
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Delete every dog of the given breed.
#[utoipa::path(
    delete,
    path = DOG_DELETE_BY_BREED_PATH,
    responses(
        (status = NO_CONTENT, description = "Every dog of the breed was deleted, if there were any"),
    ),
    params(
        ("breed" = String, Path, description = "The breed to delete"),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_dogs_of_breed<T: DogEngine>(
    State(service): State<DogService<T>>,
    Path(breed): Path<String>,
) -> Result<Response, EndpointError<DogServiceError>> {
    service.delete_by_breed(breed).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
