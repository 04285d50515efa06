use dogs_core::model::NewDog;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DogRequest {
    /// Ignored. New dogs get their id from the store, and updates take it from the path.
    #[serde(default)]
    pub id: Option<i64>,
    pub breed: String,
    pub weight: i32,
    pub apartment: bool,
}

impl From<DogRequest> for NewDog {
    fn from(value: DogRequest) -> Self {
        NewDog::new(value.breed, value.weight, value.apartment)
    }
}
