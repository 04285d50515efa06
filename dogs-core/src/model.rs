use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utoipa::ToSchema;

#[derive(
    Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct DogId(pub i64);

impl DogId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DogId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for DogId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dog that has not been saved yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub breed: String,
    pub weight: i32,
    pub apartment: bool,
}

impl NewDog {
    pub fn new(breed: impl Into<String>, weight: i32, apartment: bool) -> Self {
        Self {
            breed: breed.into(),
            weight,
            apartment,
        }
    }

    pub fn with_id(self, id: DogId) -> Dog {
        Dog {
            id,
            breed: self.breed,
            weight: self.weight,
            apartment: self.apartment,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Dog {
    pub id: DogId,
    pub breed: String,
    pub weight: i32,
    /// Whether the breed is suitable for apartment living.
    pub apartment: bool,
}

impl Dog {
    pub fn new(id: DogId, breed: impl Into<String>, weight: i32, apartment: bool) -> Self {
        Self {
            id,
            breed: breed.into(),
            weight,
            apartment,
        }
    }

    /// Replace every field except the id.
    pub fn overwrite_with(&mut self, update: NewDog) {
        self.breed = update.breed;
        self.weight = update.weight;
        self.apartment = update.apartment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overwrite_keeps_id() {
        let mut dog = Dog::new(DogId(4), "Collie", 50, false);

        dog.overwrite_with(NewDog::new("Pug", 9, true));

        assert_eq!(Dog::new(DogId(4), "Pug", 9, true), dog);
    }

    #[test]
    fn dog_serializes_with_plain_integer_id() {
        let dog = Dog::new(DogId(7), "Corgie", 35, true);

        assert_eq!(
            json!({ "id": 7, "breed": "Corgie", "weight": 35, "apartment": true }),
            serde_json::to_value(&dog).unwrap()
        );
    }
}
