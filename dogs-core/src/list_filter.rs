use crate::model::Dog;
use itertools::Itertools;
use std::cmp::Ordering;

/// The read operations the service exposes. Each one maps to exactly one
/// (filter, sort) pair through [`ListOperation::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOperation {
    All,
    ByBreed,
    ByWeight,
    Breed(String),
    Apartment,
}

impl ListOperation {
    pub fn query(self) -> DogQuery {
        match self {
            ListOperation::All => DogQuery::new(DogFilter::None, SortKey::Id),
            ListOperation::ByBreed => DogQuery::new(DogFilter::None, SortKey::Breed),
            ListOperation::ByWeight => DogQuery::new(DogFilter::None, SortKey::Weight),
            ListOperation::Breed(breed) => DogQuery::new(DogFilter::Breed(breed), SortKey::Id),
            ListOperation::Apartment => DogQuery::new(DogFilter::Apartment(true), SortKey::Id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DogFilter {
    None,
    /// Exact, case-sensitive match.
    Breed(String),
    Apartment(bool),
}

impl DogFilter {
    pub fn matches(&self, dog: &Dog) -> bool {
        match self {
            DogFilter::None => true,
            DogFilter::Breed(breed) => dog.breed == *breed,
            DogFilter::Apartment(apartment) => dog.apartment == *apartment,
        }
    }
}

/// Ascending sort keys. Ties always fall back to the id so results are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    /// Bytewise lexicographic.
    Breed,
    Weight,
}

impl SortKey {
    pub fn compare(&self, a: &Dog, b: &Dog) -> Ordering {
        let by_id = a.id.cmp(&b.id);
        match self {
            SortKey::Id => by_id,
            SortKey::Breed => a.breed.as_bytes().cmp(b.breed.as_bytes()).then(by_id),
            SortKey::Weight => a.weight.cmp(&b.weight).then(by_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogQuery {
    pub filter: DogFilter,
    pub sort: SortKey,
}

impl DogQuery {
    pub fn new(filter: DogFilter, sort: SortKey) -> Self {
        Self { filter, sort }
    }

    /// Run the query over an in-memory collection.
    pub fn apply<'a, I>(&self, dogs: I) -> Vec<Dog>
    where
        I: IntoIterator<Item = &'a Dog>,
    {
        dogs.into_iter()
            .filter(|d| self.filter.matches(d))
            .sorted_by(|a, b| self.sort.compare(a, b))
            .cloned()
            .collect()
    }
}

impl From<ListOperation> for DogQuery {
    fn from(value: ListOperation) -> Self {
        value.query()
    }
}
