use list_filter::DogQuery;
use model::{Dog, DogId, NewDog};
use result::{OptRepoResult, RepoResult};

pub mod list_filter;
pub mod model;
pub mod result;
pub mod seed;

pub trait DogEngine: Clone + Send + Sync + 'static {
    type Repo: DogRepository + Send + Sync + 'static;

    fn repo(&self) -> Self::Repo;
}

/// Persistence contract for dogs. Implementations own all durable state and
/// whatever locking or transactional discipline they need.
pub trait DogRepository {
    fn get(&self, id: DogId) -> impl Future<Output = OptRepoResult<Dog>> + Send;

    /// Every dog matching `query.filter`, ordered by `query.sort`.
    fn list(&self, query: DogQuery) -> impl Future<Output = RepoResult<Vec<Dog>>> + Send;

    fn count(&self) -> impl Future<Output = RepoResult<u64>> + Send;

    /// Persist a dog that has never been saved. The repository assigns its id.
    fn create(&self, new_dog: NewDog) -> impl Future<Output = RepoResult<Dog>> + Send;

    /// Overwrite the dog stored under `dog.id`, or insert it under that id if there is none.
    fn save(&self, dog: Dog) -> impl Future<Output = RepoResult<Dog>> + Send;

    /// Returns `false` when there was nothing to delete. That is not an error.
    fn delete(&self, id: DogId) -> impl Future<Output = RepoResult<bool>> + Send;

    /// Removes every dog of `breed` as a single unit of work, returning how many went away.
    fn delete_by_breed(&self, breed: String) -> impl Future<Output = RepoResult<u64>> + Send;
}
