use crate::error::DogServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use dogs_core::list_filter::ListOperation;
use dogs_core::model::{Dog, DogId, NewDog};
use dogs_core::{DogEngine, DogRepository};
use error_stack::ResultExt;
use tracing::{debug, instrument};

/// Which branch of an upsert ran. Both are reported to clients the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated(Dog),
    Created(Dog),
}

impl UpsertOutcome {
    pub fn into_dog(self) -> Dog {
        match self {
            UpsertOutcome::Updated(dog) | UpsertOutcome::Created(dog) => dog,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DogService<T> {
    engine: T,
}

impl<T> DogService<T>
where
    T: DogEngine,
{
    pub fn new(engine: T) -> Self {
        DogService { engine }
    }

    #[instrument(skip(self), name = "service#list")]
    pub async fn list(&self, operation: ListOperation) -> ServiceResult<Vec<Dog>> {
        let dogs = self
            .engine
            .repo()
            .list(operation.query())
            .await
            .change_context(DogServiceError)?;

        debug!("found {} dogs", dogs.len());
        metrics::increment_dogs_retrieved_by(dogs.len());
        Ok(dogs)
    }

    #[instrument(skip(self), name = "service#get")]
    pub async fn get(&self, id: DogId) -> OptServiceResult<Dog> {
        let dog = self
            .engine
            .repo()
            .get(id)
            .await
            .change_context(DogServiceError)?;

        if dog.is_some() {
            debug!("dog {id} found");
            metrics::increment_dogs_retrieved();
        }

        Ok(dog)
    }

    #[instrument(skip_all, name = "service#create")]
    pub async fn create(&self, new_dog: NewDog) -> ServiceResult<Dog> {
        let dog = self
            .engine
            .repo()
            .create(new_dog)
            .await
            .change_context(DogServiceError)?;

        metrics::increment_dogs_created();
        Ok(dog)
    }

    /// Overwrite the dog stored under `id`, or insert `update` under exactly that id.
    #[instrument(skip(self, update), name = "service#upsert")]
    pub async fn upsert(&self, id: DogId, update: NewDog) -> ServiceResult<UpsertOutcome> {
        let repo = self.engine.repo();

        let existing = repo.get(id).await.change_context(DogServiceError)?;

        let outcome = match existing {
            Some(mut dog) => {
                dog.overwrite_with(update);
                let dog = repo.save(dog).await.change_context(DogServiceError)?;
                metrics::increment_dogs_updated();
                UpsertOutcome::Updated(dog)
            }
            None => {
                debug!("dog {id} does not exist, inserting it");
                let dog = repo
                    .save(update.with_id(id))
                    .await
                    .change_context(DogServiceError)?;
                metrics::increment_dogs_created();
                UpsertOutcome::Created(dog)
            }
        };

        Ok(outcome)
    }

    /// Returns whether a dog was actually removed.
    #[instrument(skip(self), name = "service#delete")]
    pub async fn delete(&self, id: DogId) -> ServiceResult<bool> {
        let deleted = self
            .engine
            .repo()
            .delete(id)
            .await
            .change_context(DogServiceError)?;

        if deleted {
            metrics::increment_dogs_deleted_by(1);
        }
        Ok(deleted)
    }

    #[instrument(skip(self), name = "service#delete_by_breed")]
    pub async fn delete_by_breed(&self, breed: String) -> ServiceResult<u64> {
        let deleted = self
            .engine
            .repo()
            .delete_by_breed(breed)
            .await
            .change_context(DogServiceError)?;

        debug!("deleted {deleted} dogs");
        metrics::increment_dogs_deleted_by(deleted);
        Ok(deleted)
    }
}
