use dogs_core::DogRepository;
use dogs_core::list_filter::DogQuery;
use dogs_core::model::{Dog, DogId, NewDog};
use dogs_core::result::{DogRepoError, OptRepoResult, RepoResult};
use error_stack::{IntoReport, ResultExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Kennel {
    dogs: BTreeMap<DogId, Dog>,
    last_id: i64,
}

impl Kennel {
    fn breed_taken(&self, breed: &str, except: Option<DogId>) -> bool {
        self.dogs
            .values()
            .any(|d| d.breed == breed && Some(d.id) != except)
    }

    fn next_id(&mut self) -> Option<DogId> {
        self.last_id = self.last_id.checked_add(1)?;
        Some(DogId(self.last_id))
    }
}

/// Process-local repository. Dogs live as long as the process does.
#[derive(Debug, Clone)]
pub struct DogRepo {
    kennel: Arc<RwLock<Kennel>>,
    unique_breeds: bool,
}

impl DogRepo {
    pub fn new(unique_breeds: bool) -> Self {
        Self {
            kennel: Arc::default(),
            unique_breeds,
        }
    }
}

impl DogRepository for DogRepo {
    async fn get(&self, id: DogId) -> OptRepoResult<Dog> {
        Ok(self.kennel.read().await.dogs.get(&id).cloned())
    }

    async fn list(&self, query: DogQuery) -> RepoResult<Vec<Dog>> {
        Ok(query.apply(self.kennel.read().await.dogs.values()))
    }

    async fn count(&self) -> RepoResult<u64> {
        let count = self.kennel.read().await.dogs.len();
        u64::try_from(count).change_context(DogRepoError::Count)
    }

    async fn create(&self, new_dog: NewDog) -> RepoResult<Dog> {
        let mut kennel = self.kennel.write().await;

        if self.unique_breeds && kennel.breed_taken(&new_dog.breed, None) {
            return Err(DogRepoError::Create.into_report())
                .attach_with(|| format!("breed '{}' already exists", new_dog.breed));
        }

        let id = kennel
            .next_id()
            .ok_or(DogRepoError::Create)
            .attach("dog ids are exhausted")?;
        let dog = new_dog.with_id(id);
        kennel.dogs.insert(id, dog.clone());
        debug!("created dog {id}");
        Ok(dog)
    }

    async fn save(&self, dog: Dog) -> RepoResult<Dog> {
        let mut kennel = self.kennel.write().await;

        if self.unique_breeds && kennel.breed_taken(&dog.breed, Some(dog.id)) {
            return Err(DogRepoError::Save.into_report())
                .attach_with(|| format!("breed '{}' already exists", dog.breed));
        }

        // ids handed out by `create` must never land on one inserted here
        kennel.last_id = kennel.last_id.max(dog.id.get());
        kennel.dogs.insert(dog.id, dog.clone());
        debug!("saved dog {}", dog.id);
        Ok(dog)
    }

    async fn delete(&self, id: DogId) -> RepoResult<bool> {
        Ok(self.kennel.write().await.dogs.remove(&id).is_some())
    }

    async fn delete_by_breed(&self, breed: String) -> RepoResult<u64> {
        let mut kennel = self.kennel.write().await;
        let before = kennel.dogs.len();
        kennel.dogs.retain(|_, d| d.breed != breed);
        let removed = before - kennel.dogs.len();
        u64::try_from(removed).change_context(DogRepoError::DeleteByBreed)
    }
}
