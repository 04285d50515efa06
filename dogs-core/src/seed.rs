use crate::DogRepository;
use crate::model::{Dog, NewDog};
use crate::result::RepoResult;
use tracing::info;

/// breed, weight, apartment
pub const SEED_DOGS: [(&str, i32, bool); 5] = [
    ("Springer", 50, false),
    ("Bulldog", 50, true),
    ("Collie", 50, false),
    ("Boston Terrier", 35, true),
    ("Corgie", 35, true),
];

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(Vec<Dog>),
    /// The repository already held dogs, so nothing was inserted.
    Skipped { existing: u64 },
}

/// Insert [`SEED_DOGS`] into an empty repository.
pub async fn seed<R>(repo: &R) -> RepoResult<SeedOutcome>
where
    R: DogRepository,
{
    let existing = repo.count().await?;
    if existing > 0 {
        info!("repository already holds {existing} dogs, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let mut seeded = Vec::with_capacity(SEED_DOGS.len());
    for (breed, weight, apartment) in SEED_DOGS {
        let dog = repo.create(NewDog::new(breed, weight, apartment)).await?;
        info!("seeding {dog:?}");
        seeded.push(dog);
    }

    Ok(SeedOutcome::Seeded(seeded))
}
