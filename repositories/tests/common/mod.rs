//! Assertions every `DogRepository` has to satisfy, whatever it stores dogs in.
#![allow(dead_code)]

use dogs_core::DogRepository;
use dogs_core::list_filter::{DogFilter, DogQuery, ListOperation, SortKey};
use dogs_core::model::{Dog, DogId, NewDog};
use dogs_core::seed::{self, SEED_DOGS, SeedOutcome};

async fn create_all<R: DogRepository>(repo: &R, dogs: &[(&str, i32, bool)]) -> Vec<Dog> {
    let mut created = Vec::new();
    for (breed, weight, apartment) in dogs {
        created.push(
            repo.create(NewDog::new(*breed, *weight, *apartment))
                .await
                .expect("dog creation works"),
        );
    }
    created
}

fn ids(dogs: &[Dog]) -> Vec<DogId> {
    dogs.iter().map(|d| d.id).collect()
}

pub async fn get_no_data_returns_none<R: DogRepository>(repo: &R) {
    let result = repo.get(DogId(1)).await.unwrap();

    assert!(result.is_none());
}

pub async fn create_then_get_returns_created_dog<R: DogRepository>(repo: &R) {
    let created = repo.create(NewDog::new("Poodle", 20, true)).await.unwrap();

    let found = repo
        .get(created.id)
        .await
        .unwrap()
        .expect("recently created dog exists");

    assert_eq!(created, found);
    assert_eq!("Poodle", found.breed);
    assert_eq!(20, found.weight);
    assert!(found.apartment);
}

pub async fn create_assigns_distinct_ids<R: DogRepository>(repo: &R) {
    let created = create_all(repo, &[("Pug", 9, true), ("Beagle", 11, true)]).await;

    assert_ne!(created[0].id, created[1].id);
}

pub async fn no_dogs_list_returns_empty_vec<R: DogRepository>(repo: &R) {
    let dogs = repo.list(ListOperation::All.query()).await.unwrap();

    assert!(dogs.is_empty());
    assert_eq!(0, repo.count().await.unwrap());
}

pub async fn list_all_is_ordered_by_id<R: DogRepository>(repo: &R) {
    let created = seeded(repo).await;

    let listed = repo.list(ListOperation::All.query()).await.unwrap();

    assert_eq!(ids(&created), ids(&listed));
}

pub async fn list_by_breed_is_ordered_by_breed<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let listed = repo.list(ListOperation::ByBreed.query()).await.unwrap();

    let breeds: Vec<_> = listed.iter().map(|d| d.breed.as_str()).collect();
    assert_eq!(
        vec!["Boston Terrier", "Bulldog", "Collie", "Corgie", "Springer"],
        breeds
    );
}

pub async fn list_by_weight_is_ordered_by_weight<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let listed = repo.list(ListOperation::ByWeight.query()).await.unwrap();

    assert_eq!(5, listed.len());
    assert!(listed.windows(2).all(|w| w[0].weight <= w[1].weight));
}

pub async fn find_by_breed_is_exact_and_case_sensitive<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let found = repo
        .list(ListOperation::Breed("Collie".into()).query())
        .await
        .unwrap();
    assert_eq!(1, found.len());
    assert_eq!("Collie", found[0].breed);

    let found = repo
        .list(ListOperation::Breed("collie".into()).query())
        .await
        .unwrap();
    assert!(found.is_empty(), "lowercase breed does not match");

    let found = repo
        .list(ListOperation::Breed("Col".into()).query())
        .await
        .unwrap();
    assert!(found.is_empty(), "prefix does not match");
}

pub async fn find_apartment_returns_only_suitable_dogs<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let found = repo.list(ListOperation::Apartment.query()).await.unwrap();

    let breeds: Vec<_> = found.iter().map(|d| d.breed.as_str()).collect();
    assert_eq!(vec!["Bulldog", "Boston Terrier", "Corgie"], breeds);
}

pub async fn save_existing_overwrites_fields_and_keeps_id<R: DogRepository>(repo: &R) {
    let created = repo.create(NewDog::new("Collie", 50, false)).await.unwrap();

    let saved = repo
        .save(NewDog::new("Border Collie", 45, true).with_id(created.id))
        .await
        .unwrap();

    assert_eq!(created.id, saved.id);
    assert_eq!(Some(saved), repo.get(created.id).await.unwrap());
    assert_eq!(1, repo.count().await.unwrap());
}

pub async fn save_absent_inserts_with_exact_id<R: DogRepository>(repo: &R) {
    let saved = repo
        .save(Dog::new(DogId(42), "Husky", 60, false))
        .await
        .unwrap();

    assert_eq!(DogId(42), saved.id);
    assert_eq!(Some(saved), repo.get(DogId(42)).await.unwrap());
}

pub async fn create_after_explicit_save_does_not_reuse_id<R: DogRepository>(repo: &R) {
    repo.save(Dog::new(DogId(7), "Husky", 60, false))
        .await
        .unwrap();

    let new_dogs: Vec<_> = [
        "Pug", "Beagle", "Boxer", "Akita", "Vizsla", "Whippet", "Saluki", "Basenji",
    ]
    .into_iter()
    .map(|breed| (breed, 10, true))
    .collect();
    let created = create_all(repo, &new_dogs).await;

    assert!(created.iter().all(|d| d.id != DogId(7)));
    assert_eq!(9, repo.count().await.unwrap());
}

pub async fn ids_of_deleted_dogs_are_not_reused_after_save<R: DogRepository>(repo: &R) {
    let created = create_all(
        repo,
        &[("Pug", 9, true), ("Beagle", 11, true), ("Boxer", 30, false)],
    )
    .await;
    let deleted = created[2].id;
    repo.delete(deleted).await.unwrap();

    repo.save(NewDog::new("Pug", 10, true).with_id(created[0].id))
        .await
        .unwrap();
    let next = repo.create(NewDog::new("Akita", 70, false)).await.unwrap();

    assert_ne!(deleted, next.id);
    assert!(next.id > deleted);
}

pub async fn delete_removes_dog_and_is_idempotent<R: DogRepository>(repo: &R) {
    let created = repo.create(NewDog::new("Pug", 9, true)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get(created.id).await.unwrap().is_none());
    assert!(
        !repo.delete(created.id).await.unwrap(),
        "second delete finds nothing but still succeeds"
    );
}

/// Needs a repository that allows duplicate breeds.
pub async fn delete_by_breed_removes_every_match<R: DogRepository>(repo: &R) {
    create_all(
        repo,
        &[("Pug", 9, true), ("Beagle", 11, true), ("Pug", 8, true)],
    )
    .await;

    let removed = repo.delete_by_breed("Pug".into()).await.unwrap();

    assert_eq!(2, removed);
    assert!(
        repo.list(ListOperation::Breed("Pug".into()).query())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(1, repo.count().await.unwrap());
}

pub async fn delete_by_breed_with_no_match_removes_nothing<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let removed = repo.delete_by_breed("Poodle".into()).await.unwrap();

    assert_eq!(0, removed);
    assert_eq!(5, repo.count().await.unwrap());
}

/// Needs a repository that enforces unique breeds.
pub async fn unique_breeds_rejects_duplicates<R: DogRepository>(repo: &R) {
    let first = repo.create(NewDog::new("Pug", 9, true)).await.unwrap();

    assert!(repo.create(NewDog::new("Pug", 8, false)).await.is_err());

    let other = repo.create(NewDog::new("Beagle", 11, true)).await.unwrap();
    assert!(
        repo.save(NewDog::new("Pug", 11, true).with_id(other.id))
            .await
            .is_err()
    );

    // re-saving a dog under its own breed is not a conflict
    repo.save(NewDog::new("Pug", 10, true).with_id(first.id))
        .await
        .unwrap();
}

/// Needs a repository that allows duplicate breeds.
pub async fn duplicate_breeds_allowed_when_not_unique<R: DogRepository>(repo: &R) {
    create_all(repo, &[("Pug", 9, true), ("Pug", 8, false)]).await;

    let found = repo
        .list(ListOperation::Breed("Pug".into()).query())
        .await
        .unwrap();
    assert_eq!(2, found.len());
}

pub async fn seed_fills_empty_repo_once<R: DogRepository>(repo: &R) {
    let outcome = seed::seed(repo).await.unwrap();

    let SeedOutcome::Seeded(dogs) = outcome else {
        panic!("empty repository should be seeded");
    };
    let seeded: Vec<_> = dogs
        .iter()
        .map(|d| (d.breed.as_str(), d.weight, d.apartment))
        .collect();
    assert_eq!(SEED_DOGS.to_vec(), seeded);

    assert_eq!(
        SeedOutcome::Skipped { existing: 5 },
        seed::seed(repo).await.unwrap()
    );
    assert_eq!(5, repo.count().await.unwrap());
}

async fn seeded<R: DogRepository>(repo: &R) -> Vec<Dog> {
    match seed::seed(repo).await.expect("seeding works") {
        SeedOutcome::Seeded(dogs) => dogs,
        SeedOutcome::Skipped { .. } => panic!("tests expect an empty repository"),
    }
}

/// Filter and sort combine freely, not only in the pairs the list operations name.
pub async fn combined_filter_and_sort<R: DogRepository>(repo: &R) {
    seeded(repo).await;

    let apartment_by_weight = repo
        .list(DogQuery::new(DogFilter::Apartment(true), SortKey::Weight))
        .await
        .unwrap();
    let breeds: Vec<_> = apartment_by_weight.iter().map(|d| d.breed.as_str()).collect();
    assert_eq!(vec!["Boston Terrier", "Corgie", "Bulldog"], breeds);

    let not_apartment_by_breed = repo
        .list(DogQuery::new(DogFilter::Apartment(false), SortKey::Breed))
        .await
        .unwrap();
    let breeds: Vec<_> = not_apartment_by_breed
        .iter()
        .map(|d| d.breed.as_str())
        .collect();
    assert_eq!(vec!["Collie", "Springer"], breeds);

    let collie_by_weight = repo
        .list(DogQuery::new(DogFilter::Breed("Collie".into()), SortKey::Weight))
        .await
        .unwrap();
    assert_eq!(1, collie_by_weight.len());
}
