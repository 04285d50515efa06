use repositories::memory::dogs::DogRepo;
use rstest::{fixture, rstest};

mod common;

#[fixture]
fn unique() -> DogRepo {
    DogRepo::new(true)
}

#[fixture]
fn duplicates() -> DogRepo {
    DogRepo::new(false)
}

#[rstest]
#[tokio::test]
async fn get_no_data_returns_none(unique: DogRepo) {
    common::get_no_data_returns_none(&unique).await;
}

#[rstest]
#[tokio::test]
async fn create_then_get_returns_created_dog(unique: DogRepo) {
    common::create_then_get_returns_created_dog(&unique).await;
}

#[rstest]
#[tokio::test]
async fn create_assigns_distinct_ids(unique: DogRepo) {
    common::create_assigns_distinct_ids(&unique).await;
}

#[rstest]
#[tokio::test]
async fn no_dogs_list_returns_empty_vec(unique: DogRepo) {
    common::no_dogs_list_returns_empty_vec(&unique).await;
}

#[rstest]
#[tokio::test]
async fn list_all_is_ordered_by_id(unique: DogRepo) {
    common::list_all_is_ordered_by_id(&unique).await;
}

#[rstest]
#[tokio::test]
async fn list_by_breed_is_ordered_by_breed(unique: DogRepo) {
    common::list_by_breed_is_ordered_by_breed(&unique).await;
}

#[rstest]
#[tokio::test]
async fn list_by_weight_is_ordered_by_weight(unique: DogRepo) {
    common::list_by_weight_is_ordered_by_weight(&unique).await;
}

#[rstest]
#[tokio::test]
async fn find_by_breed_is_exact_and_case_sensitive(unique: DogRepo) {
    common::find_by_breed_is_exact_and_case_sensitive(&unique).await;
}

#[rstest]
#[tokio::test]
async fn find_apartment_returns_only_suitable_dogs(unique: DogRepo) {
    common::find_apartment_returns_only_suitable_dogs(&unique).await;
}

#[rstest]
#[tokio::test]
async fn save_existing_overwrites_fields_and_keeps_id(unique: DogRepo) {
    common::save_existing_overwrites_fields_and_keeps_id(&unique).await;
}

#[rstest]
#[tokio::test]
async fn save_absent_inserts_with_exact_id(unique: DogRepo) {
    common::save_absent_inserts_with_exact_id(&unique).await;
}

#[rstest]
#[tokio::test]
async fn create_after_explicit_save_does_not_reuse_id(unique: DogRepo) {
    common::create_after_explicit_save_does_not_reuse_id(&unique).await;
}

#[rstest]
#[tokio::test]
async fn delete_removes_dog_and_is_idempotent(unique: DogRepo) {
    common::delete_removes_dog_and_is_idempotent(&unique).await;
}

#[rstest]
#[tokio::test]
async fn delete_by_breed_removes_every_match(duplicates: DogRepo) {
    common::delete_by_breed_removes_every_match(&duplicates).await;
}

#[rstest]
#[tokio::test]
async fn delete_by_breed_with_no_match_removes_nothing(unique: DogRepo) {
    common::delete_by_breed_with_no_match_removes_nothing(&unique).await;
}

#[rstest]
#[tokio::test]
async fn unique_breeds_rejects_duplicates(unique: DogRepo) {
    common::unique_breeds_rejects_duplicates(&unique).await;
}

#[rstest]
#[tokio::test]
async fn duplicate_breeds_allowed_when_not_unique(duplicates: DogRepo) {
    common::duplicate_breeds_allowed_when_not_unique(&duplicates).await;
}

#[rstest]
#[tokio::test]
async fn seed_fills_empty_repo_once(unique: DogRepo) {
    common::seed_fills_empty_repo_once(&unique).await;
}

#[rstest]
#[tokio::test]
async fn ids_of_deleted_dogs_are_not_reused_after_save(unique: DogRepo) {
    common::ids_of_deleted_dogs_are_not_reused_after_save(&unique).await;
}

#[rstest]
#[tokio::test]
async fn combined_filter_and_sort(unique: DogRepo) {
    common::combined_filter_and_sort(&unique).await;
}
