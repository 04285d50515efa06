use crate::postgres::statements::{self, Sql};
use crate::postgres::RepoInitErr;
use deadpool_postgres::{Object, Pool};
use dogs_core::DogRepository;
use dogs_core::list_filter::{DogFilter, DogQuery};
use dogs_core::model::{Dog, DogId, NewDog};
use dogs_core::result::{DogRepoError, OptRepoResult, RepoResult};
use error_stack::{Report, ResultExt};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tokio_stream::StreamExt;
use tracing::debug;

#[derive(Clone)]
pub struct DogRepo {
    pool: Pool,
}

impl std::fmt::Debug for DogRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DogRepo")
            .field("pool", &self.pool.status())
            .finish()
    }
}

impl DogRepo {
    /// Checks out a connection and prepares every statement on it so broken SQL
    /// shows up at startup instead of on the first request.
    pub async fn new(pool: Pool) -> Result<Self, Report<RepoInitErr>> {
        {
            let handle = pool.get().await.change_context(RepoInitErr::dogs())?;
            for sql in [
                statements::GET,
                statements::LIST_ALL,
                statements::LIST_BY_BREED,
                statements::LIST_BY_WEIGHT,
                statements::FIND_BY_BREED,
                statements::FIND_BY_BREED_BY_WEIGHT,
                statements::FIND_BY_APARTMENT,
                statements::FIND_BY_APARTMENT_BY_BREED,
                statements::FIND_BY_APARTMENT_BY_WEIGHT,
                statements::COUNT,
                statements::CREATE,
                statements::SAVE,
                statements::ADVANCE_ID_SEQUENCE,
                statements::DELETE,
                statements::DELETE_BY_BREED,
            ] {
                sql.prepare(&handle)
                    .await
                    .change_context(RepoInitErr::dogs())?;
            }
        }

        Ok(Self { pool })
    }

    async fn client(&self, on_err: DogRepoError) -> RepoResult<Object> {
        self.pool.get().await.change_context(on_err)
    }
}

fn row_to_dog(row: Row) -> Dog {
    Dog::new(
        DogId(row.get("id")),
        row.get::<_, String>("breed"),
        row.get("weight"),
        row.get("apartment"),
    )
}

fn query_params(query: &DogQuery) -> Vec<&(dyn ToSql + Sync)> {
    match &query.filter {
        DogFilter::None => vec![],
        DogFilter::Breed(breed) => vec![breed as &(dyn ToSql + Sync)],
        DogFilter::Apartment(apartment) => vec![apartment as &(dyn ToSql + Sync)],
    }
}

impl DogRepository for DogRepo {
    async fn get(&self, id: DogId) -> OptRepoResult<Dog> {
        let client = self.client(DogRepoError::Get).await?;
        let statement = statements::GET
            .prepare(&client)
            .await
            .change_context(DogRepoError::Get)?;

        let dog = client
            .query_opt(&statement, &[&id.get()])
            .await
            .change_context(DogRepoError::Get)?
            .map(row_to_dog);
        Ok(dog)
    }

    async fn list(&self, query: DogQuery) -> RepoResult<Vec<Dog>> {
        let client = self.client(DogRepoError::List).await?;
        let sql: Sql = statements::for_query(&query);
        let statement = sql
            .prepare(&client)
            .await
            .change_context(DogRepoError::List)?;

        let dogs = client
            .query_raw(&statement, query_params(&query))
            .await
            .change_context(DogRepoError::List)?
            .map(|r| r.map(row_to_dog))
            .collect::<Result<Vec<_>, _>>()
            .await;

        dogs.change_context(DogRepoError::List)
    }

    async fn count(&self) -> RepoResult<u64> {
        let client = self.client(DogRepoError::Count).await?;
        let statement = statements::COUNT
            .prepare(&client)
            .await
            .change_context(DogRepoError::Count)?;

        let count: i64 = client
            .query_one(&statement, &[])
            .await
            .change_context(DogRepoError::Count)?
            .get("count");

        u64::try_from(count).change_context(DogRepoError::Count)
    }

    async fn create(&self, new_dog: NewDog) -> RepoResult<Dog> {
        let client = self.client(DogRepoError::Create).await?;
        let statement = statements::CREATE
            .prepare(&client)
            .await
            .change_context(DogRepoError::Create)?;

        client
            .query_one(
                &statement,
                &[&new_dog.breed, &new_dog.weight, &new_dog.apartment],
            )
            .await
            .change_context(DogRepoError::Create)
            .attach_with(|| format!("breed '{}'", new_dog.breed))
            .map(row_to_dog)
    }

    async fn save(&self, dog: Dog) -> RepoResult<Dog> {
        let mut client = self.client(DogRepoError::Save).await?;
        let tx = client
            .transaction()
            .await
            .change_context(DogRepoError::Save)?;

        let save = statements::SAVE
            .prepare(&tx)
            .await
            .change_context(DogRepoError::Save)?;
        let advance = statements::ADVANCE_ID_SEQUENCE
            .prepare(&tx)
            .await
            .change_context(DogRepoError::Save)?;

        let saved = tx
            .query_one(
                &save,
                &[&dog.id.get(), &dog.breed, &dog.weight, &dog.apartment],
            )
            .await
            .change_context(DogRepoError::Save)
            .attach_with(|| format!("dog {} with breed '{}'", dog.id, dog.breed))
            .map(row_to_dog)?;

        tx.execute(&advance, &[&saved.id.get()])
            .await
            .change_context(DogRepoError::Save)
            .attach("failed to advance the dogs id sequence")?;

        tx.commit().await.change_context(DogRepoError::Save)?;
        debug!("saved dog {}", saved.id);
        Ok(saved)
    }

    async fn delete(&self, id: DogId) -> RepoResult<bool> {
        let client = self.client(DogRepoError::Delete).await?;
        let statement = statements::DELETE
            .prepare(&client)
            .await
            .change_context(DogRepoError::Delete)?;

        let deleted = client
            .execute(&statement, &[&id.get()])
            .await
            .change_context(DogRepoError::Delete)?;
        Ok(deleted > 0)
    }

    async fn delete_by_breed(&self, breed: String) -> RepoResult<u64> {
        let client = self.client(DogRepoError::DeleteByBreed).await?;
        let statement = statements::DELETE_BY_BREED
            .prepare(&client)
            .await
            .change_context(DogRepoError::DeleteByBreed)?;

        client
            .execute(&statement, &[&breed])
            .await
            .change_context(DogRepoError::DeleteByBreed)
    }
}
