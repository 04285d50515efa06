use crate::postgres::dogs::DogRepo;
use crate::postgres::statements;
use crate::postgres::{ConnectionDetails, RepoMigrationErr};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use error_stack::{Report, ResultExt};
use std::str::FromStr;
use tokio_postgres::{Config, NoTls};
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./src/postgres/migrations");
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create repos")]
pub struct RepoCreationErr;

/// Builds a connection pool, brings the schema up to date and hands back the repository.
#[derive(Debug, Clone)]
pub struct RepoCreator {
    unique_breeds: bool,
}

impl Default for RepoCreator {
    fn default() -> Self {
        Self {
            unique_breeds: true,
        }
    }
}

impl RepoCreator {
    pub fn unique_breeds(mut self, unique_breeds: bool) -> Self {
        self.unique_breeds = unique_breeds;
        self
    }

    pub async fn create(
        self,
        connection_details: ConnectionDetails,
        pool_size: Option<usize>,
    ) -> Result<DogRepo, Report<RepoCreationErr>> {
        let config = match connection_details {
            ConnectionDetails::Url(url) => {
                Config::from_str(&url).change_context(RepoCreationErr)?
            }
        };

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(config, NoTls, mgr_config);
        let mut pool_builder = Pool::builder(mgr);
        if let Some(pool_size) = pool_size {
            pool_builder = pool_builder.max_size(pool_size);
        }
        debug!("building connection pool..");
        let pool = pool_builder.build().change_context(RepoCreationErr)?;
        debug!("connection pool built, running migrations");

        self.run_migrations(&pool)
            .await
            .change_context(RepoCreationErr)?;

        DogRepo::new(pool).await.change_context(RepoCreationErr)
    }

    // split into a separate method in case `pool_size` is 1. We need to get a hold of the only
    // connection, run the migrations, then drop it so it's freed up for initialization
    async fn run_migrations(&self, pool: &Pool) -> Result<(), Report<RepoMigrationErr>> {
        let mut handle = pool.get().await.change_context(RepoMigrationErr)?;

        let client = &mut **handle;

        embedded::migrations::runner()
            .run_async(client)
            .await
            .change_context(RepoMigrationErr)
            .attach("dogs repo")?;

        let breed_index = if self.unique_breeds {
            statements::ENABLE_UNIQUE_BREEDS
        } else {
            statements::DISABLE_UNIQUE_BREEDS
        };
        debug!("applying breed uniqueness: {breed_index}");
        client
            .batch_execute(breed_index)
            .await
            .change_context(RepoMigrationErr)
            .attach("breed uniqueness")
    }
}
