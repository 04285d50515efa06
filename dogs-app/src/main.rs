use crate::config::{AppConfig, StoreKind};
use apps::{AppError, AppProperties, AppResult};
use axum::Router;
use dogs_core::DogRepository;
use dogs_core::seed::{self, SeedOutcome};
use dogs_routes::routes::links::LinkAssembler;
use dogs_routes::state::DogAppState;
use dotenv::dotenv;
use error_stack::ResultExt;
use error_stack::fmt::ColorMode;
use repositories::postgres::ConnectionDetails;
use repositories::postgres::initializer::RepoCreator;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("dog service shutting down"),
        Err(e) => {
            error!("dog service exited with error: {e:?}");
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("DOGS_LOG"))
        .init();
}

async fn try_main() -> AppResult<()> {
    // loaded before logging so DOGS_LOG can come from the file
    let env_file = dotenv();
    init_logging();

    if let Err(e) = env_file {
        warn!("failed to load .env file: {e}");
    }

    let config = AppConfig::from_env().change_context(AppError)?;
    debug!("loaded config: {config:?}");

    match config.store.clone() {
        StoreKind::Memory => {
            info!("using the in-memory dog store");
            let repo = repositories::memory::dogs::DogRepo::new(config.unique_breeds);
            serve(repo, config).await
        }
        StoreKind::Postgres { url, pool_size } => {
            let repo = build_postgres_repo(url, pool_size, config.unique_breeds).await?;
            serve(repo, config).await
        }
    }
}

#[instrument(skip(url))]
async fn build_postgres_repo(
    url: String,
    pool_size: Option<usize>,
    unique_breeds: bool,
) -> AppResult<repositories::postgres::dogs::DogRepo> {
    debug!("initializing postgres repository");
    RepoCreator::default()
        .unique_breeds(unique_breeds)
        .create(ConnectionDetails::Url(url), pool_size)
        .await
        .change_context(AppError)
}

async fn serve<R>(repo: R, config: AppConfig) -> AppResult<()>
where
    R: DogRepository + Clone + Send + Sync + 'static,
{
    if config.seed {
        seed_repo(&repo).await?;
    }

    let routes = build_routes(repo, &config)?;

    apps::run(
        routes,
        AppProperties {
            name: "dog service",
            port: config.port,
        },
    )
    .await
}

async fn seed_repo<R: DogRepository>(repo: &R) -> AppResult<()> {
    match seed::seed(repo).await.change_context(AppError)? {
        SeedOutcome::Seeded(dogs) => info!("seeded {} dogs", dogs.len()),
        SeedOutcome::Skipped { existing } => debug!("seed skipped, {existing} dogs present"),
    }
    Ok(())
}

fn build_routes<R>(repo: R, config: &AppConfig) -> AppResult<Router>
where
    R: DogRepository + Clone + Send + Sync + 'static,
{
    let engine = DogEngine::new(repo);
    let links = LinkAssembler::new(config.public_url.as_deref());

    debug!("building routes..");
    let state = if config.metrics {
        DogAppState::new_with_metrics(engine, links).change_context(AppError)?
    } else {
        DogAppState::new_without_metrics(engine, links)
    };

    Ok(dogs_routes::routes::build(state)).inspect(|_| debug!("routes built"))
}

#[derive(Debug, Clone)]
struct DogEngine<T> {
    repo: T,
}

impl<T> DogEngine<T> {
    fn new(repo: T) -> Self {
        Self { repo }
    }
}

impl<T> dogs_core::DogEngine for DogEngine<T>
where
    T: DogRepository + Clone + Send + Sync + 'static,
{
    type Repo = T;

    fn repo(&self) -> Self::Repo {
        self.repo.clone()
    }
}
