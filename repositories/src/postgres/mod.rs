pub mod dogs;
pub mod initializer;
mod statements;

pub enum ConnectionDetails {
    Url(String),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to initialize postgres {0} repo")]
pub struct RepoInitErr(&'static str);

impl RepoInitErr {
    fn dogs() -> Self {
        Self("dogs")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to run postgres migrations")]
pub struct RepoMigrationErr;
