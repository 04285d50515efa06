use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<DogRepoError>>;
pub type OptRepoResult<T> = Result<Option<T>, Report<DogRepoError>>;

#[derive(Debug, thiserror::Error)]
pub enum DogRepoError {
    #[error("failed to get dog")]
    Get,
    #[error("failed to list dogs")]
    List,
    #[error("failed to count dogs")]
    Count,
    #[error("failed to create dog")]
    Create,
    #[error("failed to save dog")]
    Save,
    #[error("failed to delete dog")]
    Delete,
    #[error("failed to delete dogs by breed")]
    DeleteByBreed,
}
