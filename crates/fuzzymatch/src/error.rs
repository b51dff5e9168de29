#[derive(Debug, thiserror::Error)]
pub enum FuzzyMatchError {
    #[error("Path not tracked: {0}")]
    NotFound(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FuzzyMatchError>;

impl From<ignore::Error> for FuzzyMatchError {
    fn from(error: ignore::Error) -> Self {
        Self::Walk(error.to_string())
    }
}
