use thiserror::Error;

/// Failures along the dataset load path.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
