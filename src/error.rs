use thiserror::Error;

/// Errors reported by the clustering engine and the dataset loader.
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, KMeansError>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(KMeansError::InvalidArgument(msg.into()))
}
