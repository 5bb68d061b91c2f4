use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the outer layers of the crate: loading files and setting up logging.
/// Election operations themselves never produce these; they report failure through
/// sentinel values or [`crate::model::election::VoteError`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
