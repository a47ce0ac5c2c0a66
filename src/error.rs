use thiserror::Error;

/// Failures a post store can report. There are only two classes: either
/// the backing store could not be reached at all, or a record inside it
/// does not hold together as a post.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed post record `{id}`: {reason}")]
    Malformed { id: String, reason: String },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
