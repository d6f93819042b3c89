use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForestayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay returned {status} for {url}")]
    Relay { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Accommodation not found: {0}")]
    AccommodationNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Guide error: {0}")]
    Guide(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ForestayError>;
