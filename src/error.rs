use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasketError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported site: {0}")]
    UnsupportedSite(String),

    #[error("Extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BasketError>;
