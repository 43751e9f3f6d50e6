use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArbiterError {
    #[error(
        "Events not sorted: {tournament_id} starts at {starts_at} before the preceding event at {previous}"
    )]
    EventsNotSorted {
        tournament_id: String,
        starts_at: i64,
        previous: i64,
    },

    #[error("Invalid qualification cap: {cap} (must be positive)")]
    InvalidCap { cap: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ArbiterError>;
