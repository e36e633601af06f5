use thiserror::Error;

/// Errors a bot command can end with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NhlError {
    #[error("{0}")]
    InvalidDateFormat(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No game found for {team} on {date}.")]
    NoGameFound { team: String, date: String },

    #[error("Unexpected data from the stats API: {0}")]
    UpstreamShape(String),

    #[error("{0}")]
    Usage(String),
}

impl NhlError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        NhlError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for NhlError {
    fn from(err: serde_json::Error) -> Self {
        NhlError::UpstreamShape(err.to_string())
    }
}

/// Result type for bot operations
pub type NhlResult<T> = Result<T, NhlError>;
