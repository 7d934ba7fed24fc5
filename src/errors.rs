use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed job: {0}")]
    MalformedJob(String),

    #[error("reference model has no id")]
    MissingIdentifier,

    #[error("reference model id is not a valid UUID: {0}")]
    InvalidIdentifier(String),

    #[error("notification service request failed: {0}")]
    Transport(String),

    #[error("notification service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("invalid notification service response: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// True for failures of the notification service round-trip.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::UpstreamStatus { .. } | AppError::Decode(_)
        )
    }
}

impl From<reqwest_middleware::Error> for AppError {
    fn from(e: reqwest_middleware::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}
