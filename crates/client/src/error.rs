use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Closed taxonomy for remote-call failures.
///
/// Every failure crossing the API client boundary is mapped into
/// exactly one of these kinds with a user-presentable message; a raw
/// `reqwest::Error` never leaves the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timeout. Please check your internet connection.")]
    Timeout,
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid data provided for {0}")]
    BadRequest(String),
    #[error("Server error. Please try again later.")]
    ServerError,
    /// Structured message carried in the response body.
    #[error("{0}")]
    ServerMessage(String),
    /// Fallback kind; the message is still actionable.
    #[error("{0}")]
    Unknown(String),
}

/// Application errors outside the remote-call path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
}
