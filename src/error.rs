use thiserror::Error;

/// Represents all possible errors that can occur in webapitest
#[derive(Error, Debug)]
pub enum WebApiTestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Decode error in '{file}': {reason}")]
    Decode { file: String, reason: String },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Unknown traversal target '{0}': expected 'json' or 'csv'")]
    UnknownTarget(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Lifecycle hook '{hook}' failed: {reason}")]
    Lifecycle { hook: String, reason: String },

    #[error("Request error: {0}")]
    Request(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Type alias for Result with WebApiTestError
pub type Result<T> = std::result::Result<T, WebApiTestError>;
