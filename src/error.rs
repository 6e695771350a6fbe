/// Error types for the gallery
///
/// API errors are cloneable because they travel inside iced messages
/// from the background fetch back to the update loop.

use thiserror::Error;

/// Failure of a single request against the photo API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout...
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded as the expected JSON
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured API URL could not be turned into a request URL
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// No access key configured, the request was never sent
    #[error("no Unsplash access key configured (set UNSPLASH_ACCESS_KEY)")]
    MissingAccessKey,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Failure loading or saving the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
