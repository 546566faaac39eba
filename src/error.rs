use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Session is no longer available")]
    SessionClosed,
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            BrowserError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_decode() {
            BrowserError::Decode(err.to_string())
        } else {
            BrowserError::Network(err.to_string())
        }
    }
}

impl From<BrowserError> for String {
    fn from(err: BrowserError) -> Self {
        err.to_string()
    }
}
