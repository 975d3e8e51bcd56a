// errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TICKETMASTER_API_KEY environment variable is not set")]
    MissingApiKey,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Event source returned status: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Discovery payload parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access known-event file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Known-event file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Email credentials not set")]
    MissingCredentials,

    #[error("SMTP error: {0}")]
    Smtp(#[from] mail_send::Error),
}

// A check run short-circuits on the first of these.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}
