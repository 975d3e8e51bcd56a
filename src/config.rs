// src/config.rs
use crate::errors::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_ARTIST_ID: &str = "K8vZ9171o9f"; // Masayoshi Takanaka attraction id
pub const DEFAULT_ARTIST_NAME: &str = "Masayoshi Takanaka";
pub const DEFAULT_STATE_FILE: &str = "known_events.json";

/// Mail relay identity. Only constructed when the user, app password and
/// recipient list are all present; a partially configured mailer counts as
/// absent and surfaces as a notify-time error, matching the run ordering
/// described in the checker.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub user: String,
    pub app_password: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub artist_id: String,
    pub artist_name: String,
    pub mail: Option<MailConfig>,
    pub state_file: PathBuf,
}

impl Config {
    /// Builds the configuration from process environment variables. The only
    /// hard requirement is the discovery API key; it is checked here, before
    /// any I/O happens.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Lookup is injected so tests never touch the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = lookup("TICKETMASTER_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let artist_id = lookup("ARTIST_ID")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIST_ID.to_string());
        let artist_name = lookup("ARTIST_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIST_NAME.to_string());

        let mail = match (
            lookup("GMAIL_USER").filter(|v| !v.is_empty()),
            lookup("GMAIL_APP_PASSWORD").filter(|v| !v.is_empty()),
            lookup("RECIPIENTS").map(|v| split_recipients(&v)),
        ) {
            (Some(user), Some(app_password), Some(recipients)) if !recipients.is_empty() => {
                Some(MailConfig { user, app_password, recipients })
            }
            _ => None,
        };

        Ok(Self {
            api_key,
            artist_id,
            artist_name,
            mail,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        })
    }
}

/// Splits a comma-separated recipient list, trimming whitespace and dropping
/// empty entries.
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
