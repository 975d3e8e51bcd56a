// src/event_source.rs
use crate::errors::SourceError;
use crate::event::Event;
use crate::event_factory::{EventFactory, ParsedDiscovery};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use url::Url;

pub const DISCOVERY_URL: &str = "https://app.ticketmaster.com/discovery/v2/events.json";

// Request page size; the API returns the soonest events first under
// sort=date,asc, so these are the 10 soonest-upcoming ones.
pub const PAGE_SIZE: u32 = 10;

// ===== fetcher
#[async_trait]
pub trait EventFetcher: Send + Sync {
    /// Fetches the raw discovery response body for the given attraction id.
    async fn fetch(&self, artist_id: &str) -> Result<String, SourceError>;
}

// ===== Live http fetcher
pub struct HttpEventFetcher {
    client: Client,
    api_key: String,
}

impl HttpEventFetcher {
    pub fn new(api_key: String) -> Self {
        const APP_USER_AGENT: &str = concat!("gigwatch/", env!("CARGO_PKG_VERSION"));

        let client: Client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create request client.");

        Self { client, api_key }
    }

    fn request_url(&self, artist_id: &str) -> Result<Url, SourceError> {
        let url = Url::parse_with_params(
            DISCOVERY_URL,
            &[
                ("attractionId", artist_id),
                ("apikey", self.api_key.as_str()),
                ("sort", "date,asc"),
                ("size", &PAGE_SIZE.to_string()),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl EventFetcher for HttpEventFetcher {
    async fn fetch(&self, artist_id: &str) -> Result<String, SourceError> {
        let url: Url = self.request_url(artist_id)?;
        info!("HttpEventFetcher: fetching events for attraction {}", artist_id);

        let response: Response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::BadStatus(response.status()));
        }
        debug!("HttpEventFetcher: got status {}", response.status());
        Ok(response.text().await?)
    }
}

// ===== Fake fetcher for testing
pub struct FakeFetcher {
    pub response: Result<String, reqwest::StatusCode>,
}

impl FakeFetcher {
    pub fn with_body(body: &str) -> Self {
        Self { response: Ok(body.to_string()) }
    }

    pub fn with_status(status: reqwest::StatusCode) -> Self {
        Self { response: Err(status) }
    }
}

#[async_trait]
impl EventFetcher for FakeFetcher {
    async fn fetch(&self, _artist_id: &str) -> Result<String, SourceError> {
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(SourceError::BadStatus(*status)),
        }
    }
}

// Fetch-and-parse composition used by the checker.
pub async fn fetch_artist_events(
    artist_id: &str,
    fetcher: &(dyn EventFetcher + Send + Sync),
) -> Result<Vec<Event>, SourceError> {
    let body: String = fetcher.fetch(artist_id).await?;
    debug!("fetch_artist_events: body length {}", body.len());
    let parsed: ParsedDiscovery = ParsedDiscovery::from_json(&body)?;
    Ok(EventFactory::new().create_events(parsed))
}
