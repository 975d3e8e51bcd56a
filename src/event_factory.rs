// src/event_factory.rs
use crate::errors::SourceError;
use crate::event::{Event, EventId};
use serde::Deserialize;

// Serde model of the discovery response. Only the fields this crate reads are
// declared; everything else in the payload is ignored.

#[derive(Debug, Deserialize)]
pub struct DiscoveryPayload {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    id: String,
    name: String,
    url: Option<String>,
    dates: Option<ApiDates>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedVenues>,
}

#[derive(Debug, Deserialize)]
struct ApiDates {
    start: Option<ApiStart>,
}

#[derive(Debug, Deserialize)]
struct ApiStart {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedVenues {
    #[serde(default)]
    venues: Vec<ApiVenue>,
}

#[derive(Debug, Deserialize)]
struct ApiVenue {
    name: Option<String>,
    city: Option<ApiCity>,
}

#[derive(Debug, Deserialize)]
struct ApiCity {
    name: Option<String>,
}

#[derive(Debug)]
pub struct ParsedDiscovery {
    payload: DiscoveryPayload,
}

impl ParsedDiscovery {
    // An artist with zero upcoming events has no "_embedded" key at all; that
    // is a valid, empty response.
    pub fn from_json(body: &str) -> Result<Self, SourceError> {
        let payload: DiscoveryPayload = serde_json::from_str(body)?;
        Ok(Self { payload })
    }
}

pub struct EventFactory {
    event_limit: Option<usize>,
}

impl Default for EventFactory {
    fn default() -> Self {
        // Matches the request page size.
        Self { event_limit: Some(10) }
    }
}

impl EventFactory {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder method
    pub fn with_event_limit(mut self, limit: usize) -> Self {
        self.event_limit = Some(limit);
        self
    }

    pub fn create_events(&self, parsed: ParsedDiscovery) -> Vec<Event> {
        let mut events: Vec<Event> = parsed
            .payload
            .embedded
            .map(|e| e.events)
            .unwrap_or_default()
            .into_iter()
            .map(|api| {
                let venue = api.embedded.and_then(|e| e.venues.into_iter().next());
                let (venue_name, city_name) = match venue {
                    Some(v) => (v.name, v.city.and_then(|c| c.name)),
                    None => (None, None),
                };
                let local_date =
                    api.dates.and_then(|d| d.start).and_then(|s| s.local_date);

                Event::new(
                    EventId::new(&api.id),
                    api.name,
                    api.url,
                    local_date,
                    venue_name,
                    city_name,
                )
            })
            .collect();

        if let Some(limit) = self.event_limit {
            events.truncate(limit);
        }

        events
    }
}
