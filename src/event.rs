// src/event.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// === EVENT STRUCTURES ===
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EventId {
    pub fn new(s: &str) -> Self {
        EventId(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One upcoming event as reported by the discovery API. Fields other than the
/// id and name are kept verbatim and may be absent; placeholder text is only
/// applied when the event is rendered for a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    url: Option<String>,
    local_date: Option<String>,
    venue: Option<String>,
    city: Option<String>,
}

impl Event {
    pub fn new(
        id: EventId,
        name: String,
        url: Option<String>,
        local_date: Option<String>,
        venue: Option<String>,
        city: Option<String>,
    ) -> Self {
        Self { id, name, url, local_date, venue, city }
    }

    // Accessor methods

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn local_date(&self) -> Option<&str> {
        self.local_date.as_deref()
    }

    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event : {}", self.name)?;
        writeln!(f, "Id    : {}", self.id)?;
        if let Some(date) = &self.local_date {
            writeln!(f, "Date  : {}", date)?;
        }
        if let Some(venue) = &self.venue {
            writeln!(f, "Venue : {}", venue)?;
        }
        if let Some(city) = &self.city {
            writeln!(f, "City  : {}", city)?;
        }
        if let Some(url) = &self.url {
            writeln!(f, "Link  : {}", url)?;
        }
        Ok(())
    }
}
