// src/checker.rs
use crate::config::Config;
use crate::errors::CheckError;
use crate::event::{Event, EventId};
use crate::event_source::{EventFetcher, fetch_artist_events};
use crate::known_events::KnownEventStore;
use crate::notifier::Notifier;
use log::{debug, info};
use std::collections::HashSet;

/// Pure set subtraction: ids present in the latest fetch but not yet known.
pub fn new_event_ids(
    current: &HashSet<EventId>,
    known: &HashSet<EventId>,
) -> HashSet<EventId> {
    current.difference(known).cloned().collect()
}

/// Outcome summary of a single check run, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub known_before: usize,
    pub fetched: usize,
    pub new_events: usize,
    pub notified: bool,
}

/// Runs one check cycle: load the known set, fetch the current events, diff,
/// notify if anything is new, then persist the current set as the new known
/// set.
///
/// Error ordering matters here: a fetch or notify failure returns before the
/// save, so a failed notification leaves the previous known set on disk and
/// the same events will be re-detected (and re-notified) on the next run.
pub async fn run_check(
    config: &Config,
    fetcher: &(dyn EventFetcher + Send + Sync),
    notifier: &(dyn Notifier + Send + Sync),
    store: &KnownEventStore,
) -> Result<CheckReport, CheckError> {
    info!("--- Running concert check for artist ID: {} ---", config.artist_id);

    let known: HashSet<EventId> = store.load()?;
    info!("Found {} known events.", known.len());

    let current_events: Vec<Event> = fetch_artist_events(&config.artist_id, fetcher).await?;
    let current_ids: HashSet<EventId> =
        current_events.iter().map(|event| event.id().clone()).collect();
    info!("Fetched {} current events from API.", current_ids.len());

    let new_ids: HashSet<EventId> = new_event_ids(&current_ids, &known);

    let notified: bool = if new_ids.is_empty() {
        info!("No new events found.");
        false
    } else {
        info!("Found {} new event(s)! Sending notifications...", new_ids.len());
        // Select from the fetched list so the message keeps fetch order
        // (soonest date first), not set-iteration order.
        let new_events: Vec<Event> = current_events
            .iter()
            .filter(|event| new_ids.contains(event.id()))
            .cloned()
            .collect();
        for event in &new_events {
            debug!("New event:\n{}", event);
        }
        notifier.notify(&new_events).await?;
        true
    };

    info!("Saving updated event list.");
    store.save(&current_ids)?;
    info!("--- Check complete. ---");

    Ok(CheckReport {
        known_before: known.len(),
        fetched: current_ids.len(),
        new_events: new_ids.len(),
        notified,
    })
}
