// src/lib.rs
pub mod checker;
pub mod config;
pub mod errors;
pub mod event;
pub mod event_factory;
pub mod event_source;
pub mod known_events;
pub mod notifier;
