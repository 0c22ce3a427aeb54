//! Events sent by the tracking snippet installed on store websites.
//!
//! The log only exists so a store owner can confirm the snippet is wired up
//! ("test connection"); it keeps the most recent [`TRACKING_LOG_LIMIT`]
//! events and drops older ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of events kept in the tracking log.
pub const TRACKING_LOG_LIMIT: usize = 20;

/// One tracked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// The store id the snippet was configured with.
    pub api_key: String,
    /// Event name, e.g. `purchase`.
    pub event_type: String,
    /// Free-form payload as sent by the snippet.
    pub event_data: serde_json::Value,
    pub session_id: Uuid,
    /// Page the event was fired from.
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Append `event`, dropping the oldest entries beyond the limit.
pub(super) fn push_capped(log: &mut Vec<TrackingEvent>, event: TrackingEvent) {
    log.push(event);
    if log.len() > TRACKING_LOG_LIMIT {
        let excess = log.len() - TRACKING_LOG_LIMIT;
        log.drain(..excess);
    }
}
