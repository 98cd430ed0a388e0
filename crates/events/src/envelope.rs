use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for a published event: identity, origin and publication time.
///
/// This is the unit carried on the bus. Delivery is at-least-once, so
/// subscribers drop duplicates by `event_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    /// Module that published the event (e.g. "courses").
    source: String,

    occurred_at: DateTime<Utc>,

    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    /// Wrap a payload with a fresh event id.
    pub fn wrap(source: impl Into<String>, payload: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            source: source.into(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
