//! Event payloads for the Userlens ingestion API
//!
//! Each call builds exactly one payload, serializes it as the request body and
//! drops it. Field names follow the wire format (`userId`, `groupId`), and the
//! `type` tag is written first.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Descriptive key/value attributes attached to a user or group
pub type Traits = serde_json::Map<String, serde_json::Value>;

/// Body of a `POST /event` request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventPayload<'a> {
    /// Associates a user with a set of traits
    Identify {
        #[serde(rename = "userId")]
        user_id: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        traits: Option<&'a Traits>,
    },

    /// Records that a named event happened for a user
    ///
    /// Traits are never part of this payload; `track` forwards them through
    /// a follow-up identify instead.
    Track {
        #[serde(rename = "userId")]
        user_id: &'a str,
        event: &'a str,
        timestamp: String,
        source: &'a str,
    },

    /// Associates a group (account, company) with traits and optionally a user
    Group {
        #[serde(rename = "groupId")]
        group_id: &'a str,
        source: &'a str,
        #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
        user_id: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        traits: Option<&'a Traits>,
    },
}

impl<'a> EventPayload<'a> {
    /// Build an identify payload; empty traits are left out
    pub fn identify(user_id: &'a str, traits: Option<&'a Traits>) -> Self {
        EventPayload::Identify {
            user_id,
            traits: non_empty(traits),
        }
    }

    /// Build a track payload stamped with `at`
    pub fn track(user_id: &'a str, event: &'a str, source: &'a str, at: DateTime<Utc>) -> Self {
        EventPayload::Track {
            user_id,
            event,
            timestamp: format_timestamp(at),
            source,
        }
    }

    /// Build a group payload; an empty user id and empty traits are left out
    pub fn group(
        group_id: &'a str,
        user_id: Option<&'a str>,
        traits: Option<&'a Traits>,
        source: &'a str,
    ) -> Self {
        EventPayload::Group {
            group_id,
            source,
            user_id: user_id.filter(|id| !id.is_empty()),
            traits: non_empty(traits),
        }
    }

    /// Wire name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            EventPayload::Identify { .. } => "identify",
            EventPayload::Track { .. } => "track",
            EventPayload::Group { .. } => "group",
        }
    }
}

fn non_empty(traits: Option<&Traits>) -> Option<&Traits> {
    traits.filter(|t| !t.is_empty())
}

/// ISO-8601 UTC with microseconds and a trailing `Z`
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
