//! HTTP client for the Userlens ingestion API
//!
//! Every public operation runs a `Result`-returning pipeline and converts a
//! failure into a logged error plus `None` at its boundary, so nothing
//! escapes to the caller.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::logging::LOG_TARGET;

use super::events::{EventPayload, Traits};

/// Returned by [`EventTracker::identify`] on success
pub const IDENTIFY_SUCCESS: &str = "User identified successfully";

/// Returned by [`EventTracker::track`] on success
pub const TRACK_SUCCESS: &str = "Event tracked successfully";

/// Returned by [`EventTracker::group`] on success
pub const GROUP_SUCCESS: &str = "Group identified successfully";

/// HTTP client for the Userlens ingestion API
///
/// Immutable after construction; share it behind an `Arc` to use it from
/// several tasks.
#[derive(Clone)]
pub struct EventTracker {
    http_client: reqwest::Client,
    encoded_credential: String,
    timeout: Duration,
    base_url: String,
    source: String,
}

impl EventTracker {
    /// Create a tracker for `write_code` with the default 5 second timeout
    pub fn new(write_code: impl Into<String>) -> Result<Self> {
        Self::from_config(TrackerConfig::new(write_code))
    }

    /// Create a tracker with an explicit per-request timeout in seconds
    pub fn with_timeout(write_code: impl Into<String>, requests_timeout: u64) -> Result<Self> {
        Self::from_config(TrackerConfig {
            requests_timeout,
            ..TrackerConfig::new(write_code)
        })
    }

    /// Create a tracker from configuration
    ///
    /// Returns an error if the write code is missing or empty, the timeout is
    /// zero, or the ingestor URL is blank.
    pub fn from_config(config: TrackerConfig) -> Result<Self> {
        config.validate()?;

        let write_code = config
            .write_code
            .as_deref()
            .ok_or_else(|| Error::Config("write_code is required and must be a string".to_string()))?;

        // The raw write code is encoded as-is, without a `user:` pair.
        let encoded_credential = STANDARD.encode(write_code);

        let mut auth_value = HeaderValue::from_str(&format!("Basic {}", encoded_credential))
            .map_err(|e| Error::Config(format!("invalid write_code: {}", e)))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let timeout = Duration::from_secs(config.requests_timeout);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            encoded_credential,
            timeout,
            base_url: config.ingestor_url.trim_end_matches('/').to_string(),
            source: config.source,
        })
    }

    /// Base64 encoding of the write code, as sent in the Authorization header
    pub fn encoded_credential(&self) -> &str {
        &self.encoded_credential
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ingestion base URL, without a trailing slash
    pub fn ingestor_url(&self) -> &str {
        &self.base_url
    }

    /// Client identifier sent with track and group events
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Send an identify event
    ///
    /// Returns [`IDENTIFY_SUCCESS`] when the endpoint answers 200, otherwise
    /// logs the failure and returns `None`.
    pub async fn identify(&self, user_id: &str, traits: Option<&Traits>) -> Option<&'static str> {
        match self.try_identify(user_id, traits).await {
            Ok(()) => Some(IDENTIFY_SUCCESS),
            Err(e) => {
                report_failure("identify", &e);
                None
            }
        }
    }

    /// Send a track event, then forward `traits` through [`identify`](Self::identify)
    ///
    /// Returns [`TRACK_SUCCESS`] once the track event itself is accepted,
    /// whatever the outcome of the follow-up identify.
    pub async fn track(
        &self,
        user_id: &str,
        event_name: &str,
        traits: Option<&Traits>,
    ) -> Option<&'static str> {
        match self.try_track(user_id, event_name).await {
            Ok(()) => {
                // Logs its own failure; does not affect the track outcome.
                self.identify(user_id, traits).await;
                Some(TRACK_SUCCESS)
            }
            Err(e) => {
                report_failure("track", &e);
                None
            }
        }
    }

    /// Send a group event
    ///
    /// Returns [`GROUP_SUCCESS`] when the endpoint answers 200, otherwise
    /// logs the failure and returns `None`.
    pub async fn group(
        &self,
        group_id: &str,
        user_id: Option<&str>,
        traits: Option<&Traits>,
    ) -> Option<&'static str> {
        match self.try_group(group_id, user_id, traits).await {
            Ok(()) => Some(GROUP_SUCCESS),
            Err(e) => {
                report_failure("group", &e);
                None
            }
        }
    }

    async fn try_identify(&self, user_id: &str, traits: Option<&Traits>) -> Result<()> {
        require("user_id", user_id)?;
        self.send_event(&EventPayload::identify(user_id, traits)).await
    }

    async fn try_track(&self, user_id: &str, event_name: &str) -> Result<()> {
        require("user_id", user_id)?;
        require("event_name", event_name)?;
        let payload = EventPayload::track(user_id, event_name, &self.source, Utc::now());
        self.send_event(&payload).await
    }

    async fn try_group(
        &self,
        group_id: &str,
        user_id: Option<&str>,
        traits: Option<&Traits>,
    ) -> Result<()> {
        require("group_id", group_id)?;
        let payload = EventPayload::group(group_id, user_id, traits, &self.source);
        self.send_event(&payload).await
    }

    /// POST one payload to `/event`
    ///
    /// Only a 200 counts as success. Any other status becomes
    /// [`Error::Api`] carrying the JSON error body when it parses.
    async fn send_event(&self, payload: &EventPayload<'_>) -> Result<()> {
        let url = format!("{}/event", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if status == StatusCode::OK {
            tracing::debug!(
                target: LOG_TARGET,
                event_type = payload.event_type(),
                "Event accepted by ingestion endpoint"
            );
            return Ok(());
        }

        let body = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok());

        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout(self.timeout.as_secs())
        } else {
            Error::Transport(error.to_string())
        }
    }
}

impl fmt::Debug for EventTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTracker")
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", name)));
    }
    Ok(())
}

pub(super) fn report_failure(operation: &'static str, error: &Error) {
    tracing::error!(
        target: LOG_TARGET,
        operation,
        error = %error,
        "Error in userlens-sdk-rs: {}",
        error
    );
}
