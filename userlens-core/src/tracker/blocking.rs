//! Blocking wrapper around [`EventTracker`]

use std::future::Future;

use crate::config::TrackerConfig;
use crate::error::{Error, Result};

use super::client::{report_failure, EventTracker};
use super::events::Traits;

/// Synchronous wrapper for EventTracker
///
/// Provides blocking methods for use in synchronous code. Each call blocks
/// the calling thread until its request(s) finish or time out.
///
/// Called from inside an async runtime, every operation sends nothing, logs
/// a configuration error and returns `None`. Async code should call
/// [`EventTracker`] directly.
pub struct SyncEventTracker {
    inner: EventTracker,
    /// Always `Some` until dropped
    runtime: Option<tokio::runtime::Runtime>,
}

impl SyncEventTracker {
    /// Create a blocking tracker for `write_code` with the default timeout
    pub fn new(write_code: impl Into<String>) -> Result<Self> {
        Self::from_config(TrackerConfig::new(write_code))
    }

    /// Create a blocking tracker with an explicit per-request timeout in seconds
    pub fn with_timeout(write_code: impl Into<String>, requests_timeout: u64) -> Result<Self> {
        Self::from_config(TrackerConfig {
            requests_timeout,
            ..TrackerConfig::new(write_code)
        })
    }

    /// Create a blocking tracker from configuration
    pub fn from_config(config: TrackerConfig) -> Result<Self> {
        let inner = EventTracker::from_config(config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to create runtime: {}", e)))?;

        Ok(Self {
            inner,
            runtime: Some(runtime),
        })
    }

    /// Send an identify event (blocking)
    pub fn identify(&self, user_id: &str, traits: Option<&Traits>) -> Option<&'static str> {
        self.block_on("identify", self.inner.identify(user_id, traits))
    }

    /// Send a track event followed by an identify (blocking)
    pub fn track(
        &self,
        user_id: &str,
        event_name: &str,
        traits: Option<&Traits>,
    ) -> Option<&'static str> {
        self.block_on("track", self.inner.track(user_id, event_name, traits))
    }

    /// Send a group event (blocking)
    pub fn group(
        &self,
        group_id: &str,
        user_id: Option<&str>,
        traits: Option<&Traits>,
    ) -> Option<&'static str> {
        self.block_on("group", self.inner.group(group_id, user_id, traits))
    }

    /// The async tracker this wrapper drives
    pub fn inner(&self) -> &EventTracker {
        &self.inner
    }

    /// Drive `call` to completion on the owned runtime
    ///
    /// tokio panics on a nested `block_on`, so a call made from async code is
    /// reported as a failure instead of being run.
    fn block_on<F>(&self, operation: &'static str, call: F) -> Option<&'static str>
    where
        F: Future<Output = Option<&'static str>>,
    {
        if tokio::runtime::Handle::try_current().is_ok() {
            report_failure(
                operation,
                &Error::Config("SyncEventTracker used inside an async runtime".to_string()),
            );
            return None;
        }

        self.runtime.as_ref()?.block_on(call)
    }
}

impl Drop for SyncEventTracker {
    fn drop(&mut self) {
        // A plain drop panics when it happens inside another runtime.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for SyncEventTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEventTracker")
            .field("inner", &self.inner)
            .finish()
    }
}
