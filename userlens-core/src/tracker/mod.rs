//! Userlens event tracker
//!
//! Sends `identify`, `track` and `group` events to the Userlens ingestion
//! endpoint (`POST {ingestor_url}/event`).
//!
//! ## Delivery model
//!
//! Every call is best effort and makes a single attempt:
//! - No batching, queuing or retries
//! - Failures (bad input, network errors, non-200 responses) are logged
//!   through `tracing` and reported to the caller as `None`
//! - A successful call returns a fixed confirmation message
//!
//! `track` sends the track event first and, once it is accepted, forwards the
//! same traits through `identify`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use userlens_core::EventTracker;
//!
//! # async fn run() -> userlens_core::Result<()> {
//! let tracker = EventTracker::new("your-write-code")?;
//! tracker.track("user-42", "signup", None).await;
//! # Ok(())
//! # }
//! ```

mod blocking;
mod client;
mod events;

pub use blocking::SyncEventTracker;
pub use client::{EventTracker, GROUP_SUCCESS, IDENTIFY_SUCCESS, TRACK_SUCCESS};
pub use events::{EventPayload, Traits};
