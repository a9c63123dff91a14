//! # userlens-core
//!
//! Client library for the Userlens event ingestion API.
//!
//! This library provides:
//! - [`EventTracker`], an async client sending `identify`, `track` and
//!   `group` events
//! - [`SyncEventTracker`], a blocking wrapper for synchronous callers
//! - Configuration management
//! - Logging infrastructure
//!
//! Delivery is best effort: one attempt per event, no queuing. Failures are
//! logged through `tracing` and surface to the caller only as `None`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use userlens_core::{SyncEventTracker, Traits};
//!
//! let tracker = SyncEventTracker::new("your-write-code").expect("invalid write code");
//!
//! let mut traits = Traits::new();
//! traits.insert("plan".to_string(), "pro".into());
//!
//! tracker.identify("user-42", Some(&traits));
//! tracker.track("user-42", "checkout_completed", Some(&traits));
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, TrackerConfig};
pub use error::{Error, Result};
pub use tracker::{EventTracker, SyncEventTracker, Traits};

// Public modules
pub mod config;
pub mod error;
pub mod logging;
pub mod tracker;
