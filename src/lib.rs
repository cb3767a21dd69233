//! scrolly-rs: scroll-to-visualization synchronization core.
//!
//! Narrative sections are observed as the reader scrolls; section
//! transitions become ordered step callbacks and settle-delayed, width-gated
//! chart resizes. Chart drawing and data loading stay outside the crate
//! behind the `Visualization` and `DocumentHost` traits.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod observer;
pub mod telemetry;
pub mod visualization;

pub use api::{ScrollytellingConfig, ScrollytellingEngine};
pub use error::{ScrollyError, ScrollyResult};
