//! Async client for the casita smart-home device API.
//!
//! The crate speaks the backend's JSON wire format and exposes a single
//! [`DeviceClient`] facade with two interchangeable backends:
//!
//! - a **mock** backend serving fixture data behind simulated network
//!   delays (the default), and
//! - an **HTTP** backend over `reqwest` with bounded retry for
//!   transient failures.
//!
//! Payload types here are deliberately stringly-typed wire shapes; the
//! typed domain model lives in `casita-core`.

mod client;
mod error;
pub mod fixtures;
mod http;
mod mock;
mod retry;
pub mod types;

pub use client::{ClientConfig, DeviceClient};
pub use error::Error;
pub use mock::{DEFAULT_DELAY, DISCOVERY_DELAY, STATUS_DELAY};
pub use retry::RetryPolicy;
