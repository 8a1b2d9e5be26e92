//! Upstream aircraft tracking API
//!
//! One GET per invocation, no retries.

mod client;

pub use client::{AircraftClient, HOST_HEADER, KEY_HEADER};
