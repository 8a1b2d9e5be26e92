//! HTTP surface of the proxy
//!
//! Routes inbound requests to the aircraft handler and a health probe.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{ApiServer, AppState};
