//! API request handlers

pub mod aircraft;
pub mod health;
