//! Ephemeral notes library
//!
//! Short-lived text notes kept in a TTL-aware key-value store. Exposed as a
//! library so the HTTP layer and the integration tests share one core.

pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
