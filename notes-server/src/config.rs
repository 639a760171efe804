//! Application configuration
//!
//! Central location for the note lifecycle constants and the
//! environment-driven runtime settings.

use crate::error::{AppError, Result};
use std::net::SocketAddr;

// ===== Note Lifecycle =====

/// Literal prefix shared by every note key in the store
pub const NOTE_KEY_PREFIX: &str = "note:";

/// Lifetime applied when the caller gives no usable ttl (10 minutes)
pub const DEFAULT_TTL_SECS: i64 = 600;

/// Keys requested per SCAN page while listing
pub const SCAN_PAGE_SIZE: usize = 100;

// ===== Runtime Defaults =====

pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379/0";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Which store implementation backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Redis { url: String },
    /// In-process store; notes vanish with the process
    Memory,
}

/// Runtime settings resolved at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl AppConfig {
    /// Read `BIND_ADDR`, `NOTES_STORE` and `REDIS_URL` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid BIND_ADDR {:?}: {}", bind_raw, e)))?;

        let store = match lookup("NOTES_STORE").as_deref() {
            None | Some("redis") => StoreBackend::Redis {
                url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(AppError::Config(format!("Unknown NOTES_STORE: {}", other)));
            }
        };

        Ok(Self { bind_addr, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: DEFAULT_REDIS_URL.to_string()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("REDIS_URL", "redis://cache:6379/2"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: "redis://cache:6379/2".to_string()
            }
        );

        let config = config_from(&[("NOTES_STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDR", "not-an-addr")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("NOTES_STORE", "sqlite")]),
            Err(AppError::Config(_))
        ));
    }
}
