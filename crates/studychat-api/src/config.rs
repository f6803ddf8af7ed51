//! Server configuration read from the environment.

use std::net::SocketAddr;

use studychat_core::repository::CursorPolicy;

use crate::error::AppError;

/// Default transport topic for chat events.
pub const DEFAULT_TOPIC: &str = "studychat.events";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Transport topic events are published on (`STUDYCHAT_TOPIC`).
    pub topic: String,
    /// Handling of unknown catch-up cursors (`STUDYCHAT_CURSOR_POLICY`).
    pub cursor_policy: CursorPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            topic: DEFAULT_TOPIC.to_string(),
            cursor_policy: CursorPolicy::Lenient,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };
        let topic = match lookup("STUDYCHAT_TOPIC") {
            Some(topic) if topic.trim().is_empty() => {
                return Err(AppError::Config(
                    "STUDYCHAT_TOPIC must not be blank".to_string(),
                ));
            }
            Some(topic) => topic,
            None => defaults.topic,
        };
        let cursor_policy = match lookup("STUDYCHAT_CURSOR_POLICY") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("STUDYCHAT_CURSOR_POLICY: {e}")))?,
            None => defaults.cursor_policy,
        };

        Ok(Self {
            host,
            port,
            topic,
            cursor_policy,
        })
    }

    /// Returns the address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
