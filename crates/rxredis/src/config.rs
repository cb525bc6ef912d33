use std::env;

/// Default bound on concurrently executing commands per response stream.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 256;

/// Connection configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Redis connection URL (default: "redis://localhost:6379")
    pub redis_url: String,
    /// Commands of one response stream executing at the same time (default: 256)
    pub max_in_flight: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `RXREDIS_MAX_IN_FLIGHT` - In-flight bound per stream (default: 256, minimum: 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            redis_url: var("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
            max_in_flight: var("RXREDIS_MAX_IN_FLIGHT")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_IN_FLIGHT)
                .max(1),
        }
    }

    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = url.into();
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
