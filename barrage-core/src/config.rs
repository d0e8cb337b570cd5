use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_CONNECTIONS: u64 = 150;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Target and shape of one run. Built once, then shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    /// Requests launched per batch.
    pub connections: u64,
    /// Batches are only launched while less than this much time has elapsed.
    pub duration: Duration,
    /// Pause after each batch completes.
    pub request_interval: Duration,
    pub verbose: bool,
    /// Upper bound for one request/response exchange.
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            use_tls: false,
            connections: DEFAULT_CONNECTIONS,
            duration: DEFAULT_DURATION,
            request_interval: DEFAULT_REQUEST_INTERVAL,
            verbose: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidHost);
        }
        if self.connections == 0 {
            return Err(Error::InvalidConnections);
        }
        if self.duration.is_zero() {
            return Err(Error::InvalidDuration);
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        Ok(())
    }

    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.use_tls { "https" } else { "http" }
    }

    #[must_use]
    pub fn target_url(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            // Bare IPv6 literal.
            format!("{}://[{host}]:{}/", self.scheme(), self.port)
        } else {
            format!("{}://{host}:{}/", self.scheme(), self.port)
        }
    }
}

/// Converts a fractional seconds value (as given on the command line) into a pause.
pub fn interval_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::InvalidInterval);
    }
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidInterval)
}
