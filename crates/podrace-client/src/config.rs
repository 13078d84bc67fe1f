//! Service endpoint configuration.

/// Base URL used when none is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Where the race service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Scheme, host and port, e.g. `http://localhost:3001`. A trailing slash
    /// is ignored.
    pub base_url: String,
}

impl ServiceConfig {
    /// Configuration for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
