//! Client configuration.
//!
//! A `ClientConfig` is built once and handed to `AccountClient::new`; there
//! is no process-wide default client. Log output goes through `tracing`, so
//! the sinks are whatever subscriber the application installs. `debug`
//! additionally turns on raw response body logging.

use url::Url;

use crate::error::ApiError;

/// Root URL used by `ClientConfig::default` and `ClientConfig::debug`.
pub const DEFAULT_ROOT_URL: &str = "http://localhost:8080/v1/organisation/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    root_url: Url,
    debug: bool,
}

impl ClientConfig {
    /// Parses `root_url`. Only absolute http(s) URLs are accepted.
    pub fn new(root_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(root_url)
            .map_err(|e| ApiError::Configuration(format!("invalid root url {root_url:?}: {e}")))?;
        Self::from_url(url)
    }

    pub fn from_url(root_url: Url) -> Result<Self, ApiError> {
        if !matches!(root_url.scheme(), "http" | "https") {
            return Err(ApiError::Configuration(format!(
                "unsupported scheme {:?} in root url",
                root_url.scheme()
            )));
        }
        if root_url.cannot_be_a_base() || root_url.host().is_none() {
            return Err(ApiError::Configuration(format!(
                "root url {root_url} has no host or path"
            )));
        }
        Ok(Self {
            root_url,
            debug: false,
        })
    }

    /// Default root with raw body logging enabled.
    pub fn debug() -> Self {
        Self::default().with_debug(true)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // DEFAULT_ROOT_URL is a constant absolute http URL with a host, so
        // it always parses and always passes `from_url`.
        Self {
            root_url: Url::parse(DEFAULT_ROOT_URL).expect("DEFAULT_ROOT_URL parses"),
            debug: false,
        }
    }
}
