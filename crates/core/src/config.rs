//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the client and
//! pages. Nothing below the binary reads environment variables while handling a request.

use crate::constants::{
    API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_ERROR_BANNER_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, ERROR_BANNER_SECS_ENV, REQUEST_TIMEOUT_SECS_ENV,
};
use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    error_banner_duration: Duration,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// Trailing slashes are stripped from `api_base_url` so paths can be joined with `/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidInput` if the base URL is blank or is not an http(s) URL,
    /// or if either duration is zero.
    pub fn new(
        api_base_url: impl Into<String>,
        error_banner_duration: Duration,
        request_timeout: Duration,
    ) -> ConfigResult<Self> {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();

        if api_base_url.is_empty() {
            return Err(ConfigError::InvalidInput(
                "api base url cannot be empty".into(),
            ));
        }
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidInput(format!(
                "api base url must start with http:// or https://, got '{api_base_url}'"
            )));
        }
        if error_banner_duration.is_zero() || request_timeout.is_zero() {
            return Err(ConfigError::InvalidInput(
                "durations must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base_url,
            error_banner_duration,
            request_timeout,
        })
    }

    /// Resolve configuration from optional raw values, typically read from the environment.
    ///
    /// Missing or blank values fall back to the defaults in [`crate::constants`].
    pub fn from_values(
        api_base_url: Option<String>,
        error_banner_secs: Option<String>,
        request_timeout_secs: Option<String>,
    ) -> ConfigResult<Self> {
        let api_base_url = non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let banner = seconds_from_value(
            ERROR_BANNER_SECS_ENV,
            error_banner_secs,
            DEFAULT_ERROR_BANNER_SECS,
        )?;
        let timeout = seconds_from_value(
            REQUEST_TIMEOUT_SECS_ENV,
            request_timeout_secs,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Self::new(api_base_url, banner, timeout)
    }

    /// Resolve configuration from the process environment.
    ///
    /// Intended to be called once from `main`, after `.env` has been loaded.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_values(
            std::env::var(API_BASE_URL_ENV).ok(),
            std::env::var(ERROR_BANNER_SECS_ENV).ok(),
            std::env::var(REQUEST_TIMEOUT_SECS_ENV).ok(),
        )
    }

    /// Returns a copy with a different API base URL, re-validated.
    pub fn with_api_base_url(self, api_base_url: impl Into<String>) -> ConfigResult<Self> {
        Self::new(
            api_base_url,
            self.error_banner_duration,
            self.request_timeout,
        )
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn error_banner_duration(&self) -> Duration {
        self.error_banner_duration
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            error_banner_duration: Duration::from_secs(DEFAULT_ERROR_BANNER_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seconds_from_value(
    var: &'static str,
    value: Option<String>,
    default: u64,
) -> ConfigResult<Duration> {
    match non_blank(value) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { var, value: raw }),
    }
}
