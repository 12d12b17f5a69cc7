//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `HEROES_*` environment variables (and any OrthoConfig
//! configuration file); everything has a default.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Origin of the public heroes API.
pub const DEFAULT_BASE_URL: &str = "https://codetest-api.applivery.io";

const CREDENTIALS_DIR_NAME: &str = "pentathlon-heroes";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

fn default_credentials_path() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(format!(".{CREDENTIALS_DIR_NAME}")),
        |config| config.join(CREDENTIALS_DIR_NAME),
    )
    .join(CREDENTIALS_FILE_NAME)
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `base_url` does not parse as an absolute URL.
    #[error("invalid base url '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `request_timeout_secs` was zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for the heroes client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEROES")]
pub struct ClientSettings {
    /// API origin.
    #[ortho_config(default = DEFAULT_BASE_URL.to_owned())]
    pub base_url: String,
    /// Location of the credentials file.
    pub credentials_path: Option<PathBuf>,
    /// Optional per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    /// Settings with every value defaulted, ignoring the environment.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            credentials_path: None,
            request_timeout_secs: None,
        }
    }

    /// Parse the configured origin.
    ///
    /// # Errors
    ///
    /// Fails when the configured value is not an absolute URL.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        Url::parse(&self.base_url).map_err(|error| SettingsError::InvalidBaseUrl {
            value: self.base_url.clone(),
            message: error.to_string(),
        })
    }

    /// Return the configured credentials path, falling back to the default.
    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_path
            .clone()
            .unwrap_or_else(default_credentials_path)
    }

    /// Return the configured request timeout, if any.
    ///
    /// # Errors
    ///
    /// Fails when the timeout is zero.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(seconds) => Ok(Some(Duration::from_secs(seconds))),
            None => Ok(None),
        }
    }
}
