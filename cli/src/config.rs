use std::fmt;
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use lex_openstates::{
    HttpBillSearchClient, SearchError, SearchQuery, DEFAULT_BASE_URL, DEFAULT_JURISDICTION,
    DEFAULT_LIMIT, DEFAULT_SESSION,
};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. lexlearner.yaml file (if exists)
/// 3. Environment variables with LEX_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,
    pub openstates: OpenStatesConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Where bills come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Query the OpenStates API.
    #[default]
    Live,
    /// Answer from the built-in simulation catalog, no network access.
    Static,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenStatesConfig {
    /// API root, without the `/bills` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-API-KEY` (required in live mode, no compiled-in default).
    #[serde(default)]
    pub api_key: String,

    /// Overall per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum bill detail requests in flight at once.
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,
}

impl fmt::Debug for OpenStatesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("OpenStatesConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("detail_concurrency", &self.detail_concurrency)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Jurisdiction used when the prompt is left blank.
    #[serde(default = "default_jurisdiction")]
    pub default_jurisdiction: String,

    /// Legislative session to search.
    #[serde(default = "default_session")]
    pub session: String,

    /// Page size and cap on detail fetches.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: default_jurisdiction(),
            session: default_session(),
            limit: default_limit(),
        }
    }
}

impl SearchConfig {
    /// Build a query for `keyword`, filling in the configured session and limit.
    ///
    /// A blank `jurisdiction` falls back to `default_jurisdiction`.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidQuery`] if the keyword is blank.
    pub fn query(&self, keyword: &str, jurisdiction: &str) -> Result<SearchQuery, SearchError> {
        let jurisdiction = if jurisdiction.trim().is_empty() {
            self.default_jurisdiction.as_str()
        } else {
            jurisdiction
        };

        Ok(SearchQuery::new(keyword)?
            .with_jurisdiction(jurisdiction)
            .with_session(&self.session)
            .with_limit(NonZeroU32::new(self.limit).unwrap_or(DEFAULT_LIMIT)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error), overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_connect_timeout_secs() -> u64 {
    10
}

#[allow(clippy::missing_const_for_fn)]
fn default_detail_concurrency() -> usize {
    1
}

fn default_jurisdiction() -> String {
    DEFAULT_JURISDICTION.to_string()
}

fn default_session() -> String {
    DEFAULT_SESSION.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_limit() -> u32 {
    DEFAULT_LIMIT.get()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            openstates: OpenStatesConfig {
                base_url: default_base_url(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
                connect_timeout_secs: default_connect_timeout_secs(),
                detail_concurrency: default_detail_concurrency(),
            },
            search: SearchConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. lexlearner.yaml file (if exists)
    /// 3. Environment variables with LEX_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("lexlearner.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("LEX_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The API key is only needed when talking to the API
        if self.mode == Mode::Live && self.openstates.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "openstates.api_key is required. Set LEX_OPENSTATES__API_KEY environment variable or configure in lexlearner.yaml.".into(),
            ));
        }

        let base_url = &self.openstates.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "openstates.base_url '{base_url}' must start with http:// or https://"
            )));
        }

        if self.openstates.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "openstates.timeout_secs cannot be 0".into(),
            ));
        }

        if self.openstates.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "openstates.connect_timeout_secs cannot be 0".into(),
            ));
        }

        if self.openstates.detail_concurrency == 0 {
            return Err(ConfigError::Validation(
                "openstates.detail_concurrency cannot be 0".into(),
            ));
        }

        if self.search.limit == 0 {
            return Err(ConfigError::Validation("search.limit cannot be 0".into()));
        }

        if self.search.default_jurisdiction.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.default_jurisdiction cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Build the HTTP search client described by the `openstates` section.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build_client(&self) -> Result<HttpBillSearchClient, SearchError> {
        let openstates = &self.openstates;
        let client = HttpBillSearchClient::with_timeouts(
            &openstates.base_url,
            &openstates.api_key,
            Duration::from_secs(openstates.timeout_secs),
            Duration::from_secs(openstates.connect_timeout_secs),
        )?;

        Ok(client.with_detail_concurrency(
            NonZeroUsize::new(openstates.detail_concurrency).unwrap_or(NonZeroUsize::MIN),
        ))
    }
}
