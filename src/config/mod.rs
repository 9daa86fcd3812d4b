#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::Cli;

use crate::adapters::http::twitter_api::DEFAULT_TWITTER_ENDPOINT;
use crate::adapters::http::weather_api::DEFAULT_WEATHER_ENDPOINT;
use crate::adapters::http::{TwitterApiConfig, WeatherApiConfig};
use crate::adapters::storage::mongo_tweets::DEFAULT_DATABASE;
use crate::domain::services::hashtags::DEFAULT_TOP_N;
use crate::utils::error::{EtlError, Result};
use crate::utils::retry::RetryPolicy;
use crate::utils::validation::{
    validate_connection_scheme, validate_non_empty_string, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CITY: &str = "Barrie,CA";
pub const DEFAULT_USER_ID: &str = "4398626122";
pub const DEFAULT_MAX_RESULTS: usize = 5;

const SQL_SCHEMES: [&str; 3] = ["sqlite", "postgres", "postgresql"];
const MONGO_SCHEMES: [&str; 2] = ["mongodb", "mongodb+srv"];

/// Everything a run needs, resolved once at startup and handed to constructors.
///
/// Layers, lowest to highest precedence: built-in defaults, TOML file, environment,
/// command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub weather: WeatherSettings,
    pub tweets: TweetSettings,
    pub retry: RetrySettings,
    pub staging_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub database_uri: Option<String>,
    pub endpoint: String,
    pub city: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            database_uri: None,
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            city: DEFAULT_CITY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetSettings {
    pub bearer_token: Option<String>,
    pub mongo_uri: Option<String>,
    pub endpoint: String,
    pub user_id: String,
    pub max_results: usize,
    pub database: String,
    pub top_n: usize,
}

impl Default for TweetSettings {
    fn default() -> Self {
        Self {
            bearer_token: None,
            mongo_uri: None,
            endpoint: DEFAULT_TWITTER_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            database: DEFAULT_DATABASE.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 1000,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.delay_ms))
    }
}

impl IngestConfig {
    /// Overlays the process environment (after `.env` has been loaded by the caller).
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup`; unset or empty variables leave the current value.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("API_KEY") {
            self.weather.api_key = Some(v);
        }
        if let Some(v) = get("DATABASE_URI") {
            self.weather.database_uri = Some(v);
        }
        if let Some(v) = get("WEATHER_API_ENDPOINT") {
            self.weather.endpoint = v;
        }
        if let Some(v) = get("WEATHER_CITY") {
            self.weather.city = v;
        }
        if let Some(v) = get("TWITTER_BEARER_TOKEN") {
            self.tweets.bearer_token = Some(v);
        }
        if let Some(v) = get("MONGO_URI") {
            self.tweets.mongo_uri = Some(v);
        }
        if let Some(v) = get("TWITTER_API_ENDPOINT") {
            self.tweets.endpoint = v;
        }
        if let Some(v) = get("TWITTER_USER_ID") {
            self.tweets.user_id = v;
        }
        if let Some(v) = get("STAGING_DIR") {
            self.staging_dir = Some(v);
        }
        if let Some(v) = get("RETRY_MAX_ATTEMPTS") {
            self.retry.max_attempts = parse_number("RETRY_MAX_ATTEMPTS", &v)?;
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| EtlError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl WeatherSettings {
    pub fn api_config(&self) -> Result<WeatherApiConfig> {
        Ok(WeatherApiConfig {
            endpoint: self.endpoint.clone(),
            api_key: validate_required_field("API_KEY", &self.api_key)?.to_string(),
        })
    }

    pub fn validate_source(&self) -> Result<()> {
        validate_required_field("API_KEY", &self.api_key)?;
        validate_url("weather.endpoint", &self.endpoint)?;
        validate_non_empty_string("weather.city", &self.city)?;
        Ok(())
    }

    pub fn validate_store(&self) -> Result<()> {
        let uri = validate_required_field("DATABASE_URI", &self.database_uri)?;
        validate_connection_scheme("DATABASE_URI", uri, &SQL_SCHEMES)
    }
}

impl TweetSettings {
    pub fn api_config(&self) -> Result<TwitterApiConfig> {
        Ok(TwitterApiConfig {
            endpoint: self.endpoint.clone(),
            bearer_token: validate_required_field("TWITTER_BEARER_TOKEN", &self.bearer_token)?
                .to_string(),
        })
    }

    pub fn validate_source(&self) -> Result<()> {
        validate_required_field("TWITTER_BEARER_TOKEN", &self.bearer_token)?;
        validate_url("tweets.endpoint", &self.endpoint)?;
        validate_non_empty_string("tweets.user_id", &self.user_id)?;
        validate_range("tweets.max_results", self.max_results, 1, 100)?;
        Ok(())
    }

    /// The aggregation only needs the store.
    pub fn validate_store(&self) -> Result<()> {
        let uri = validate_required_field("MONGO_URI", &self.mongo_uri)?;
        validate_connection_scheme("MONGO_URI", uri, &MONGO_SCHEMES)?;
        validate_non_empty_string("tweets.database", &self.database)?;
        validate_range("tweets.top_n", self.top_n, 1, 1000)?;
        Ok(())
    }
}

impl Validate for RetrySettings {
    fn validate(&self) -> Result<()> {
        validate_range("retry.max_attempts", self.max_attempts, 1, 10)
    }
}
