use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub const DEFAULT_WEATHER_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// Current-conditions client: one GET per call, metric units.
pub struct WeatherApiClient {
    config: WeatherApiConfig,
    client: Client,
}

impl WeatherApiClient {
    pub fn new(config: WeatherApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn request_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| EtlError::InvalidConfigValueError {
            field: "weather.endpoint".to_string(),
            value: self.config.endpoint.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn fetch(&self, city: &str) -> Result<Value> {
        let url = self.request_url(city)?;
        // 不要把 appid 寫進日誌
        tracing::debug!("Requesting current weather for {} from {}", city, self.config.endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(EtlError::TransportError)?;

        let payload: Value = super::decode_json(response).await?;
        tracing::debug!(
            "Weather payload: {}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
        Ok(payload)
    }
}
