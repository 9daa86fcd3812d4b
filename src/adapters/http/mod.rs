pub mod twitter_api;
pub mod weather_api;

pub use twitter_api::{TwitterApiClient, TwitterApiConfig};
pub use weather_api::{WeatherApiClient, WeatherApiConfig};

use crate::utils::error::{EtlError, Result};
use serde::de::DeserializeOwned;

/// Non-2xx becomes `RemoteServiceError` with the body; an undecodable body is a schema problem.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EtlError::RemoteServiceError {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(EtlError::TransportError)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!("Undecodable response body: {}", e);
        EtlError::schema("<body>")
    })
}
