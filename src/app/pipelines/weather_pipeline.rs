use crate::adapters::http::WeatherApiClient;
use crate::domain::model::{LoadReport, WeatherRecord};
use crate::domain::ports::{Pipeline, WeatherSink};
use crate::domain::services::transform::weather_from_payload;
use crate::utils::error::Result;
use chrono::Utc;
use serde_json::Value;

pub struct WeatherPipeline<S: WeatherSink> {
    client: WeatherApiClient,
    city: String,
    sink: S,
}

impl<S: WeatherSink> WeatherPipeline<S> {
    pub fn new(client: WeatherApiClient, city: impl Into<String>, sink: S) -> Self {
        Self {
            client,
            city: city.into(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[async_trait::async_trait]
impl<S: WeatherSink> Pipeline for WeatherPipeline<S> {
    type Raw = Value;
    type Output = WeatherRecord;

    fn name(&self) -> &str {
        "weather"
    }

    async fn extract(&self) -> Result<Value> {
        self.client.fetch(&self.city).await
    }

    fn transform(&self, raw: Value) -> Result<WeatherRecord> {
        weather_from_payload(&raw, Utc::now())
    }

    async fn load(&self, record: &WeatherRecord) -> Result<LoadReport> {
        self.sink.append(record).await?;
        Ok(LoadReport {
            target: self.sink.target().to_string(),
            records_written: 1,
        })
    }
}
