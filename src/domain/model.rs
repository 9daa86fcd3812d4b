use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    /// °C
    pub temperature: f64,
    /// percent
    pub humidity: i64,
    /// m/s
    pub wind_speed: f64,
    /// Capture instant, not the provider's observation time.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub user_id: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Derived by the aggregation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    #[serde(rename = "_id")]
    pub hashtag: String,
    pub count: u64,
}

/// Raw tweet entry as returned by the user-tweets endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTweet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub entities: Option<TweetEntities>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub hashtags: Option<Vec<HashtagEntity>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagEntity {
    pub tag: String,
}

/// What a load step reports back to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub target: String,
    pub records_written: usize,
}
