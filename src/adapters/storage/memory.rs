use crate::domain::model::{HashtagCount, TweetRecord, WeatherRecord};
use crate::domain::ports::{TweetStore, WeatherSink};
use crate::domain::services::hashtags;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps appended rows in memory. Used for `--dry-run` and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWeatherSink {
    rows: Arc<Mutex<Vec<WeatherRecord>>>,
}

impl InMemoryWeatherSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<WeatherRecord> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl WeatherSink for InMemoryWeatherSink {
    fn target(&self) -> &str {
        "memory:weather_data"
    }

    async fn append(&self, record: &WeatherRecord) -> Result<()> {
        self.rows.lock().await.push(record.clone());
        Ok(())
    }
}

/// Document collection stand-in; the ranking matches the aggregation pipeline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTweetStore {
    documents: Arc<Mutex<Vec<TweetRecord>>>,
}

impl InMemoryTweetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<TweetRecord>) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents)),
        }
    }

    pub async fn documents(&self) -> Vec<TweetRecord> {
        self.documents.lock().await.clone()
    }
}

#[async_trait]
impl TweetStore for InMemoryTweetStore {
    fn target(&self) -> &str {
        "memory:tweets"
    }

    async fn insert(&self, record: &TweetRecord) -> Result<()> {
        self.documents.lock().await.push(record.clone());
        Ok(())
    }

    async fn top_hashtags(&self, limit: usize) -> Result<Vec<HashtagCount>> {
        let documents = self.documents.lock().await;
        Ok(hashtags::top_hashtags(documents.iter(), limit))
    }
}
