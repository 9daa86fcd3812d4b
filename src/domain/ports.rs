use crate::domain::model::{HashtagCount, LoadReport, TweetRecord, WeatherRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Extract → transform → load, run once by the engine.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Raw: Send;
    type Output: Serialize + Send + Sync;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Raw>;
    fn transform(&self, raw: Self::Raw) -> Result<Self::Output>;
    async fn load(&self, output: &Self::Output) -> Result<LoadReport>;

    /// JSON for the part of `output` that is not in the destination yet.
    /// Pipelines that load in steps narrow this to what is still pending.
    fn unloaded(&self, output: &Self::Output) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(output)?)
    }
}

/// Append-only relational destination for weather observations.
#[async_trait]
pub trait WeatherSink: Send + Sync {
    fn target(&self) -> &str;
    async fn append(&self, record: &WeatherRecord) -> Result<()>;
}

/// Document destination for tweets; also answers the hashtag ranking.
#[async_trait]
pub trait TweetStore: Send + Sync {
    fn target(&self) -> &str;
    async fn insert(&self, record: &TweetRecord) -> Result<()>;
    async fn top_hashtags(&self, limit: usize) -> Result<Vec<HashtagCount>>;
}

/// Durable spot for transformed output whose load failed.
pub trait Staging: Send + Sync {
    fn stage(&self, pipeline: &str, payload: &[u8]) -> impl std::future::Future<Output = Result<String>> + Send;
}
