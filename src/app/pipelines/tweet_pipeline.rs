use crate::adapters::http::TwitterApiClient;
use crate::domain::model::{LoadReport, RawTweet, TweetRecord};
use crate::domain::ports::{Pipeline, TweetStore};
use crate::domain::services::transform::tweet_from_raw;
use crate::utils::error::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct TweetPipeline<T: TweetStore> {
    client: TwitterApiClient,
    user_id: String,
    max_results: usize,
    store: T,
    // 目前批次已寫入的筆數，重試時從這裡接續
    committed: AtomicUsize,
}

impl<T: TweetStore> TweetPipeline<T> {
    pub fn new(
        client: TwitterApiClient,
        user_id: impl Into<String>,
        max_results: usize,
        store: T,
    ) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            max_results,
            store,
            committed: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &T {
        &self.store
    }
}

#[async_trait::async_trait]
impl<T: TweetStore> Pipeline for TweetPipeline<T> {
    type Raw = std::vec::IntoIter<RawTweet>;
    type Output = Vec<TweetRecord>;

    fn name(&self) -> &str {
        "tweets"
    }

    async fn extract(&self) -> Result<Self::Raw> {
        self.client
            .fetch_user_tweets(&self.user_id, self.max_results)
            .await
    }

    /// Starts a new batch.
    fn transform(&self, raw: Self::Raw) -> Result<Vec<TweetRecord>> {
        self.committed.store(0, Ordering::SeqCst);
        Ok(raw.map(|tweet| tweet_from_raw(tweet, &self.user_id)).collect())
    }

    /// One insert per record, no uniqueness check: re-running the command duplicates
    /// documents. A retried load resumes after the last record that was stored.
    async fn load(&self, records: &Self::Output) -> Result<LoadReport> {
        let start = self.committed.load(Ordering::SeqCst).min(records.len());
        if start > 0 && start < records.len() {
            tracing::info!("↪️ Resuming tweet load at record {}/{}", start + 1, records.len());
        }

        for record in &records[start..] {
            self.store.insert(record).await?;
            self.committed.fetch_add(1, Ordering::SeqCst);
        }

        Ok(LoadReport {
            target: self.store.target().to_string(),
            records_written: records.len(),
        })
    }

    fn unloaded(&self, records: &Self::Output) -> Result<Vec<u8>> {
        let start = self.committed.load(Ordering::SeqCst).min(records.len());
        Ok(serde_json::to_vec_pretty(&records[start..])?)
    }
}
