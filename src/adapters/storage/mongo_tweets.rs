use crate::domain::model::{HashtagCount, TweetRecord};
use crate::domain::ports::TweetStore;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};

pub const DEFAULT_DATABASE: &str = "twitter_db";
pub const TWEETS_COLLECTION: &str = "tweets";

pub struct MongoTweetStore {
    collection: Collection<Document>,
    target: String,
}

impl MongoTweetStore {
    /// The driver connects lazily, so an unreachable server only shows up on the first
    /// operation as a `PersistenceError`.
    pub async fn connect(mongo_uri: Option<&str>, database: &str) -> Result<Self> {
        let uri = match mongo_uri.map(str::trim) {
            Some(uri) if !uri.is_empty() => uri,
            _ => {
                return Err(EtlError::MissingConfigError {
                    field: "MONGO_URI".to_string(),
                })
            }
        };

        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection(TWEETS_COLLECTION);
        Ok(Self {
            collection,
            target: format!("{}.{}", database, TWEETS_COLLECTION),
        })
    }

    pub fn to_document(record: &TweetRecord) -> Document {
        doc! {
            "text": record.text.as_str(),
            "created_at": record.created_at.map(mongodb::bson::DateTime::from_chrono),
            "user_id": record.user_id.as_str(),
            "hashtags": record.hashtags.clone(),
        }
    }

    /// `$unwind` → `$group` → `$sort` → `$limit`; ties ordered by hashtag ascending.
    pub fn top_hashtags_pipeline(limit: usize) -> Vec<Document> {
        vec![
            doc! { "$unwind": "$hashtags" },
            doc! { "$group": { "_id": "$hashtags", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1, "_id": 1 } },
            doc! { "$limit": limit as i64 },
        ]
    }
}

fn parse_count(document: &Document) -> Result<HashtagCount> {
    let hashtag = document
        .get_str("_id")
        .map_err(EtlError::persistence)?
        .to_string();
    let count = match document.get("count") {
        Some(Bson::Int32(n)) => *n as u64,
        Some(Bson::Int64(n)) => *n as u64,
        Some(Bson::Double(n)) => *n as u64,
        other => {
            return Err(EtlError::persistence(format!(
                "unexpected count value in aggregation result: {:?}",
                other
            )))
        }
    };
    Ok(HashtagCount { hashtag, count })
}

#[async_trait]
impl TweetStore for MongoTweetStore {
    fn target(&self) -> &str {
        &self.target
    }

    async fn insert(&self, record: &TweetRecord) -> Result<()> {
        let result = self.collection.insert_one(Self::to_document(record)).await?;
        tracing::debug!("Inserted tweet document {:?}", result.inserted_id);
        Ok(())
    }

    async fn top_hashtags(&self, limit: usize) -> Result<Vec<HashtagCount>> {
        // $limit 不接受 0
        if limit == 0 {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .aggregate(Self::top_hashtags_pipeline(limit))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents.iter().map(parse_count).collect()
    }
}
