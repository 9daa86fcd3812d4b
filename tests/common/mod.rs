#![allow(dead_code)]

use ingest_etl::domain::model::TweetRecord;
use serde_json::{json, Value};

pub const FIXTURE_USER_ID: &str = "4398626122";

/// The five example tweets used when no live fetch is performed.
pub fn sample_tweets() -> Vec<TweetRecord> {
    sample_entries()
        .into_iter()
        .map(|(text, created_at, tags)| TweetRecord {
            text: text.to_string(),
            created_at: Some(created_at.parse().unwrap()),
            user_id: FIXTURE_USER_ID.to_string(),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Same tweets, shaped like a user-tweets API response.
pub fn sample_api_response() -> Value {
    let data: Vec<Value> = sample_entries()
        .into_iter()
        .enumerate()
        .map(|(i, (text, created_at, tags))| {
            let hashtags: Vec<Value> = tags.iter().map(|t| json!({ "tag": t })).collect();
            json!({
                "id": (i + 1).to_string(),
                "text": text,
                "created_at": created_at,
                "entities": { "hashtags": hashtags }
            })
        })
        .collect();

    json!({ "data": data, "meta": { "result_count": 5 } })
}

fn sample_entries() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    vec![
        (
            "Exploring the future of #AI with #OpenAI",
            "2024-01-01T12:00:00Z",
            vec!["AI", "OpenAI"],
        ),
        (
            "New research on #MachineLearning and #Innovation",
            "2024-01-02T15:30:00Z",
            vec!["MachineLearning", "Innovation"],
        ),
        (
            "Join our #Webinar on #FutureOfAI",
            "2024-01-03T10:00:00Z",
            vec!["Webinar", "FutureOfAI"],
        ),
        (
            "Discussing #EthicsInAI at #OpenAI",
            "2024-01-04T09:45:00Z",
            vec!["EthicsInAI", "OpenAI"],
        ),
        (
            "Latest updates on #AISafety and #Research",
            "2024-01-05T08:20:00Z",
            vec!["AISafety", "Research"],
        ),
    ]
}
