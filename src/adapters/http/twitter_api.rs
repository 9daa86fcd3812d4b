use crate::domain::model::RawTweet;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_TWITTER_ENDPOINT: &str = "https://api.twitter.com";

/// The user-tweets endpoint rejects `max_results` outside this range.
const API_MIN_RESULTS: usize = 5;
const API_MAX_RESULTS: usize = 100;

#[derive(Debug, Clone)]
pub struct TwitterApiConfig {
    pub endpoint: String,
    pub bearer_token: String,
}

#[derive(Debug, Deserialize)]
struct UserTweetsResponse {
    #[serde(default)]
    data: Option<Vec<RawTweet>>,
}

pub struct TwitterApiClient {
    config: TwitterApiConfig,
    client: Client,
}

impl TwitterApiClient {
    pub fn new(config: TwitterApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request_url(&self, user_id: &str, max_results: usize) -> Result<Url> {
        let requested = max_results.clamp(API_MIN_RESULTS, API_MAX_RESULTS).to_string();
        let base = format!(
            "{}/2/users/{}/tweets",
            self.config.endpoint.trim_end_matches('/'),
            user_id
        );
        Url::parse_with_params(
            &base,
            &[
                ("tweet.fields", "created_at,entities"),
                ("max_results", requested.as_str()),
            ],
        )
        .map_err(|e| EtlError::InvalidConfigValueError {
            field: "tweets.endpoint".to_string(),
            value: self.config.endpoint.clone(),
            reason: e.to_string(),
        })
    }

    /// Fetches at most `max_results` recent tweets for `user_id`.
    ///
    /// The returned iterator is consumed once; a response without `data` yields nothing.
    pub async fn fetch_user_tweets(
        &self,
        user_id: &str,
        max_results: usize,
    ) -> Result<std::vec::IntoIter<RawTweet>> {
        let url = self.request_url(user_id, max_results)?;
        tracing::debug!("Requesting tweets for user {} (cap {})", user_id, max_results);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await
            .map_err(EtlError::TransportError)?;

        let body: UserTweetsResponse = super::decode_json(response).await?;
        let mut tweets = body.data.unwrap_or_default();
        tweets.truncate(max_results);
        tracing::debug!("Received {} tweets", tweets.len());

        Ok(tweets.into_iter())
    }
}
