use crate::adapters::http::{TwitterApiClient, WeatherApiClient};
use crate::adapters::storage::{
    InMemoryTweetStore, InMemoryWeatherSink, LocalStaging, MongoTweetStore, SqlWeatherSink,
};
use crate::app::pipelines::{TweetPipeline, WeatherPipeline};
use crate::config::IngestConfig;
use crate::core::etl::EtlEngine;
use crate::core::{LoadReport, Pipeline, TweetStore};
use crate::domain::model::HashtagCount;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

async fn execute<P: Pipeline>(pipeline: P, config: &IngestConfig) -> Result<LoadReport> {
    let mut engine = EtlEngine::new(pipeline).with_retry(config.retry.policy());
    if let Some(dir) = &config.staging_dir {
        engine = engine.with_staging(LocalStaging::new(dir.clone()));
    }
    engine.run().await
}

/// Fetch current weather for the configured city and append one row.
///
/// With `dry_run` the row goes to memory and is logged instead of the database.
pub async fn run_weather(config: &IngestConfig, dry_run: bool) -> Result<LoadReport> {
    config.retry.validate()?;
    let settings = &config.weather;
    settings.validate_source()?;
    let client = WeatherApiClient::new(settings.api_config()?);

    if dry_run {
        let sink = InMemoryWeatherSink::new();
        let report = execute(
            WeatherPipeline::new(client, settings.city.clone(), sink.clone()),
            config,
        )
        .await?;
        for row in sink.rows().await {
            tracing::info!("🔍 {:?}", row);
        }
        return Ok(report);
    }

    settings.validate_store()?;
    let sink = SqlWeatherSink::connect(settings.database_uri.as_deref()).await?;
    execute(WeatherPipeline::new(client, settings.city.clone(), sink), config).await
}

/// Fetch recent tweets for the configured user and insert one document per tweet.
pub async fn run_tweets(config: &IngestConfig, dry_run: bool) -> Result<LoadReport> {
    config.retry.validate()?;
    let settings = &config.tweets;
    settings.validate_source()?;
    let client = TwitterApiClient::new(settings.api_config()?);

    if dry_run {
        let store = InMemoryTweetStore::new();
        let report = execute(
            TweetPipeline::new(
                client,
                settings.user_id.clone(),
                settings.max_results,
                store.clone(),
            ),
            config,
        )
        .await?;
        for document in store.documents().await {
            tracing::info!("🔍 {:?}", document);
        }
        return Ok(report);
    }

    settings.validate_store()?;
    let store = MongoTweetStore::connect(settings.mongo_uri.as_deref(), &settings.database).await?;
    execute(
        TweetPipeline::new(client, settings.user_id.clone(), settings.max_results, store),
        config,
    )
    .await
}

/// Rank hashtags across the whole stored collection.
pub async fn top_hashtags(config: &IngestConfig) -> Result<Vec<HashtagCount>> {
    config.retry.validate()?;
    config.tweets.validate_store()?;
    let store =
        MongoTweetStore::connect(config.tweets.mongo_uri.as_deref(), &config.tweets.database)
            .await?;
    rank_hashtags(&store, config).await
}

pub async fn rank_hashtags<T: TweetStore>(
    store: &T,
    config: &IngestConfig,
) -> Result<Vec<HashtagCount>> {
    let limit = config.tweets.top_n;
    config
        .retry
        .policy()
        .run("aggregate", || store.top_hashtags(limit))
        .await
}
