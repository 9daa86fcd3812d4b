pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::storage::{InMemoryTweetStore, InMemoryWeatherSink, LocalStaging};
pub use app::pipelines::{TweetPipeline, WeatherPipeline};
pub use config::IngestConfig;
pub use core::etl::EtlEngine;
pub use utils::error::{EtlError, Result};
