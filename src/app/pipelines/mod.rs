pub mod tweet_pipeline;
pub mod weather_pipeline;

pub use tweet_pipeline::TweetPipeline;
pub use weather_pipeline::WeatherPipeline;
