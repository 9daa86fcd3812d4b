pub mod memory;
pub mod mongo_tweets;
pub mod sql_weather;
pub mod staging;

pub use memory::{InMemoryTweetStore, InMemoryWeatherSink};
pub use mongo_tweets::MongoTweetStore;
pub use sql_weather::SqlWeatherSink;
pub use staging::LocalStaging;
