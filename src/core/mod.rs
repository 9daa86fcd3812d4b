pub mod etl;

pub use crate::domain::model::{LoadReport, TweetRecord, WeatherRecord};
pub use crate::domain::ports::{Pipeline, Staging, TweetStore, WeatherSink};
pub use crate::utils::error::Result;
