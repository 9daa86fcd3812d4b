pub mod hashtags;
pub mod transform;
