use crate::domain::ports::Staging;
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;

/// Writes transformed output whose load failed to `<base>/<pipeline>-<UTC timestamp>.json`.
#[derive(Debug, Clone)]
pub struct LocalStaging {
    base_path: String,
}

impl LocalStaging {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Staging for LocalStaging {
    async fn stage(&self, pipeline: &str, payload: &[u8]) -> Result<String> {
        let file_name = format!("{}-{}.json", pipeline, Utc::now().format("%Y%m%dT%H%M%S%.6fZ"));
        let full_path = Path::new(&self.base_path).join(file_name);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, payload).await?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}
