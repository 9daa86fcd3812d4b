use crate::adapters::storage::LocalStaging;
use crate::core::{LoadReport, Pipeline, Staging};
use crate::utils::error::Result;
use crate::utils::retry::RetryPolicy;

/// Runs one pipeline once: extract → transform → load.
///
/// Extract and load go through the retry policy (a single attempt unless configured).
/// When load fails and a staging area is set, whatever part of the transformed output did
/// not reach the destination is written there before the error is returned.
pub struct EtlEngine<P: Pipeline, S: Staging = LocalStaging> {
    pipeline: P,
    retry: RetryPolicy,
    staging: Option<S>,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            retry: RetryPolicy::none(),
            staging: None,
        }
    }
}

impl<P: Pipeline, S: Staging> EtlEngine<P, S> {
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_staging<T: Staging>(self, staging: T) -> EtlEngine<P, T> {
        EtlEngine {
            pipeline: self.pipeline,
            retry: self.retry,
            staging: Some(staging),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<LoadReport> {
        let name = self.pipeline.name();
        tracing::info!("🚀 Starting {} pipeline", name);

        // Extract
        tracing::info!("📡 Extracting...");
        let raw = self.retry.run("extract", || self.pipeline.extract()).await?;

        // Transform
        tracing::info!("🔄 Transforming...");
        let output = self.pipeline.transform(raw)?;

        // Load
        tracing::info!("💾 Loading...");
        match self.retry.run("load", || self.pipeline.load(&output)).await {
            Ok(report) => {
                tracing::info!(
                    "✅ {} pipeline wrote {} record(s) to {}",
                    name,
                    report.records_written,
                    report.target
                );
                Ok(report)
            }
            Err(e) => {
                self.stage_output(&output).await;
                Err(e)
            }
        }
    }

    async fn stage_output(&self, output: &P::Output) {
        let Some(staging) = &self.staging else {
            tracing::warn!("⚠️ Load failed and no staging directory is configured; transformed data is lost");
            return;
        };

        let payload = match self.pipeline.unloaded(output) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("❌ Could not serialize output for staging: {}", e);
                return;
            }
        };

        match staging.stage(self.pipeline.name(), &payload).await {
            Ok(path) => tracing::warn!("📦 Load failed; transformed output staged at {}", path),
            Err(e) => tracing::error!("❌ Staging write failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Extract yields a number, transform doubles it, load fails the first `load_failures` times.
    struct MockPipeline {
        load_failures: u32,
        load_calls: AtomicU32,
    }

    impl MockPipeline {
        fn new(load_failures: u32) -> Self {
            Self {
                load_failures,
                load_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Pipeline for MockPipeline {
        type Raw = u32;
        type Output = Vec<u32>;

        fn name(&self) -> &str {
            "mock"
        }

        async fn extract(&self) -> Result<u32> {
            Ok(21)
        }

        fn transform(&self, raw: u32) -> Result<Vec<u32>> {
            Ok(vec![raw * 2])
        }

        async fn load(&self, output: &Vec<u32>) -> Result<LoadReport> {
            let call = self.load_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.load_failures {
                return Err(EtlError::persistence("store unavailable"));
            }
            Ok(LoadReport {
                target: "mock".to_string(),
                records_written: output.len(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_success() {
        let engine = EtlEngine::new(MockPipeline::new(0));
        let report = engine.run().await.unwrap();
        assert_eq!(report.records_written, 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_not_retried_by_default() {
        let engine = EtlEngine::new(MockPipeline::new(1));
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, EtlError::PersistenceError { .. }));
        assert_eq!(engine.pipeline().load_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bounded_retry_recovers() {
        let engine = EtlEngine::new(MockPipeline::new(2))
            .with_retry(RetryPolicy::new(3, Duration::from_millis(1)));

        assert!(engine.run().await.is_ok());
        assert_eq!(engine.pipeline().load_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_load_is_staged() {
        let temp_dir = TempDir::new().unwrap();
        let engine = EtlEngine::new(MockPipeline::new(1))
            .with_staging(LocalStaging::new(temp_dir.path().to_str().unwrap()));

        assert!(engine.run().await.is_err());

        let staged: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(staged.len(), 1);
        let content: Vec<u32> =
            serde_json::from_str(&std::fs::read_to_string(&staged[0]).unwrap()).unwrap();
        assert_eq!(content, vec![42]);
    }
}
