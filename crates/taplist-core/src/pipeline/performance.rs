//! Performance timing behavior

use std::time::Duration;

use async_trait::async_trait;
use taplist_common::settings::{PipelineSettings, DEFAULT_SLOW_REQUEST_THRESHOLD_MS};

use super::{Behavior, Next, Request, RequestContext};
use crate::error::AppError;

/// Measures the wall-clock time of the inner chain and warns when it exceeds
/// the configured threshold.
///
/// Purely observational: the response passes through unchanged, there are no
/// retries, and the elapsed time is measured whether the inner chain
/// succeeds or fails. Requests at or below the threshold emit nothing.
#[derive(Debug, Clone)]
pub struct PerformanceBehavior {
    threshold: Duration,
}

impl PerformanceBehavior {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new(settings.slow_request_threshold())
    }
}

impl Default for PerformanceBehavior {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SLOW_REQUEST_THRESHOLD_MS))
    }
}

#[async_trait]
impl<R: Request> Behavior<R> for PerformanceBehavior {
    async fn handle(
        &self,
        request: R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> Result<R::Response, AppError> {
        let started = tokio::time::Instant::now();
        let result = next.run(request, ctx).await;
        let elapsed = started.elapsed();

        if elapsed > self.threshold {
            tracing::warn!(
                request = R::name(),
                user_id = ?ctx.user_id,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = self.threshold.as_millis() as u64,
                "slow request"
            );
        }

        result
    }
}
