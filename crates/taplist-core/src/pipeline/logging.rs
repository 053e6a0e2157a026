//! Request logging behavior

use async_trait::async_trait;

use super::{Behavior, Next, Request, RequestContext};
use crate::error::AppError;

/// Logs every incoming request with its type name, the caller, and a
/// structured snapshot of the payload.
///
/// Pre-processing only: the entry is emitted before the rest of the chain
/// runs, and the return path is never touched. Outcome logging belongs to
/// the behaviors further in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLoggingBehavior;

#[async_trait]
impl<R: Request> Behavior<R> for RequestLoggingBehavior {
    async fn handle(
        &self,
        request: R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> Result<R::Response, AppError> {
        let payload = serde_json::to_value(&request).unwrap_or(serde_json::Value::Null);
        tracing::info!(
            request = R::name(),
            user_id = ?ctx.user_id,
            payload = %payload,
            "handling request"
        );

        next.run(request, ctx).await
    }
}
