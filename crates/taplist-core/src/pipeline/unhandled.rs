//! Unhandled-error behavior

use async_trait::async_trait;

use super::{Behavior, Next, Request, RequestContext};
use crate::error::AppError;

/// Observes failures escaping the handler and logs the unrecognized ones.
///
/// Failures inside the published vocabulary pass through silently; they are
/// expected outcomes, not incidents. Anything else is logged at error level
/// with the request type and payload, then re-raised unchanged. Errors are
/// never translated or swallowed here.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnhandledErrorBehavior;

#[async_trait]
impl<R: Request> Behavior<R> for UnhandledErrorBehavior {
    async fn handle(
        &self,
        request: R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> Result<R::Response, AppError> {
        // Snapshot before the request moves into the chain; only consulted
        // on the error path.
        let payload = serde_json::to_value(&request).unwrap_or(serde_json::Value::Null);

        match next.run(request, ctx).await {
            Err(err) if !err.is_recognized() => {
                tracing::error!(
                    request = R::name(),
                    user_id = ?ctx.user_id,
                    payload = %payload,
                    error = %err,
                    "unhandled error"
                );
                Err(err)
            }
            result => result,
        }
    }
}
