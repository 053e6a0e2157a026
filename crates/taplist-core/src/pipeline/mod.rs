//! Request pipeline
//!
//! Every command and query flows through a fixed, statically composed chain
//! of cross-cutting behaviors before its handler runs. The chain is linear,
//! assembled once at startup per request type, and never reordered based on
//! request content:
//!
//! ```text
//! Logging -> Performance -> Validation -> UnhandledError -> Handler
//! ```
//!
//! Behaviors are generic over the request/response pair: each one receives
//! the request, the ambient [`RequestContext`], and a [`Next`] continuation
//! for the rest of the chain. A behavior either forwards or short-circuits
//! with a typed failure; none of them spawns tasks or retries. Registration
//! order is an explicit, testable property of the assembled [`Pipeline`],
//! not a side effect of a container.
//!
//! # Examples
//!
//! ```rust,ignore
//! let pipeline = Pipeline::new(ListBeersHandler::new(store))
//!     .with_behavior(RequestLoggingBehavior)
//!     .with_behavior(PerformanceBehavior::default())
//!     .with_behavior(ValidationBehavior::new().with_validator(QueryValidator::default()))
//!     .with_behavior(UnhandledErrorBehavior);
//!
//! let page = pipeline.send(query, &RequestContext::new()).await?;
//! ```

pub mod logging;
pub mod performance;
pub mod unhandled;
pub mod validation;

pub use logging::RequestLoggingBehavior;
pub use performance::PerformanceBehavior;
pub use unhandled::UnhandledErrorBehavior;
pub use validation::{ValidationBehavior, Validator};

use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AppError;

/// Trim a type path down to its unqualified name, dropping generic
/// parameters.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A request processed by the pipeline.
///
/// Requests are constructed once per inbound call and stay immutable for its
/// duration. `Serialize` is required so behaviors can record a structured
/// snapshot of the payload.
pub trait Request: Serialize + Send + Sync + 'static {
    /// The response type produced by this request's handler.
    type Response: Send + 'static;

    /// Short type name recorded in log entries.
    fn name() -> &'static str {
        short_type_name::<Self>()
    }
}

/// Ambient state threaded through every behavior, handler, and store call.
///
/// One request owns one context; contexts are never shared between
/// concurrent requests. Cloning yields a context linked to the same
/// cancellation token.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The authenticated caller, when there is one.
    pub user_id: Option<Uuid>,
    /// Whether the caller carries the administrator role.
    pub is_admin: bool,
    cancel: CancellationToken,
}

impl RequestContext {
    /// Anonymous context with a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an authenticated caller.
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Context for an administrator.
    pub fn for_admin(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: true,
            ..Self::default()
        }
    }

    /// The cancellation token for this request.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Signal cancellation to every stage of this request.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail with [`AppError::Cancelled`] once the token has fired.
    ///
    /// Stores call this before touching data, so a cancelled request never
    /// half-applies a write.
    pub fn ensure_active(&self) -> Result<(), AppError> {
        if self.cancel.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The innermost stage of a pipeline: the actual query/command logic.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R, ctx: &RequestContext) -> Result<R::Response, AppError>;
}

/// A cross-cutting wrapper invoked around every request's handling.
///
/// Implementations must work for arbitrary request/response pairs and are
/// independently unit-testable against a mock continuation built with
/// [`Next::handler`].
#[async_trait]
pub trait Behavior<R: Request>: Send + Sync {
    async fn handle(
        &self,
        request: R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> Result<R::Response, AppError>;

    /// Name reported by [`Pipeline::behavior_names`].
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// The continuation a behavior forwards to: the remaining behaviors in
/// registration order, then the handler.
pub struct Next<'a, R: Request> {
    behaviors: &'a [Box<dyn Behavior<R>>],
    handler: &'a dyn RequestHandler<R>,
}

impl<'a, R: Request> Next<'a, R> {
    /// Continuation that goes straight to `handler`, with no behaviors in
    /// between. The tail of every chain, and the entry point for exercising
    /// a single behavior in isolation.
    pub fn handler(handler: &'a dyn RequestHandler<R>) -> Self {
        Self {
            behaviors: &[],
            handler,
        }
    }

    /// Invoke the rest of the chain.
    pub async fn run(self, request: R, ctx: &RequestContext) -> Result<R::Response, AppError> {
        match self.behaviors.split_first() {
            Some((head, tail)) => {
                let next = Next {
                    behaviors: tail,
                    handler: self.handler,
                };
                head.handle(request, ctx, next).await
            }
            None => self.handler.handle(request, ctx).await,
        }
    }
}

/// A statically composed behavior chain around one handler.
///
/// Built once at startup per request type and immutable afterwards, so many
/// concurrent requests can flow through it without synchronization.
pub struct Pipeline<R: Request> {
    behaviors: Vec<Box<dyn Behavior<R>>>,
    handler: Box<dyn RequestHandler<R>>,
}

impl<R: Request> Pipeline<R> {
    pub fn new(handler: impl RequestHandler<R> + 'static) -> Self {
        Self {
            behaviors: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Append a behavior to the chain. The first registered behavior is the
    /// outermost one.
    pub fn with_behavior(mut self, behavior: impl Behavior<R> + 'static) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Names of the registered behaviors, outermost first.
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|behavior| behavior.name()).collect()
    }

    /// Send a request through the chain.
    pub async fn send(&self, request: R, ctx: &RequestContext) -> Result<R::Response, AppError> {
        let next = Next {
            behaviors: &self.behaviors,
            handler: self.handler.as_ref(),
        };
        next.run(request, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Serialize)]
    struct Ping {
        value: i32,
    }

    impl Request for Ping {
        type Response = i32;
    }

    struct PingHandler;

    #[async_trait]
    impl RequestHandler<Ping> for PingHandler {
        async fn handle(&self, request: Ping, _ctx: &RequestContext) -> Result<i32, AppError> {
            Ok(request.value * 2)
        }
    }

    struct Tracer {
        label: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Behavior<Ping> for Tracer {
        async fn handle(
            &self,
            request: Ping,
            ctx: &RequestContext,
            next: Next<'_, Ping>,
        ) -> Result<i32, AppError> {
            self.seen.lock().unwrap().push(self.label);
            next.run(request, ctx).await
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    #[tokio::test]
    async fn test_pipeline_without_behaviors_reaches_handler() {
        let pipeline = Pipeline::new(PingHandler);
        let result = pipeline.send(Ping { value: 21 }, &RequestContext::new()).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_behaviors_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(PingHandler)
            .with_behavior(Tracer {
                label: "outer",
                seen: seen.clone(),
            })
            .with_behavior(Tracer {
                label: "inner",
                seen: seen.clone(),
            });

        assert_eq!(pipeline.behavior_names(), vec!["outer", "inner"]);

        let result = pipeline.send(Ping { value: 1 }, &RequestContext::new()).await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["outer", "inner"]);
    }

    #[tokio::test]
    async fn test_next_handler_goes_straight_to_the_handler() {
        let handler = PingHandler;
        let next = Next::handler(&handler);
        let result = next.run(Ping { value: 5 }, &RequestContext::new()).await;
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    fn test_request_name_is_the_unqualified_type_name() {
        assert_eq!(Ping::name(), "Ping");
    }

    #[test]
    fn test_short_type_name_drops_generics() {
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<i64>(), "i64");
    }

    #[test]
    fn test_context_cancellation() {
        let ctx = RequestContext::new();
        assert!(ctx.ensure_active().is_ok());

        ctx.cancel();
        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.ensure_active(), Err(AppError::Cancelled)));
    }

    #[test]
    fn test_context_constructors() {
        let user = uuid::Uuid::new_v4();

        let ctx = RequestContext::for_user(user);
        assert_eq!(ctx.user_id, Some(user));
        assert!(!ctx.is_admin);

        let admin = RequestContext::for_admin(user);
        assert!(admin.is_admin);
    }
}
