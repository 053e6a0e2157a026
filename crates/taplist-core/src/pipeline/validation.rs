//! Validation behavior

use async_trait::async_trait;

use super::{Behavior, Next, Request, RequestContext};
use crate::error::{AppError, ValidationFailure, ValidationFailures};

/// One validation rule set for a request type.
///
/// Returns field-level verdicts. Infrastructure failures during validation,
/// such as a cancelled request or an unreachable store, propagate as errors
/// instead of verdicts.
#[async_trait]
pub trait Validator<R: Request>: Send + Sync {
    async fn validate(
        &self,
        request: &R,
        ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError>;
}

/// Runs every validator registered for the request type and aggregates their
/// failures.
///
/// All validators run before a verdict is reached, so a single failed
/// request reports every violated rule at once. Any failure means the inner
/// chain, and therefore the handler, is never invoked. With no validators
/// registered the request proceeds untouched.
pub struct ValidationBehavior<R: Request> {
    validators: Vec<Box<dyn Validator<R>>>,
}

impl<R: Request> ValidationBehavior<R> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: impl Validator<R> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }
}

impl<R: Request> Default for ValidationBehavior<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Request> Behavior<R> for ValidationBehavior<R> {
    async fn handle(
        &self,
        request: R,
        ctx: &RequestContext,
        next: Next<'_, R>,
    ) -> Result<R::Response, AppError> {
        if self.validators.is_empty() {
            return next.run(request, ctx).await;
        }

        let mut failures = Vec::new();
        for validator in &self.validators {
            failures.extend(validator.validate(&request, ctx).await?);
        }

        if !failures.is_empty() {
            return Err(AppError::Validation(ValidationFailures::new(failures)));
        }

        next.run(request, ctx).await
    }
}
