//! Failure taxonomy for requests
//!
//! Every request handled by the pipeline either returns its typed response or
//! one of the failure kinds below. The first six variants are the published
//! failure vocabulary callers are expected to match on; [`AppError::Cancelled`]
//! is the surface of a cancelled request, and [`AppError::Unexpected`] is the
//! pass-through channel for anything outside the vocabulary (logged by the
//! unhandled-error behavior, then re-raised unchanged).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for request handling
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Failure kinds surfaced by handlers and behaviors
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more field-level failures. Produced by the validation behavior
    /// before the handler runs, never mid-handler.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailures),

    /// The requested entity does not exist.
    #[error("{entity} with key '{key}' was not found")]
    NotFound { entity: String, key: String },

    /// The caller lacks authorization for this resource or action.
    #[error("Access to the requested resource is forbidden")]
    Forbidden,

    /// Semantically invalid operation detected by domain logic after
    /// structural validation passed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An external collaborator failed or returned an invalid result.
    #[error("Remote service failure: {0}")]
    RemoteService(String),

    /// An external call exceeded its deadline.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The request's cancellation token fired before completion.
    #[error("Request was cancelled")]
    Cancelled,

    /// Anything outside the published vocabulary. The unhandled-error
    /// behavior logs this kind with full context and propagates it unchanged.
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    /// Build a `NotFound` failure from an entity name and its lookup key.
    pub fn not_found(entity: impl Into<String>, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn remote_service(message: impl Into<String>) -> Self {
        Self::RemoteService(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Whether this error belongs to the published failure vocabulary.
    ///
    /// The unhandled-error behavior logs only errors for which this returns
    /// `false` before re-raising them.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, AppError::Unexpected(_))
    }

    /// The field-level failures, when this is a validation error.
    pub fn validation_failures(&self) -> Option<&ValidationFailures> {
        match self {
            AppError::Validation(failures) => Some(failures),
            _ => None,
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The aggregated failure set carried by [`AppError::Validation`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationFailures(Vec<ValidationFailure>);

impl ValidationFailures {
    pub fn new(failures: Vec<ValidationFailure>) -> Self {
        Self(failures)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any failure concerns the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|failure| failure.field == field)
    }

    pub fn into_inner(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl From<Vec<ValidationFailure>> for ValidationFailures {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self(failures)
    }
}

impl std::fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for failure in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", failure)?;
            first = false;
        }
        Ok(())
    }
}
