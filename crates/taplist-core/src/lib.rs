//! Taplist Core Library
//!
//! Entity-agnostic machinery shared by every feature of the platform: the
//! request pipeline and the dynamic query engine.
//!
//! # Architecture
//!
//! Every command and query is a plain serializable struct sent through a
//! [`Pipeline`], which wraps its handler in a fixed chain of cross-cutting
//! behaviors (logging, timing, validation, unhandled-error observation).
//! Handlers and behaviors return [`AppError`], a closed vocabulary of
//! recognized failures plus one catch-all for everything unexpected.
//!
//! List queries additionally carry [`QueryParameters`] and flow through the
//! query engine: predicates are AND-folded lazily, the sort key resolves
//! against a per-entity [`SortColumns`] registry, and
//! [`PaginatedList::from_iter`] drains the composed sequence in a single
//! pass.
//!
//! Nothing in this crate knows about concrete entities; those live in the
//! catalog crate, which wires its own queries, validators, and sort
//! registries on top of these pieces.

pub mod error;
pub mod pipeline;
pub mod query;

pub use error::{AppError, AppResult, ValidationFailure, ValidationFailures};
pub use pipeline::{
    Behavior, Next, PerformanceBehavior, Pipeline, Request, RequestContext, RequestHandler,
    RequestLoggingBehavior, UnhandledErrorBehavior, ValidationBehavior, Validator,
};
pub use query::{
    filter, sort, PageMetadata, PagedQuery, PaginatedList, Predicate, QueryParameters,
    QueryValidator, SortColumn, SortColumns, SortDirection, SortKeyError, PAGINATION_HEADER,
};
