//! Dynamic query engine
//!
//! Turns caller-supplied paging, sorting, filtering, and search parameters
//! into type-safe operations over entity sequences. The composition order is
//! always filter, then sort, then paginate:
//!
//! ```text
//! source -> filter (AND-folded predicates) -> sort (one registered column)
//!        -> paginate (bounded window + metadata)
//! ```
//!
//! Sort keys never reach a comparator as raw strings. Each entity publishes
//! a [`SortColumns`] registry built at startup; validation rejects unknown
//! keys up front and resolution is case-insensitive against the registered
//! set. Filtering and sorting are lazy iterator adapters, so nothing is
//! materialized until [`PaginatedList::from_iter`] drains the sequence in a
//! single pass.

pub mod pagination;
pub mod params;
pub mod service;
pub mod sorting;
pub mod validate;

pub use pagination::{PageMetadata, PaginatedList, PAGINATION_HEADER};
pub use params::{PagedQuery, QueryParameters, SortDirection};
pub use service::{filter, sort, Predicate, Sorted};
pub use sorting::{SortColumn, SortColumns, SortKeyError};
pub use validate::QueryValidator;
