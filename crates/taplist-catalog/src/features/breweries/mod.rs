//! Brewery feature slices

pub mod filtering;
pub mod queries;

pub use queries::list::{ListBreweriesHandler, ListBreweriesQuery, ListBreweriesQueryValidator};
