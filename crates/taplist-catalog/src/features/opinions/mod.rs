//! Opinion feature slices

pub mod commands;
pub mod filtering;
pub mod queries;

pub use commands::create::{CreateOpinionCommand, CreateOpinionCommandValidator, CreateOpinionHandler};
pub use commands::delete::{DeleteOpinionCommand, DeleteOpinionHandler};
pub use queries::list::{ListOpinionsHandler, ListOpinionsQuery, ListOpinionsQueryValidator};
