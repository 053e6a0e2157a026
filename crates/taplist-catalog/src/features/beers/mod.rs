//! Beer feature slices

pub mod commands;
pub mod filtering;
pub mod queries;

pub use commands::create::{CreateBeerCommand, CreateBeerCommandValidator, CreateBeerHandler};
pub use commands::delete::{DeleteBeerCommand, DeleteBeerHandler};
pub use queries::get::{GetBeerHandler, GetBeerQuery};
pub use queries::list::{ListBeersHandler, ListBeersQuery, ListBeersQueryValidator};
