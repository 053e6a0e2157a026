//! Favorite feature slices

pub mod commands;
pub mod filtering;
pub mod queries;

pub use commands::favorite::{FavoriteBeerCommand, FavoriteBeerHandler};
pub use commands::unfavorite::{UnfavoriteBeerCommand, UnfavoriteBeerHandler};
pub use queries::list::{ListFavoritesHandler, ListFavoritesQuery, ListFavoritesQueryValidator};
