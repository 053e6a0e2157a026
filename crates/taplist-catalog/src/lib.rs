//! Beer catalog built on the `taplist-core` pipeline.
//!
//! Functionality is organized into vertical slices under [`features`]: each
//! request type lives next to its validator and handler, and the
//! [`Catalog`](app::Catalog) facade wires every slice into its own pipeline
//! at startup. Persistence sits behind the traits in [`store`], with an
//! in-memory implementation for tests and small deployments.
//!
//! ```no_run
//! use taplist_catalog::app::Catalog;
//! use taplist_catalog::features::beers::ListBeersQuery;
//! use taplist_core::RequestContext;
//!
//! # async fn run() -> Result<(), taplist_core::AppError> {
//! let catalog = Catalog::in_memory();
//! let page = catalog
//!     .list_beers(ListBeersQuery::default(), &RequestContext::new())
//!     .await?;
//! println!("{} beers on page {}", page.len(), page.page_number());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod features;
pub mod models;
pub mod store;

pub use app::{Catalog, Stores};
pub use models::{Beer, BeerListItem, Brewery, Favorite, Opinion};
