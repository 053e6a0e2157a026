//! Store abstractions
//!
//! Async per-entity data sources consumed by the feature handlers. Every
//! operation takes the request context and checks its cancellation token
//! before touching data. Implementations own their synchronization; the
//! handlers never lock.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use taplist_core::{AppError, RequestContext};

use crate::models::{Beer, Brewery, Favorite, Opinion};

#[async_trait]
pub trait BeerStore: Send + Sync {
    /// Snapshot of every beer; the query engine filters and pages.
    async fn scan_beers(&self, ctx: &RequestContext) -> Result<Vec<Beer>, AppError>;
    async fn find_beer(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Beer>, AppError>;
    async fn insert_beer(&self, ctx: &RequestContext, beer: Beer) -> Result<(), AppError>;
    /// Replace the stored beer with the same id. No-op when absent.
    async fn update_beer(&self, ctx: &RequestContext, beer: Beer) -> Result<(), AppError>;
    /// Returns whether a beer was actually removed.
    async fn remove_beer(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait BreweryStore: Send + Sync {
    async fn scan_breweries(&self, ctx: &RequestContext) -> Result<Vec<Brewery>, AppError>;
    async fn find_brewery(&self, ctx: &RequestContext, id: Uuid)
        -> Result<Option<Brewery>, AppError>;
    async fn insert_brewery(&self, ctx: &RequestContext, brewery: Brewery)
        -> Result<(), AppError>;
}

#[async_trait]
pub trait OpinionStore: Send + Sync {
    async fn scan_opinions(&self, ctx: &RequestContext) -> Result<Vec<Opinion>, AppError>;
    async fn find_opinion(&self, ctx: &RequestContext, id: Uuid)
        -> Result<Option<Opinion>, AppError>;
    async fn insert_opinion(&self, ctx: &RequestContext, opinion: Opinion)
        -> Result<(), AppError>;
    async fn remove_opinion(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError>;
    /// Cascade used by beer deletion; returns how many were removed.
    async fn remove_opinions_for_beer(
        &self,
        ctx: &RequestContext,
        beer_id: Uuid,
    ) -> Result<u64, AppError>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn scan_favorites(&self, ctx: &RequestContext) -> Result<Vec<Favorite>, AppError>;
    /// A user favorites a beer at most once, so the pair is the key.
    async fn find_favorite(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        beer_id: Uuid,
    ) -> Result<Option<Favorite>, AppError>;
    async fn insert_favorite(&self, ctx: &RequestContext, favorite: Favorite)
        -> Result<(), AppError>;
    async fn remove_favorite(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        beer_id: Uuid,
    ) -> Result<bool, AppError>;
    /// Cascade used by beer deletion; returns how many were removed.
    async fn remove_favorites_for_beer(
        &self,
        ctx: &RequestContext,
        beer_id: Uuid,
    ) -> Result<u64, AppError>;
}

/// External image storage collaborator. Failures surface as the
/// remote-service or timeout kinds and propagate unchanged.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn remove_beer_images(&self, ctx: &RequestContext, beer_id: Uuid)
        -> Result<(), AppError>;
}
