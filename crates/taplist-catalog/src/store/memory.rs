//! In-memory store

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use taplist_core::{AppError, RequestContext};

use super::{BeerStore, BreweryStore, FavoriteStore, ImageStore, OpinionStore};
use crate::models::{Beer, Brewery, Favorite, Opinion};

/// Implements every store trait over locked vectors, for tests and
/// embedding.
///
/// Scans return cloned snapshots so the query engine never runs under a
/// lock. Locks are held only for the duration of a synchronous section,
/// never across an await. Also implements [`ImageStore`] by recording which
/// beers had their images removed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    beers: RwLock<Vec<Beer>>,
    breweries: RwLock<Vec<Brewery>>,
    opinions: RwLock<Vec<Opinion>>,
    favorites: RwLock<Vec<Favorite>>,
    removed_images: RwLock<Vec<Uuid>>,
}

// A poisoned lock means a writer panicked mid-update; surface it through
// the unexpected channel instead of propagating the panic.
fn lock_poisoned() -> AppError {
    AppError::Unexpected(anyhow::anyhow!("store lock poisoned"))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Beer ids whose images were removed, in call order.
    pub fn removed_images(&self) -> Result<Vec<Uuid>, AppError> {
        Ok(self
            .removed_images
            .read()
            .map_err(|_| lock_poisoned())?
            .clone())
    }
}

#[async_trait]
impl BeerStore for MemoryStore {
    async fn scan_beers(&self, ctx: &RequestContext) -> Result<Vec<Beer>, AppError> {
        ctx.ensure_active()?;
        Ok(self.beers.read().map_err(|_| lock_poisoned())?.clone())
    }

    async fn find_beer(&self, ctx: &RequestContext, id: Uuid) -> Result<Option<Beer>, AppError> {
        ctx.ensure_active()?;
        let beers = self.beers.read().map_err(|_| lock_poisoned())?;
        Ok(beers.iter().find(|beer| beer.id == id).cloned())
    }

    async fn insert_beer(&self, ctx: &RequestContext, beer: Beer) -> Result<(), AppError> {
        ctx.ensure_active()?;
        self.beers.write().map_err(|_| lock_poisoned())?.push(beer);
        Ok(())
    }

    async fn update_beer(&self, ctx: &RequestContext, beer: Beer) -> Result<(), AppError> {
        ctx.ensure_active()?;
        let mut beers = self.beers.write().map_err(|_| lock_poisoned())?;
        if let Some(slot) = beers.iter_mut().find(|stored| stored.id == beer.id) {
            *slot = beer;
        }
        Ok(())
    }

    async fn remove_beer(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError> {
        ctx.ensure_active()?;
        let mut beers = self.beers.write().map_err(|_| lock_poisoned())?;
        let before = beers.len();
        beers.retain(|beer| beer.id != id);
        Ok(beers.len() < before)
    }
}

#[async_trait]
impl BreweryStore for MemoryStore {
    async fn scan_breweries(&self, ctx: &RequestContext) -> Result<Vec<Brewery>, AppError> {
        ctx.ensure_active()?;
        Ok(self.breweries.read().map_err(|_| lock_poisoned())?.clone())
    }

    async fn find_brewery(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Option<Brewery>, AppError> {
        ctx.ensure_active()?;
        let breweries = self.breweries.read().map_err(|_| lock_poisoned())?;
        Ok(breweries.iter().find(|brewery| brewery.id == id).cloned())
    }

    async fn insert_brewery(
        &self,
        ctx: &RequestContext,
        brewery: Brewery,
    ) -> Result<(), AppError> {
        ctx.ensure_active()?;
        self.breweries
            .write()
            .map_err(|_| lock_poisoned())?
            .push(brewery);
        Ok(())
    }
}

#[async_trait]
impl OpinionStore for MemoryStore {
    async fn scan_opinions(&self, ctx: &RequestContext) -> Result<Vec<Opinion>, AppError> {
        ctx.ensure_active()?;
        Ok(self.opinions.read().map_err(|_| lock_poisoned())?.clone())
    }

    async fn find_opinion(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Option<Opinion>, AppError> {
        ctx.ensure_active()?;
        let opinions = self.opinions.read().map_err(|_| lock_poisoned())?;
        Ok(opinions.iter().find(|opinion| opinion.id == id).cloned())
    }

    async fn insert_opinion(
        &self,
        ctx: &RequestContext,
        opinion: Opinion,
    ) -> Result<(), AppError> {
        ctx.ensure_active()?;
        self.opinions
            .write()
            .map_err(|_| lock_poisoned())?
            .push(opinion);
        Ok(())
    }

    async fn remove_opinion(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError> {
        ctx.ensure_active()?;
        let mut opinions = self.opinions.write().map_err(|_| lock_poisoned())?;
        let before = opinions.len();
        opinions.retain(|opinion| opinion.id != id);
        Ok(opinions.len() < before)
    }

    async fn remove_opinions_for_beer(
        &self,
        ctx: &RequestContext,
        beer_id: Uuid,
    ) -> Result<u64, AppError> {
        ctx.ensure_active()?;
        let mut opinions = self.opinions.write().map_err(|_| lock_poisoned())?;
        let before = opinions.len();
        opinions.retain(|opinion| opinion.beer_id != beer_id);
        Ok((before - opinions.len()) as u64)
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn scan_favorites(&self, ctx: &RequestContext) -> Result<Vec<Favorite>, AppError> {
        ctx.ensure_active()?;
        Ok(self.favorites.read().map_err(|_| lock_poisoned())?.clone())
    }

    async fn find_favorite(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        beer_id: Uuid,
    ) -> Result<Option<Favorite>, AppError> {
        ctx.ensure_active()?;
        let favorites = self.favorites.read().map_err(|_| lock_poisoned())?;
        Ok(favorites
            .iter()
            .find(|favorite| favorite.user_id == user_id && favorite.beer_id == beer_id)
            .cloned())
    }

    async fn insert_favorite(
        &self,
        ctx: &RequestContext,
        favorite: Favorite,
    ) -> Result<(), AppError> {
        ctx.ensure_active()?;
        self.favorites
            .write()
            .map_err(|_| lock_poisoned())?
            .push(favorite);
        Ok(())
    }

    async fn remove_favorite(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        beer_id: Uuid,
    ) -> Result<bool, AppError> {
        ctx.ensure_active()?;
        let mut favorites = self.favorites.write().map_err(|_| lock_poisoned())?;
        let before = favorites.len();
        favorites.retain(|favorite| {
            !(favorite.user_id == user_id && favorite.beer_id == beer_id)
        });
        Ok(favorites.len() < before)
    }

    async fn remove_favorites_for_beer(
        &self,
        ctx: &RequestContext,
        beer_id: Uuid,
    ) -> Result<u64, AppError> {
        ctx.ensure_active()?;
        let mut favorites = self.favorites.write().map_err(|_| lock_poisoned())?;
        let before = favorites.len();
        favorites.retain(|favorite| favorite.beer_id != beer_id);
        Ok((before - favorites.len()) as u64)
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn remove_beer_images(
        &self,
        ctx: &RequestContext,
        beer_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.ensure_active()?;
        self.removed_images
            .write()
            .map_err(|_| lock_poisoned())?
            .push(beer_id);
        Ok(())
    }
}
