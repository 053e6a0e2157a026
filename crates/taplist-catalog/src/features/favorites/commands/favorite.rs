//! Favorite beer command

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler};

use crate::models::Favorite;
use crate::store::{BeerStore, FavoriteStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteBeerCommand {
    pub beer_id: Uuid,
}

impl Request for FavoriteBeerCommand {
    type Response = Favorite;
}

pub struct FavoriteBeerHandler {
    beers: Arc<dyn BeerStore>,
    favorites: Arc<dyn FavoriteStore>,
}

impl FavoriteBeerHandler {
    pub fn new(beers: Arc<dyn BeerStore>, favorites: Arc<dyn FavoriteStore>) -> Self {
        Self { beers, favorites }
    }
}

#[async_trait]
impl RequestHandler<FavoriteBeerCommand> for FavoriteBeerHandler {
    #[tracing::instrument(skip(self, ctx))]
    async fn handle(
        &self,
        request: FavoriteBeerCommand,
        ctx: &RequestContext,
    ) -> Result<Favorite, AppError> {
        let Some(user_id) = ctx.user_id else {
            return Err(AppError::Forbidden);
        };

        let beer = self
            .beers
            .find_beer(ctx, request.beer_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(format!("No beer with id {}", request.beer_id))
            })?;

        if self
            .favorites
            .find_favorite(ctx, user_id, request.beer_id)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(format!(
                "'{}' is already a favorite",
                beer.name
            )));
        }

        let favorite = Favorite {
            id: Uuid::new_v4(),
            user_id,
            beer_id: beer.id,
            beer_name: beer.name,
            created_at: Utc::now(),
        };

        self.favorites.insert_favorite(ctx, favorite.clone()).await?;
        tracing::info!(beer_id = %favorite.beer_id, "beer favorited");
        Ok(favorite)
    }
}
