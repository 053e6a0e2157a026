//! Delete beer command

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler};

use crate::store::{BeerStore, FavoriteStore, ImageStore, OpinionStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBeerCommand {
    pub id: Uuid,
}

impl Request for DeleteBeerCommand {
    type Response = ();
}

/// Removes a beer together with its opinions, favorites, and stored images.
/// Image-store failures propagate unchanged; the beer record itself is
/// removed last so a failed cascade leaves it discoverable.
pub struct DeleteBeerHandler {
    beers: Arc<dyn BeerStore>,
    opinions: Arc<dyn OpinionStore>,
    favorites: Arc<dyn FavoriteStore>,
    images: Arc<dyn ImageStore>,
}

impl DeleteBeerHandler {
    pub fn new(
        beers: Arc<dyn BeerStore>,
        opinions: Arc<dyn OpinionStore>,
        favorites: Arc<dyn FavoriteStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            beers,
            opinions,
            favorites,
            images,
        }
    }
}

#[async_trait]
impl RequestHandler<DeleteBeerCommand> for DeleteBeerHandler {
    #[tracing::instrument(skip(self, ctx))]
    async fn handle(&self, request: DeleteBeerCommand, ctx: &RequestContext) -> Result<(), AppError> {
        if self.beers.find_beer(ctx, request.id).await?.is_none() {
            return Err(AppError::not_found("Beer", request.id));
        }

        let opinions = self.opinions.remove_opinions_for_beer(ctx, request.id).await?;
        let favorites = self
            .favorites
            .remove_favorites_for_beer(ctx, request.id)
            .await?;
        self.images.remove_beer_images(ctx, request.id).await?;
        self.beers.remove_beer(ctx, request.id).await?;

        tracing::info!(
            beer_id = %request.id,
            opinions_removed = opinions,
            favorites_removed = favorites,
            "beer deleted"
        );
        Ok(())
    }
}
