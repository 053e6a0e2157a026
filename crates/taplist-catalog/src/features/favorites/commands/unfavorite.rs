//! Unfavorite beer command

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler};

use crate::store::FavoriteStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfavoriteBeerCommand {
    pub beer_id: Uuid,
}

impl Request for UnfavoriteBeerCommand {
    type Response = ();
}

pub struct UnfavoriteBeerHandler {
    favorites: Arc<dyn FavoriteStore>,
}

impl UnfavoriteBeerHandler {
    pub fn new(favorites: Arc<dyn FavoriteStore>) -> Self {
        Self { favorites }
    }
}

#[async_trait]
impl RequestHandler<UnfavoriteBeerCommand> for UnfavoriteBeerHandler {
    #[tracing::instrument(skip(self, ctx))]
    async fn handle(
        &self,
        request: UnfavoriteBeerCommand,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        let Some(user_id) = ctx.user_id else {
            return Err(AppError::Forbidden);
        };

        let removed = self
            .favorites
            .remove_favorite(ctx, user_id, request.beer_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Favorite", request.beer_id));
        }

        tracing::info!(beer_id = %request.beer_id, "beer unfavorited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Favorite;
    use crate::store::MemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_handle_removes_only_the_callers_favorite() {
        let store = Arc::new(MemoryStore::new());
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let beer_id = Uuid::new_v4();

        for user in [ctx.user_id.unwrap(), Uuid::new_v4()] {
            store
                .insert_favorite(
                    &ctx,
                    Favorite {
                        id: Uuid::new_v4(),
                        user_id: user,
                        beer_id,
                        beer_name: "Shared".into(),
                        created_at: Utc::now(),
                    },
                )
                .await
                .unwrap();
        }

        UnfavoriteBeerHandler::new(store.clone())
            .handle(UnfavoriteBeerCommand { beer_id }, &ctx)
            .await
            .unwrap();

        assert_eq!(store.scan_favorites(&ctx).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_missing_favorite_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let ctx = RequestContext::for_user(Uuid::new_v4());

        let err = UnfavoriteBeerHandler::new(store)
            .handle(
                UnfavoriteBeerCommand {
                    beer_id: Uuid::new_v4(),
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
