//! Delete opinion command

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler};

use super::refresh_beer_rating;
use crate::store::{BeerStore, OpinionStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOpinionCommand {
    pub id: Uuid,
}

impl Request for DeleteOpinionCommand {
    type Response = ();
}

/// Only the author or an administrator may remove an opinion.
pub struct DeleteOpinionHandler {
    beers: Arc<dyn BeerStore>,
    opinions: Arc<dyn OpinionStore>,
}

impl DeleteOpinionHandler {
    pub fn new(beers: Arc<dyn BeerStore>, opinions: Arc<dyn OpinionStore>) -> Self {
        Self { beers, opinions }
    }
}

#[async_trait]
impl RequestHandler<DeleteOpinionCommand> for DeleteOpinionHandler {
    #[tracing::instrument(skip(self, ctx))]
    async fn handle(
        &self,
        request: DeleteOpinionCommand,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        let opinion = self
            .opinions
            .find_opinion(ctx, request.id)
            .await?
            .ok_or_else(|| AppError::not_found("Opinion", request.id))?;

        if ctx.user_id != Some(opinion.user_id) && !ctx.is_admin {
            return Err(AppError::Forbidden);
        }

        self.opinions.remove_opinion(ctx, request.id).await?;
        refresh_beer_rating(self.beers.as_ref(), self.opinions.as_ref(), ctx, opinion.beer_id)
            .await?;

        tracing::info!(opinion_id = %request.id, "opinion deleted");
        Ok(())
    }
}
