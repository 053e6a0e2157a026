//! Get beer query

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler};

use crate::models::Beer;
use crate::store::BeerStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBeerQuery {
    pub id: Uuid,
}

impl Request for GetBeerQuery {
    type Response = Beer;
}

pub struct GetBeerHandler {
    store: Arc<dyn BeerStore>,
}

impl GetBeerHandler {
    pub fn new(store: Arc<dyn BeerStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler<GetBeerQuery> for GetBeerHandler {
    #[tracing::instrument(skip(self, ctx))]
    async fn handle(&self, request: GetBeerQuery, ctx: &RequestContext) -> Result<Beer, AppError> {
        self.store
            .find_beer(ctx, request.id)
            .await?
            .ok_or_else(|| AppError::not_found("Beer", request.id))
    }
}
