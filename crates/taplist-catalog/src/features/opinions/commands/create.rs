//! Create opinion command

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler, ValidationFailure, Validator};

use super::refresh_beer_rating;
use crate::models::Opinion;
use crate::store::{BeerStore, OpinionStore};

pub const MIN_OPINION_RATING: i32 = 1;
pub const MAX_OPINION_RATING: i32 = 10;
pub const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOpinionCommand {
    pub beer_id: Uuid,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Request for CreateOpinionCommand {
    type Response = Opinion;
}

pub struct CreateOpinionCommandValidator;

#[async_trait]
impl Validator<CreateOpinionCommand> for CreateOpinionCommandValidator {
    async fn validate(
        &self,
        request: &CreateOpinionCommand,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        if !(MIN_OPINION_RATING..=MAX_OPINION_RATING).contains(&request.rating) {
            failures.push(ValidationFailure::new(
                "Rating",
                format!("Rating must be between {MIN_OPINION_RATING} and {MAX_OPINION_RATING}"),
            ));
        }

        if let Some(comment) = &request.comment {
            if comment.chars().count() > MAX_COMMENT_LENGTH {
                failures.push(ValidationFailure::new(
                    "Comment",
                    format!("Comment cannot exceed {MAX_COMMENT_LENGTH} characters"),
                ));
            }
        }

        Ok(failures)
    }
}

pub struct CreateOpinionHandler {
    beers: Arc<dyn BeerStore>,
    opinions: Arc<dyn OpinionStore>,
}

impl CreateOpinionHandler {
    pub fn new(beers: Arc<dyn BeerStore>, opinions: Arc<dyn OpinionStore>) -> Self {
        Self { beers, opinions }
    }
}

#[async_trait]
impl RequestHandler<CreateOpinionCommand> for CreateOpinionHandler {
    #[tracing::instrument(skip(self, request, ctx), fields(beer_id = %request.beer_id))]
    async fn handle(
        &self,
        request: CreateOpinionCommand,
        ctx: &RequestContext,
    ) -> Result<Opinion, AppError> {
        let Some(user_id) = ctx.user_id else {
            return Err(AppError::Forbidden);
        };

        if self.beers.find_beer(ctx, request.beer_id).await?.is_none() {
            return Err(AppError::bad_request(format!(
                "No beer with id {}",
                request.beer_id
            )));
        }

        let opinion = Opinion {
            id: Uuid::new_v4(),
            beer_id: request.beer_id,
            user_id,
            rating: request.rating,
            comment: request.comment,
            created_at: Utc::now(),
        };

        self.opinions.insert_opinion(ctx, opinion.clone()).await?;
        refresh_beer_rating(self.beers.as_ref(), self.opinions.as_ref(), ctx, request.beer_id)
            .await?;

        tracing::info!(opinion_id = %opinion.id, rating = opinion.rating, "opinion created");
        Ok(opinion)
    }
}
