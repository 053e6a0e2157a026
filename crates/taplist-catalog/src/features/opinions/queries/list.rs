//! List opinions query

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{
    filter, sort, AppError, PagedQuery, PaginatedList, QueryParameters, Request, RequestContext,
    RequestHandler, ValidationFailure, Validator,
};

use crate::features::opinions::filtering;
use crate::models::Opinion;
use crate::store::OpinionStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOpinionsQuery {
    #[serde(flatten)]
    pub params: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Request for ListOpinionsQuery {
    type Response = PaginatedList<Opinion>;
}

impl PagedQuery for ListOpinionsQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }
}

pub struct ListOpinionsQueryValidator;

#[async_trait]
impl Validator<ListOpinionsQuery> for ListOpinionsQueryValidator {
    async fn validate(
        &self,
        request: &ListOpinionsQuery,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        if let (Some(min), Some(max)) = (request.min_rating, request.max_rating) {
            if min > max {
                failures.push(ValidationFailure::new(
                    "MinRating",
                    "MinRating cannot be greater than MaxRating",
                ));
            }
        }

        if let Some(failure) =
            filtering::sort_columns().validate_key(request.params.sort_by.as_deref())
        {
            failures.push(failure);
        }

        Ok(failures)
    }
}

pub struct ListOpinionsHandler {
    store: Arc<dyn OpinionStore>,
}

impl ListOpinionsHandler {
    pub fn new(store: Arc<dyn OpinionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler<ListOpinionsQuery> for ListOpinionsHandler {
    #[tracing::instrument(skip(self, request, ctx))]
    async fn handle(
        &self,
        request: ListOpinionsQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Opinion>, AppError> {
        let opinions = self.store.scan_opinions(ctx).await?;
        let column = filtering::sort_columns().resolve(request.params.sort_by.as_deref())?;

        Ok(PaginatedList::from_iter(
            sort(
                filter(opinions.into_iter(), filtering::predicates(&request)),
                column,
                request.params.sort_direction,
            ),
            request.params.page_number(),
            request.params.page_size(),
        ))
    }
}
