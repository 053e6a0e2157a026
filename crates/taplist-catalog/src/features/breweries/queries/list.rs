//! List breweries query

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use taplist_core::{
    filter, sort, AppError, PagedQuery, PaginatedList, QueryParameters, Request, RequestContext,
    RequestHandler, ValidationFailure, Validator,
};

use crate::features::breweries::filtering;
use crate::models::Brewery;
use crate::store::BreweryStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBreweriesQuery {
    #[serde(flatten)]
    pub params: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_founded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_founded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Request for ListBreweriesQuery {
    type Response = PaginatedList<Brewery>;
}

impl PagedQuery for ListBreweriesQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }
}

pub struct ListBreweriesQueryValidator;

#[async_trait]
impl Validator<ListBreweriesQuery> for ListBreweriesQueryValidator {
    async fn validate(
        &self,
        request: &ListBreweriesQuery,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        if let (Some(min), Some(max)) = (request.min_founded, request.max_founded) {
            if min > max {
                failures.push(ValidationFailure::new(
                    "MinFounded",
                    "MinFounded cannot be greater than MaxFounded",
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

pub struct ListBreweriesHandler {
    store: Arc<dyn BreweryStore>,
}

impl ListBreweriesHandler {
    pub fn new(store: Arc<dyn BreweryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler<ListBreweriesQuery> for ListBreweriesHandler {
    #[tracing::instrument(skip(self, request, ctx))]
    async fn handle(
        &self,
        request: ListBreweriesQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Brewery>, AppError> {
        let breweries = self.store.scan_breweries(ctx).await?;
        let column = filtering::sort_columns().resolve(request.params.sort_by.as_deref())?;

        Ok(PaginatedList::from_iter(
            sort(
                filter(breweries.into_iter(), filtering::predicates(&request)),
                column,
                request.params.sort_direction,
            ),
            request.params.page_number(),
            request.params.page_size(),
        ))
    }
}
