//! List beers query

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{
    filter, sort, AppError, PagedQuery, PaginatedList, QueryParameters, Request, RequestContext,
    RequestHandler, ValidationFailure, Validator,
};

use crate::features::beers::filtering;
use crate::models::{Beer, BeerListItem};
use crate::store::BeerStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBeersQuery {
    #[serde(flatten)]
    pub params: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_abv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ibu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ibu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brewery_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Request for ListBeersQuery {
    type Response = PaginatedList<BeerListItem>;
}

impl PagedQuery for ListBeersQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }
}

/// Range consistency and sort-key membership for beer listings. The generic
/// paging rules run separately through the shared query validator.
pub struct ListBeersQueryValidator;

#[async_trait]
impl Validator<ListBeersQuery> for ListBeersQueryValidator {
    async fn validate(
        &self,
        request: &ListBeersQuery,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        if let (Some(min), Some(max)) = (request.min_abv, request.max_abv) {
            if min > max {
                failures.push(ValidationFailure::new(
                    "MinAbv",
                    "MinAbv cannot be greater than MaxAbv",
                ));
            }
        }

        if let (Some(min), Some(max)) = (request.min_ibu, request.max_ibu) {
            if min > max {
                failures.push(ValidationFailure::new(
                    "MinIbu",
                    "MinIbu cannot be greater than MaxIbu",
                ));
            }
        }

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

pub struct ListBeersHandler {
    store: Arc<dyn BeerStore>,
}

impl ListBeersHandler {
    pub fn new(store: Arc<dyn BeerStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler<ListBeersQuery> for ListBeersHandler {
    #[tracing::instrument(skip(self, request, ctx))]
    async fn handle(
        &self,
        request: ListBeersQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<BeerListItem>, AppError> {
        let beers: Vec<Beer> = self.store.scan_beers(ctx).await?;
        let column = filtering::sort_columns().resolve(request.params.sort_by.as_deref())?;

        let page = PaginatedList::from_iter(
            sort(
                filter(beers.into_iter(), filtering::predicates(&request)),
                column,
                request.params.sort_direction,
            ),
            request.params.page_number(),
            request.params.page_size(),
        );

        tracing::debug!(
            total = page.total_count(),
            page = page.page_number(),
            "listed beers"
        );
        Ok(page.map(BeerListItem::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(query: &ListBeersQuery) -> Vec<ValidationFailure> {
        tokio_test::block_on(ListBeersQueryValidator.validate(query, &RequestContext::new()))
            .unwrap()
    }

    #[test]
    fn test_validation_accepts_default_query() {
        assert!(validate(&ListBeersQuery::default()).is_empty());
    }

    #[test]
    fn test_validation_rejects_inverted_abv_range() {
        let query = ListBeersQuery {
            min_abv: Some(8.0),
            max_abv: Some(4.0),
            ..ListBeersQuery::default()
        };
        let failures = validate(&query);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "MinAbv");
    }

    #[test]
    fn test_validation_rejects_every_inverted_range_at_once() {
        let query = ListBeersQuery {
            min_abv: Some(8.0),
            max_abv: Some(4.0),
            min_ibu: Some(90),
            max_ibu: Some(10),
            min_rating: Some(9.0),
            max_rating: Some(1.0),
            ..ListBeersQuery::default()
        };
        assert_eq!(validate(&query).len(), 3);
    }

    #[test]
    fn test_validation_rejects_unknown_sort_key_with_allowed_set() {
        let query = ListBeersQuery {
            params: QueryParameters {
                sort_by: Some("COLOR".into()),
                ..QueryParameters::new()
            },
            ..ListBeersQuery::default()
        };
        let failures = validate(&query);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "SortBy");
        assert!(failures[0]
            .message
            .contains("Must be one of: NAME, ABV, IBU, RATING, OPINIONS, CREATED"));
    }

    #[test]
    fn test_validation_accepts_known_sort_key_case_insensitively() {
        let query = ListBeersQuery {
            params: QueryParameters {
                sort_by: Some("rating".into()),
                ..QueryParameters::new()
            },
            ..ListBeersQuery::default()
        };
        assert!(validate(&query).is_empty());
    }
}
