//! List favorites query

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{
    filter, sort, AppError, PagedQuery, PaginatedList, QueryParameters, Request, RequestContext,
    RequestHandler, ValidationFailure, Validator,
};

use crate::features::favorites::filtering;
use crate::models::Favorite;
use crate::store::FavoriteStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFavoritesQuery {
    #[serde(flatten)]
    pub params: QueryParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beer_id: Option<Uuid>,
}

impl Request for ListFavoritesQuery {
    type Response = PaginatedList<Favorite>;
}

impl PagedQuery for ListFavoritesQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }
}

pub struct ListFavoritesQueryValidator;

#[async_trait]
impl Validator<ListFavoritesQuery> for ListFavoritesQueryValidator {
    async fn validate(
        &self,
        request: &ListFavoritesQuery,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        if let Some(failure) =
            filtering::sort_columns().validate_key(request.params.sort_by.as_deref())
        {
            failures.push(failure);
        }

        Ok(failures)
    }
}

pub struct ListFavoritesHandler {
    store: Arc<dyn FavoriteStore>,
}

impl ListFavoritesHandler {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler<ListFavoritesQuery> for ListFavoritesHandler {
    #[tracing::instrument(skip(self, request, ctx))]
    async fn handle(
        &self,
        request: ListFavoritesQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Favorite>, AppError> {
        let favorites = self.store.scan_favorites(ctx).await?;
        let column = filtering::sort_columns().resolve(request.params.sort_by.as_deref())?;

        Ok(PaginatedList::from_iter(
            sort(
                filter(favorites.into_iter(), filtering::predicates(&request)),
                column,
                request.params.sort_direction,
            ),
            request.params.page_number(),
            request.params.page_size(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejects_unknown_sort_key() {
        let query = ListFavoritesQuery {
            params: QueryParameters {
                sort_by: Some("USER".into()),
                ..QueryParameters::new()
            },
            ..ListFavoritesQuery::default()
        };
        let failures = tokio_test::block_on(
            ListFavoritesQueryValidator.validate(&query, &RequestContext::new()),
        )
        .unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("Must be one of: CREATED, BEER"));
    }
}
