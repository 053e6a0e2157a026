//! Generic query validation
//!
//! Structural rules every list query must satisfy before its handler runs.
//! Entity validators layer range and sort-key rules on top without
//! restating these.

use async_trait::async_trait;
use taplist_common::settings::QuerySettings;
use taplist_common::Settings;

use crate::error::{AppError, ValidationFailure};
use crate::pipeline::{Request, RequestContext, Validator};
use crate::query::params::{PagedQuery, QueryParameters};

/// Validates the common paging, sorting, and search fields of any query
/// carrying [`QueryParameters`].
///
/// Only explicitly supplied values are checked; absent fields fall back to
/// defaults at read time and cannot fail here.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    limits: QuerySettings,
}

impl QueryValidator {
    pub fn new(limits: QuerySettings) -> Self {
        Self { limits }
    }

    /// Apply the structural rules to `params`.
    pub fn check(&self, params: &QueryParameters) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if let Some(page_number) = params.page_number {
            if page_number < 1 {
                failures.push(ValidationFailure::new(
                    "PageNumber",
                    "Page number must be at least 1",
                ));
            }
        }

        if let Some(page_size) = params.page_size {
            if page_size < 1 {
                failures.push(ValidationFailure::new(
                    "PageSize",
                    "Page size must be at least 1",
                ));
            } else if page_size > self.limits.max_page_size {
                failures.push(ValidationFailure::new(
                    "PageSize",
                    format!("Page size cannot exceed {}", self.limits.max_page_size),
                ));
            }
        }

        if let Some(search) = &params.search_query {
            if search.chars().count() > self.limits.max_search_length {
                failures.push(ValidationFailure::new(
                    "SearchQuery",
                    format!(
                        "Search query cannot exceed {} characters",
                        self.limits.max_search_length
                    ),
                ));
            }
        }

        if let Some(sort_by) = &params.sort_by {
            if sort_by.chars().count() > self.limits.max_sort_key_length {
                failures.push(ValidationFailure::new(
                    "SortBy",
                    format!(
                        "Sort key cannot exceed {} characters",
                        self.limits.max_sort_key_length
                    ),
                ));
            }
        }

        failures
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(Settings::default().query)
    }
}

#[async_trait]
impl<R> Validator<R> for QueryValidator
where
    R: Request + PagedQuery,
{
    async fn validate(
        &self,
        request: &R,
        _ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        Ok(self.check(request.params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> QueryValidator {
        QueryValidator::default()
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(validator().check(&QueryParameters::new()).is_empty());
    }

    #[test]
    fn test_validation_accepts_in_range_values() {
        let params = QueryParameters {
            page_number: Some(2),
            page_size: Some(50),
            search_query: Some("stout".into()),
            sort_by: Some("NAME".into()),
            ..QueryParameters::new()
        };
        assert!(validator().check(&params).is_empty());
    }

    #[test]
    fn test_validation_rejects_zero_page_number() {
        let params = QueryParameters {
            page_number: Some(0),
            ..QueryParameters::new()
        };
        let failures = validator().check(&params);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "PageNumber");
    }

    #[test]
    fn test_validation_rejects_out_of_range_page_size() {
        let too_small = QueryParameters {
            page_size: Some(0),
            ..QueryParameters::new()
        };
        let failures = validator().check(&too_small);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "PageSize");

        let too_large = QueryParameters {
            page_size: Some(101),
            ..QueryParameters::new()
        };
        let failures = validator().check(&too_large);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "Page size cannot exceed 100");
    }

    #[test]
    fn test_validation_rejects_overlong_search_query() {
        let params = QueryParameters {
            search_query: Some("x".repeat(101)),
            ..QueryParameters::new()
        };
        let failures = validator().check(&params);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "SearchQuery");
    }

    #[test]
    fn test_validation_rejects_overlong_sort_key() {
        let params = QueryParameters {
            sort_by: Some("k".repeat(51)),
            ..QueryParameters::new()
        };
        let failures = validator().check(&params);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "SortBy");
    }

    #[test]
    fn test_validation_collects_multiple_failures() {
        let params = QueryParameters {
            page_number: Some(-1),
            page_size: Some(1000),
            ..QueryParameters::new()
        };
        let failures = validator().check(&params);
        assert_eq!(failures.len(), 2);
    }
}
