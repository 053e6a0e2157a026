//! Create beer command

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taplist_core::{AppError, Request, RequestContext, RequestHandler, ValidationFailure, Validator};

use crate::features::beers::filtering::{MAX_ABV, MAX_IBU, MIN_ABV, MIN_IBU};
use crate::models::Beer;
use crate::store::{BeerStore, BreweryStore};

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBeerCommand {
    pub brewery_id: Uuid,
    pub name: String,
    pub style: String,
    pub abv: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Request for CreateBeerCommand {
    type Response = Beer;
}

/// Field rules plus the store-backed uniqueness rule: a brewery carries at
/// most one beer per name.
pub struct CreateBeerCommandValidator {
    beers: Arc<dyn BeerStore>,
}

impl CreateBeerCommandValidator {
    pub fn new(beers: Arc<dyn BeerStore>) -> Self {
        Self { beers }
    }
}

#[async_trait]
impl Validator<CreateBeerCommand> for CreateBeerCommandValidator {
    async fn validate(
        &self,
        request: &CreateBeerCommand,
        ctx: &RequestContext,
    ) -> Result<Vec<ValidationFailure>, AppError> {
        let mut failures = Vec::new();

        let name = request.name.trim();
        if name.is_empty() {
            failures.push(ValidationFailure::new("Name", "Name is required"));
        } else if name.chars().count() > MAX_NAME_LENGTH {
            failures.push(ValidationFailure::new(
                "Name",
                format!("Name cannot exceed {MAX_NAME_LENGTH} characters"),
            ));
        }

        if request.style.trim().is_empty() {
            failures.push(ValidationFailure::new("Style", "Style is required"));
        }

        if request.abv < MIN_ABV || request.abv > MAX_ABV {
            failures.push(ValidationFailure::new(
                "Abv",
                format!("Abv must be between {MIN_ABV} and {MAX_ABV}"),
            ));
        }

        if let Some(ibu) = request.ibu {
            if !(MIN_IBU..=MAX_IBU).contains(&ibu) {
                failures.push(ValidationFailure::new(
                    "Ibu",
                    format!("Ibu must be between {MIN_IBU} and {MAX_IBU}"),
                ));
            }
        }

        if let Some(description) = &request.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                failures.push(ValidationFailure::new(
                    "Description",
                    format!("Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"),
                ));
            }
        }

        if !name.is_empty() {
            let beers = self.beers.scan_beers(ctx).await?;
            let duplicate = beers.iter().any(|beer| {
                beer.brewery_id == request.brewery_id && beer.name.eq_ignore_ascii_case(name)
            });
            if duplicate {
                failures.push(ValidationFailure::new(
                    "Name",
                    format!("A beer named '{name}' already exists for this brewery"),
                ));
            }
        }

        Ok(failures)
    }
}

pub struct CreateBeerHandler {
    beers: Arc<dyn BeerStore>,
    breweries: Arc<dyn BreweryStore>,
}

impl CreateBeerHandler {
    pub fn new(beers: Arc<dyn BeerStore>, breweries: Arc<dyn BreweryStore>) -> Self {
        Self { beers, breweries }
    }
}

#[async_trait]
impl RequestHandler<CreateBeerCommand> for CreateBeerHandler {
    #[tracing::instrument(skip(self, request, ctx), fields(brewery_id = %request.brewery_id))]
    async fn handle(
        &self,
        request: CreateBeerCommand,
        ctx: &RequestContext,
    ) -> Result<Beer, AppError> {
        if self
            .breweries
            .find_brewery(ctx, request.brewery_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request(format!(
                "No brewery with id {}",
                request.brewery_id
            )));
        }

        let beer = Beer {
            id: Uuid::new_v4(),
            brewery_id: request.brewery_id,
            name: request.name.trim().to_string(),
            style: request.style.trim().to_string(),
            abv: request.abv,
            ibu: request.ibu,
            rating: None,
            opinions_count: 0,
            description: request.description,
            created_at: Utc::now(),
        };

        self.beers.insert_beer(ctx, beer.clone()).await?;
        tracing::info!(beer_id = %beer.id, name = %beer.name, "beer created");
        Ok(beer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn command(name: &str) -> CreateBeerCommand {
        CreateBeerCommand {
            brewery_id: Uuid::new_v4(),
            name: name.into(),
            style: "IPA".into(),
            abv: 6.2,
            ibu: Some(55),
            description: None,
        }
    }

    fn validate(store: Arc<MemoryStore>, command: &CreateBeerCommand) -> Vec<ValidationFailure> {
        tokio_test::block_on(
            CreateBeerCommandValidator::new(store).validate(command, &RequestContext::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_validation_accepts_a_complete_command() {
        let failures = validate(Arc::new(MemoryStore::new()), &command("Sunrise"));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_validation_requires_name_and_style() {
        let mut bad = command("");
        bad.style = " ".into();
        let failures = validate(Arc::new(MemoryStore::new()), &bad);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "Name");
        assert_eq!(failures[1].field, "Style");
    }

    #[test]
    fn test_validation_bounds_abv_and_ibu() {
        let mut bad = command("Overproof");
        bad.abv = 120.0;
        bad.ibu = Some(500);
        let failures = validate(Arc::new(MemoryStore::new()), &bad);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "Abv");
        assert_eq!(failures[1].field, "Ibu");
    }

    #[tokio::test]
    async fn test_validation_rejects_duplicate_name_within_brewery() {
        let store = Arc::new(MemoryStore::new());
        let ctx = RequestContext::new();
        let brewery_id = Uuid::new_v4();

        let existing = Beer {
            id: Uuid::new_v4(),
            brewery_id,
            name: "Sunrise".into(),
            style: "IPA".into(),
            abv: 6.2,
            ibu: None,
            rating: None,
            opinions_count: 0,
            description: None,
            created_at: Utc::now(),
        };
        store.insert_beer(&ctx, existing).await.unwrap();

        let mut duplicate = command("sunrise");
        duplicate.brewery_id = brewery_id;
        let failures = CreateBeerCommandValidator::new(store.clone())
            .validate(&duplicate, &ctx)
            .await
            .unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "Name");

        // Same name under a different brewery is fine.
        let elsewhere = command("Sunrise");
        let failures = CreateBeerCommandValidator::new(store)
            .validate(&elsewhere, &ctx)
            .await
            .unwrap();
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn test_handle_rejects_missing_brewery_as_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let handler = CreateBeerHandler::new(store.clone(), store);

        let err = handler
            .handle(command("Orphan"), &RequestContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_handle_inserts_and_returns_the_beer() {
        let store = Arc::new(MemoryStore::new());
        let ctx = RequestContext::new();
        let brewery = crate::models::Brewery {
            id: Uuid::new_v4(),
            name: "Hop Works".into(),
            country: "Belgium".into(),
            city: "Ghent".into(),
            founded: 1998,
            created_at: Utc::now(),
        };
        store.insert_brewery(&ctx, brewery.clone()).await.unwrap();

        let handler = CreateBeerHandler::new(store.clone(), store.clone());
        let mut create = command("  Sunrise  ");
        create.brewery_id = brewery.id;

        let beer = handler.handle(create, &ctx).await.unwrap();
        assert_eq!(beer.name, "Sunrise");
        assert_eq!(beer.opinions_count, 0);
        assert!(beer.rating.is_none());
        assert!(store.find_beer(&ctx, beer.id).await.unwrap().is_some());
    }
}
