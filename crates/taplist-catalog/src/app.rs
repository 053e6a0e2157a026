//! Application facade
//!
//! [`Catalog`] owns the store handles and one pipeline per request type,
//! each assembled at startup with the fixed behavior order and the
//! validators registered for that request. Construction is the single place
//! where registration happens; nothing is discovered at request time.

use std::sync::Arc;

use taplist_common::Settings;
use taplist_core::{
    AppError, PaginatedList, PerformanceBehavior, Pipeline, QueryValidator, Request,
    RequestContext, RequestHandler, RequestLoggingBehavior, UnhandledErrorBehavior,
    ValidationBehavior,
};

use crate::features::beers::{
    CreateBeerCommand, CreateBeerCommandValidator, CreateBeerHandler, DeleteBeerCommand,
    DeleteBeerHandler, GetBeerHandler, GetBeerQuery, ListBeersHandler, ListBeersQuery,
    ListBeersQueryValidator,
};
use crate::features::breweries::{
    ListBreweriesHandler, ListBreweriesQuery, ListBreweriesQueryValidator,
};
use crate::features::favorites::{
    FavoriteBeerCommand, FavoriteBeerHandler, ListFavoritesHandler, ListFavoritesQuery,
    ListFavoritesQueryValidator, UnfavoriteBeerCommand, UnfavoriteBeerHandler,
};
use crate::features::opinions::{
    CreateOpinionCommand, CreateOpinionCommandValidator, CreateOpinionHandler,
    DeleteOpinionCommand, DeleteOpinionHandler, ListOpinionsHandler, ListOpinionsQuery,
    ListOpinionsQueryValidator,
};
use crate::models::{Beer, BeerListItem, Brewery, Favorite, Opinion};
use crate::store::{
    BeerStore, BreweryStore, FavoriteStore, ImageStore, MemoryStore, OpinionStore,
};

/// The store handles the catalog dispatches to.
#[derive(Clone)]
pub struct Stores {
    pub beers: Arc<dyn BeerStore>,
    pub breweries: Arc<dyn BreweryStore>,
    pub opinions: Arc<dyn OpinionStore>,
    pub favorites: Arc<dyn FavoriteStore>,
    pub images: Arc<dyn ImageStore>,
}

impl Stores {
    /// Every handle backed by one fresh shared in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            beers: store.clone(),
            breweries: store.clone(),
            opinions: store.clone(),
            favorites: store.clone(),
            images: store,
        }
    }
}

struct Pipelines {
    list_beers: Pipeline<ListBeersQuery>,
    get_beer: Pipeline<GetBeerQuery>,
    create_beer: Pipeline<CreateBeerCommand>,
    delete_beer: Pipeline<DeleteBeerCommand>,
    list_breweries: Pipeline<ListBreweriesQuery>,
    list_opinions: Pipeline<ListOpinionsQuery>,
    create_opinion: Pipeline<CreateOpinionCommand>,
    delete_opinion: Pipeline<DeleteOpinionCommand>,
    list_favorites: Pipeline<ListFavoritesQuery>,
    favorite_beer: Pipeline<FavoriteBeerCommand>,
    unfavorite_beer: Pipeline<UnfavoriteBeerCommand>,
}

/// The standard chain around a handler: logging, timing, validation, then
/// the unhandled-error observer.
fn pipeline<R: Request>(
    handler: impl RequestHandler<R> + 'static,
    validation: ValidationBehavior<R>,
    settings: &Settings,
) -> Pipeline<R> {
    Pipeline::new(handler)
        .with_behavior(RequestLoggingBehavior)
        .with_behavior(PerformanceBehavior::from_settings(&settings.pipeline))
        .with_behavior(validation)
        .with_behavior(UnhandledErrorBehavior)
}

pub struct Catalog {
    stores: Stores,
    pipelines: Pipelines,
}

impl Catalog {
    pub fn new(stores: Stores, settings: Settings) -> Self {
        let query_rules = || QueryValidator::new(settings.query.clone());

        let pipelines = Pipelines {
            list_beers: pipeline(
                ListBeersHandler::new(stores.beers.clone()),
                ValidationBehavior::new()
                    .with_validator(query_rules())
                    .with_validator(ListBeersQueryValidator),
                &settings,
            ),
            get_beer: pipeline(
                GetBeerHandler::new(stores.beers.clone()),
                ValidationBehavior::new(),
                &settings,
            ),
            create_beer: pipeline(
                CreateBeerHandler::new(stores.beers.clone(), stores.breweries.clone()),
                ValidationBehavior::new()
                    .with_validator(CreateBeerCommandValidator::new(stores.beers.clone())),
                &settings,
            ),
            delete_beer: pipeline(
                DeleteBeerHandler::new(
                    stores.beers.clone(),
                    stores.opinions.clone(),
                    stores.favorites.clone(),
                    stores.images.clone(),
                ),
                ValidationBehavior::new(),
                &settings,
            ),
            list_breweries: pipeline(
                ListBreweriesHandler::new(stores.breweries.clone()),
                ValidationBehavior::new()
                    .with_validator(query_rules())
                    .with_validator(ListBreweriesQueryValidator),
                &settings,
            ),
            list_opinions: pipeline(
                ListOpinionsHandler::new(stores.opinions.clone()),
                ValidationBehavior::new()
                    .with_validator(query_rules())
                    .with_validator(ListOpinionsQueryValidator),
                &settings,
            ),
            create_opinion: pipeline(
                CreateOpinionHandler::new(stores.beers.clone(), stores.opinions.clone()),
                ValidationBehavior::new().with_validator(CreateOpinionCommandValidator),
                &settings,
            ),
            delete_opinion: pipeline(
                DeleteOpinionHandler::new(stores.beers.clone(), stores.opinions.clone()),
                ValidationBehavior::new(),
                &settings,
            ),
            list_favorites: pipeline(
                ListFavoritesHandler::new(stores.favorites.clone()),
                ValidationBehavior::new()
                    .with_validator(query_rules())
                    .with_validator(ListFavoritesQueryValidator),
                &settings,
            ),
            favorite_beer: pipeline(
                FavoriteBeerHandler::new(stores.beers.clone(), stores.favorites.clone()),
                ValidationBehavior::new(),
                &settings,
            ),
            unfavorite_beer: pipeline(
                UnfavoriteBeerHandler::new(stores.favorites.clone()),
                ValidationBehavior::new(),
                &settings,
            ),
        };

        Self { stores, pipelines }
    }

    /// Catalog over a fresh in-memory store with default settings.
    pub fn in_memory() -> Self {
        Self::new(Stores::in_memory(), Settings::default())
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub async fn list_beers(
        &self,
        query: ListBeersQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<BeerListItem>, AppError> {
        self.pipelines.list_beers.send(query, ctx).await
    }

    pub async fn get_beer(
        &self,
        query: GetBeerQuery,
        ctx: &RequestContext,
    ) -> Result<Beer, AppError> {
        self.pipelines.get_beer.send(query, ctx).await
    }

    pub async fn create_beer(
        &self,
        command: CreateBeerCommand,
        ctx: &RequestContext,
    ) -> Result<Beer, AppError> {
        self.pipelines.create_beer.send(command, ctx).await
    }

    pub async fn delete_beer(
        &self,
        command: DeleteBeerCommand,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        self.pipelines.delete_beer.send(command, ctx).await
    }

    pub async fn list_breweries(
        &self,
        query: ListBreweriesQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Brewery>, AppError> {
        self.pipelines.list_breweries.send(query, ctx).await
    }

    pub async fn list_opinions(
        &self,
        query: ListOpinionsQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Opinion>, AppError> {
        self.pipelines.list_opinions.send(query, ctx).await
    }

    pub async fn create_opinion(
        &self,
        command: CreateOpinionCommand,
        ctx: &RequestContext,
    ) -> Result<Opinion, AppError> {
        self.pipelines.create_opinion.send(command, ctx).await
    }

    pub async fn delete_opinion(
        &self,
        command: DeleteOpinionCommand,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        self.pipelines.delete_opinion.send(command, ctx).await
    }

    pub async fn list_favorites(
        &self,
        query: ListFavoritesQuery,
        ctx: &RequestContext,
    ) -> Result<PaginatedList<Favorite>, AppError> {
        self.pipelines.list_favorites.send(query, ctx).await
    }

    pub async fn favorite_beer(
        &self,
        command: FavoriteBeerCommand,
        ctx: &RequestContext,
    ) -> Result<Favorite, AppError> {
        self.pipelines.favorite_beer.send(command, ctx).await
    }

    pub async fn unfavorite_beer(
        &self,
        command: UnfavoriteBeerCommand,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        self.pipelines.unfavorite_beer.send(command, ctx).await
    }
}
