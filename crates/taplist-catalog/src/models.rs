//! Catalog entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A beer in the catalog.
///
/// `rating` is the running average over the beer's opinions and
/// `opinions_count` the number contributing to it; both are maintained by
/// the opinion commands, never set directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beer {
    pub id: Uuid,
    pub brewery_id: Uuid,
    pub name: String,
    pub style: String,
    pub abv: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub opinions_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brewery {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub founded: i32,
    pub created_at: DateTime<Utc>,
}

/// A user's rating of a beer, with an optional comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opinion {
    pub id: Uuid,
    pub beer_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's bookmark of a beer. `beer_name` is denormalized so favorite
/// listings sort and search without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub beer_id: Uuid,
    pub beer_name: String,
    pub created_at: DateTime<Utc>,
}

/// The projection returned by beer listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeerListItem {
    pub id: Uuid,
    pub brewery_id: Uuid,
    pub name: String,
    pub style: String,
    pub abv: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub opinions_count: i64,
}

impl From<Beer> for BeerListItem {
    fn from(beer: Beer) -> Self {
        Self {
            id: beer.id,
            brewery_id: beer.brewery_id,
            name: beer.name,
            style: beer.style,
            abv: beer.abv,
            rating: beer.rating,
            opinions_count: beer.opinions_count,
        }
    }
}
