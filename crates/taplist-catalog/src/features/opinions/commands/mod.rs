pub mod create;
pub mod delete;

use taplist_core::{AppError, RequestContext};
use uuid::Uuid;

use crate::store::{BeerStore, OpinionStore};

/// Recompute a beer's running average rating and opinion count from its
/// current opinions. Called after every opinion insert or removal; a beer
/// with no opinions left goes back to unrated.
pub(crate) async fn refresh_beer_rating(
    beers: &dyn BeerStore,
    opinions: &dyn OpinionStore,
    ctx: &RequestContext,
    beer_id: Uuid,
) -> Result<(), AppError> {
    let ratings: Vec<i32> = opinions
        .scan_opinions(ctx)
        .await?
        .into_iter()
        .filter(|opinion| opinion.beer_id == beer_id)
        .map(|opinion| opinion.rating)
        .collect();

    if let Some(mut beer) = beers.find_beer(ctx, beer_id).await? {
        beer.opinions_count = ratings.len() as i64;
        beer.rating = if ratings.is_empty() {
            None
        } else {
            let sum: f64 = ratings.iter().copied().map(f64::from).sum();
            Some(sum / ratings.len() as f64)
        };
        beers.update_beer(ctx, beer).await?;
    }

    Ok(())
}
