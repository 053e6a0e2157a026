//! Opinion filtering and sorting

use std::sync::OnceLock;

use taplist_core::{Predicate, SortColumns};

use super::queries::list::ListOpinionsQuery;
use crate::models::Opinion;

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 10;

pub fn predicates(query: &ListOpinionsQuery) -> Vec<Predicate<Opinion>> {
    let mut predicates: Vec<Predicate<Opinion>> = Vec::new();

    let min_rating = query.min_rating.unwrap_or(MIN_RATING);
    let max_rating = query.max_rating.unwrap_or(MAX_RATING);
    predicates.push(Box::new(move |opinion: &Opinion| {
        opinion.rating >= min_rating && opinion.rating <= max_rating
    }));

    if let Some(beer_id) = query.beer_id {
        predicates.push(Box::new(move |opinion: &Opinion| opinion.beer_id == beer_id));
    }

    if let Some(user_id) = query.user_id {
        predicates.push(Box::new(move |opinion: &Opinion| opinion.user_id == user_id));
    }

    if let Some(term) = query.params.search_term() {
        predicates.push(Box::new(move |opinion: &Opinion| {
            opinion
                .comment
                .as_deref()
                .map_or(false, |comment| comment.to_lowercase().contains(&term))
        }));
    }

    predicates
}

/// The opinion sort registry. CREATED is the default so listings read as a
/// timeline.
pub fn sort_columns() -> &'static SortColumns<Opinion> {
    static COLUMNS: OnceLock<SortColumns<Opinion>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        SortColumns::new()
            .by_key("CREATED", |opinion: &Opinion| opinion.created_at)
            .by_key("RATING", |opinion: &Opinion| opinion.rating)
    })
}
