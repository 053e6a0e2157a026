//! Favorite filtering and sorting

use std::sync::OnceLock;

use taplist_core::{Predicate, SortColumns};

use super::queries::list::ListFavoritesQuery;
use crate::models::Favorite;

pub fn predicates(query: &ListFavoritesQuery) -> Vec<Predicate<Favorite>> {
    let mut predicates: Vec<Predicate<Favorite>> = Vec::new();

    if let Some(user_id) = query.user_id {
        predicates.push(Box::new(move |favorite: &Favorite| {
            favorite.user_id == user_id
        }));
    }

    if let Some(beer_id) = query.beer_id {
        predicates.push(Box::new(move |favorite: &Favorite| {
            favorite.beer_id == beer_id
        }));
    }

    if let Some(term) = query.params.search_term() {
        predicates.push(Box::new(move |favorite: &Favorite| {
            favorite.beer_name.to_lowercase().contains(&term)
        }));
    }

    predicates
}

/// The favorite sort registry. CREATED is the default.
pub fn sort_columns() -> &'static SortColumns<Favorite> {
    static COLUMNS: OnceLock<SortColumns<Favorite>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        SortColumns::new()
            .by_key("CREATED", |favorite: &Favorite| favorite.created_at)
            .by_key("BEER", |favorite: &Favorite| favorite.beer_name.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taplist_core::QueryParameters;
    use uuid::Uuid;

    fn favorite(user_id: Uuid, beer_name: &str) -> Favorite {
        Favorite {
            id: Uuid::new_v4(),
            user_id,
            beer_id: Uuid::new_v4(),
            beer_name: beer_name.into(),
            created_at: Utc::now(),
        }
    }

    fn matches(query: &ListFavoritesQuery, favorite: &Favorite) -> bool {
        predicates(query).iter().all(|predicate| predicate(favorite))
    }

    #[test]
    fn test_default_query_matches_everything() {
        let query = ListFavoritesQuery::default();
        assert!(predicates(&query).is_empty());
        assert!(matches(&query, &favorite(Uuid::new_v4(), "Anything")));
    }

    #[test]
    fn test_user_filter_is_exact() {
        let user = Uuid::new_v4();
        let query = ListFavoritesQuery {
            user_id: Some(user),
            ..ListFavoritesQuery::default()
        };
        assert!(matches(&query, &favorite(user, "Mine")));
        assert!(!matches(&query, &favorite(Uuid::new_v4(), "Theirs")));
    }

    #[test]
    fn test_search_matches_the_beer_name() {
        let query = ListFavoritesQuery {
            params: QueryParameters {
                search_query: Some("stout".into()),
                ..QueryParameters::new()
            },
            ..ListFavoritesQuery::default()
        };
        assert!(matches(&query, &favorite(Uuid::new_v4(), "Midnight Stout")));
        assert!(!matches(&query, &favorite(Uuid::new_v4(), "Summer Pils")));
    }

    #[test]
    fn test_sort_registry_defaults_to_created() {
        let columns = sort_columns();
        assert_eq!(columns.resolve(None).unwrap().key(), "CREATED");
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["CREATED", "BEER"]);
    }
}
