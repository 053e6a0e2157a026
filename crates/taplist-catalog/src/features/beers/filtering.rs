//! Beer filtering and sorting
//!
//! Range filters always contribute a predicate, falling back to the
//! published default bounds when a bound is absent; beers with a null
//! optional field pass any range over that field. Exact-match filters
//! contribute only when supplied. The search predicate is appended last and
//! matches case-insensitively across name, style, and description.

use std::sync::OnceLock;

use taplist_core::{Predicate, SortColumns};

use super::queries::list::ListBeersQuery;
use crate::models::Beer;

pub const MIN_ABV: f64 = 0.0;
pub const MAX_ABV: f64 = 100.0;
pub const MIN_IBU: i32 = 0;
pub const MAX_IBU: i32 = 200;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

pub fn predicates(query: &ListBeersQuery) -> Vec<Predicate<Beer>> {
    let mut predicates: Vec<Predicate<Beer>> = Vec::new();

    let min_abv = query.min_abv.unwrap_or(MIN_ABV);
    let max_abv = query.max_abv.unwrap_or(MAX_ABV);
    predicates.push(Box::new(move |beer: &Beer| {
        beer.abv >= min_abv && beer.abv <= max_abv
    }));

    let min_ibu = query.min_ibu.unwrap_or(MIN_IBU);
    let max_ibu = query.max_ibu.unwrap_or(MAX_IBU);
    predicates.push(Box::new(move |beer: &Beer| {
        beer.ibu.map_or(true, |ibu| ibu >= min_ibu && ibu <= max_ibu)
    }));

    let min_rating = query.min_rating.unwrap_or(MIN_RATING);
    let max_rating = query.max_rating.unwrap_or(MAX_RATING);
    predicates.push(Box::new(move |beer: &Beer| {
        beer.rating
            .map_or(true, |rating| rating >= min_rating && rating <= max_rating)
    }));

    if let Some(brewery_id) = query.brewery_id {
        predicates.push(Box::new(move |beer: &Beer| beer.brewery_id == brewery_id));
    }

    if let Some(style) = query
        .style
        .as_deref()
        .map(str::trim)
        .filter(|style| !style.is_empty())
    {
        let style = style.to_string();
        predicates.push(Box::new(move |beer: &Beer| {
            beer.style.eq_ignore_ascii_case(&style)
        }));
    }

    if let Some(term) = query.params.search_term() {
        predicates.push(Box::new(move |beer: &Beer| {
            beer.name.to_lowercase().contains(&term)
                || beer.style.to_lowercase().contains(&term)
                || beer
                    .description
                    .as_deref()
                    .map_or(false, |description| description.to_lowercase().contains(&term))
        }));
    }

    predicates
}

/// The beer sort registry. NAME is the default.
pub fn sort_columns() -> &'static SortColumns<Beer> {
    static COLUMNS: OnceLock<SortColumns<Beer>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        SortColumns::new()
            .by_key("NAME", |beer: &Beer| beer.name.to_lowercase())
            .by_f64("ABV", |beer: &Beer| beer.abv)
            .by_key("IBU", |beer: &Beer| beer.ibu)
            .by_f64("RATING", |beer: &Beer| beer.rating.unwrap_or(0.0))
            .by_key("OPINIONS", |beer: &Beer| beer.opinions_count)
            .by_key("CREATED", |beer: &Beer| beer.created_at)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taplist_core::QueryParameters;
    use uuid::Uuid;

    fn beer(name: &str, style: &str, abv: f64, ibu: Option<i32>, rating: Option<f64>) -> Beer {
        Beer {
            id: Uuid::new_v4(),
            brewery_id: Uuid::new_v4(),
            name: name.into(),
            style: style.into(),
            abv,
            ibu,
            rating,
            opinions_count: 0,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn matches(query: &ListBeersQuery, beer: &Beer) -> bool {
        predicates(query).iter().all(|predicate| predicate(beer))
    }

    #[test]
    fn test_default_query_matches_everything() {
        let query = ListBeersQuery::default();
        assert!(matches(&query, &beer("Any", "Pils", 4.8, Some(30), Some(3.0))));
        assert!(matches(&query, &beer("Strong", "Barleywine", 12.5, None, None)));
    }

    #[test]
    fn test_abv_range_filters() {
        let query = ListBeersQuery {
            min_abv: Some(5.0),
            max_abv: Some(8.0),
            ..ListBeersQuery::default()
        };
        assert!(matches(&query, &beer("Mid", "IPA", 6.5, None, None)));
        assert!(!matches(&query, &beer("Light", "Radler", 2.5, None, None)));
        assert!(!matches(&query, &beer("Heavy", "Imperial", 11.0, None, None)));
    }

    #[test]
    fn test_null_optional_fields_pass_range_filters() {
        let query = ListBeersQuery {
            min_ibu: Some(40),
            min_rating: Some(4.0),
            ..ListBeersQuery::default()
        };
        // No IBU and no rating recorded: both ranges pass.
        assert!(matches(&query, &beer("Mystery", "Saison", 6.0, None, None)));
        assert!(!matches(&query, &beer("Mild", "Helles", 5.0, Some(18), Some(4.5))));
    }

    #[test]
    fn test_style_matches_exactly_ignoring_case() {
        let query = ListBeersQuery {
            style: Some("stout".into()),
            ..ListBeersQuery::default()
        };
        assert!(matches(&query, &beer("Dark", "Stout", 7.0, None, None)));
        assert!(!matches(&query, &beer("Darker", "Imperial Stout", 10.0, None, None)));
    }

    #[test]
    fn test_blank_style_is_ignored() {
        let query = ListBeersQuery {
            style: Some("   ".into()),
            ..ListBeersQuery::default()
        };
        assert!(matches(&query, &beer("Any", "Gose", 4.2, None, None)));
    }

    #[test]
    fn test_brewery_filter_is_exact() {
        let brewery_id = Uuid::new_v4();
        let query = ListBeersQuery {
            brewery_id: Some(brewery_id),
            ..ListBeersQuery::default()
        };
        let mut ours = beer("House", "Alt", 4.8, None, None);
        ours.brewery_id = brewery_id;
        assert!(matches(&query, &ours));
        assert!(!matches(&query, &beer("Theirs", "Alt", 4.8, None, None)));
    }

    #[test]
    fn test_search_spans_name_style_and_description() {
        let query = ListBeersQuery {
            params: QueryParameters {
                search_query: Some("  CITRUS ".into()),
                ..QueryParameters::new()
            },
            ..ListBeersQuery::default()
        };

        let by_name = beer("Citrus Burst", "IPA", 6.0, None, None);
        assert!(matches(&query, &by_name));

        let mut by_description = beer("Golden", "Pale Ale", 5.2, None, None);
        by_description.description = Some("Heavy citrus nose".into());
        assert!(matches(&query, &by_description));

        assert!(!matches(&query, &beer("Roasty", "Porter", 5.8, None, None)));
    }

    #[test]
    fn test_sort_registry_defaults_to_name() {
        let columns = sort_columns();
        assert_eq!(columns.resolve(None).unwrap().key(), "NAME");
        assert_eq!(
            columns.keys().collect::<Vec<_>>(),
            vec!["NAME", "ABV", "IBU", "RATING", "OPINIONS", "CREATED"]
        );
    }
}
