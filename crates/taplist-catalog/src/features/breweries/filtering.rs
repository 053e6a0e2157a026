//! Brewery filtering and sorting

use std::sync::OnceLock;

use chrono::{Datelike, Utc};

use taplist_core::{Predicate, SortColumns};

use super::queries::list::ListBreweriesQuery;
use crate::models::Brewery;

pub const MIN_FOUNDED: i32 = 0;

/// Upper default for the founding-year range.
pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn predicates(query: &ListBreweriesQuery) -> Vec<Predicate<Brewery>> {
    let mut predicates: Vec<Predicate<Brewery>> = Vec::new();

    let min_founded = query.min_founded.unwrap_or(MIN_FOUNDED);
    let max_founded = query.max_founded.unwrap_or_else(current_year);
    predicates.push(Box::new(move |brewery: &Brewery| {
        brewery.founded >= min_founded && brewery.founded <= max_founded
    }));

    if let Some(country) = query
        .country
        .as_deref()
        .map(str::trim)
        .filter(|country| !country.is_empty())
    {
        let country = country.to_string();
        predicates.push(Box::new(move |brewery: &Brewery| {
            brewery.country.eq_ignore_ascii_case(&country)
        }));
    }

    if let Some(term) = query.params.search_term() {
        predicates.push(Box::new(move |brewery: &Brewery| {
            brewery.name.to_lowercase().contains(&term)
                || brewery.city.to_lowercase().contains(&term)
                || brewery.country.to_lowercase().contains(&term)
        }));
    }

    predicates
}

/// The brewery sort registry. NAME is the default.
pub fn sort_columns() -> &'static SortColumns<Brewery> {
    static COLUMNS: OnceLock<SortColumns<Brewery>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        SortColumns::new()
            .by_key("NAME", |brewery: &Brewery| brewery.name.to_lowercase())
            .by_key("COUNTRY", |brewery: &Brewery| brewery.country.to_lowercase())
            .by_key("FOUNDED", |brewery: &Brewery| brewery.founded)
            .by_key("CREATED", |brewery: &Brewery| brewery.created_at)
    })
}
