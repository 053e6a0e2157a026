//! Query engine laws
//!
//! Property tests for the filter/sort/paginate composition, plus a handful
//! of end-to-end scenarios over a synthetic entity. The laws here are the
//! ones every entity query relies on: filtering is an order-preserving
//! subsequence, sorting is an ordered permutation, and pages partition the
//! sequence exactly.

use proptest::prelude::*;

use taplist_core::{filter, sort, PaginatedList, Predicate, SortColumns, SortDirection};

fn value_columns() -> SortColumns<i32> {
    SortColumns::new().by_key("VALUE", |n: &i32| *n)
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_the_matching_elements(
        rows in prop::collection::vec(-100i32..100, 0..50),
    ) {
        let predicates: Vec<Predicate<i32>> = vec![
            Box::new(|n| *n >= 0),
            Box::new(|n| n % 3 == 0),
        ];
        let kept: Vec<_> = filter(rows.clone().into_iter(), predicates).collect();

        prop_assert!(kept.iter().all(|n| *n >= 0 && n % 3 == 0));

        let expected: Vec<_> = rows.into_iter().filter(|n| *n >= 0 && n % 3 == 0).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_sort_produces_an_ordered_permutation(
        rows in prop::collection::vec(-1000i32..1000, 0..60),
    ) {
        let columns = value_columns();
        let column = columns.resolve(None).unwrap();

        let ascending: Vec<_> =
            sort(rows.clone().into_iter(), column, SortDirection::Ascending).collect();
        prop_assert!(ascending.windows(2).all(|pair| pair[0] <= pair[1]));

        let mut expected = rows.clone();
        expected.sort_unstable();
        prop_assert_eq!(&ascending, &expected);

        let descending: Vec<_> =
            sort(rows.into_iter(), column, SortDirection::Descending).collect();
        let reversed: Vec<_> = expected.into_iter().rev().collect();
        prop_assert_eq!(descending, reversed);
    }

    #[test]
    fn prop_pages_partition_the_sequence(
        len in 0usize..120,
        page_size in 1i64..20,
    ) {
        let rows: Vec<i64> = (0..len as i64).collect();
        let total_pages =
            PaginatedList::from_iter(rows.clone().into_iter(), 1, page_size).total_pages();

        let mut reassembled = Vec::new();
        let mut page_number = 1;
        loop {
            let page = PaginatedList::from_iter(rows.clone().into_iter(), page_number, page_size);
            prop_assert_eq!(page.total_count(), len as i64);
            prop_assert_eq!(page.total_pages(), total_pages);
            prop_assert!(page.len() as i64 <= page_size);
            prop_assert_eq!(page.has_previous(), page_number > 1);
            prop_assert_eq!(page.has_next(), page_number < total_pages);

            if page.is_empty() {
                break;
            }
            reassembled.extend_from_slice(page.items());
            if !page.has_next() {
                break;
            }
            page_number += 1;
        }

        prop_assert_eq!(reassembled, rows);
    }

    #[test]
    fn prop_total_pages_is_the_ceiling_of_count_over_size(
        len in 0i64..500,
        page_size in 1i64..30,
    ) {
        let page = PaginatedList::from_iter(0..len, 1, page_size);
        let expected = if len == 0 { 0 } else { (len + page_size - 1) / page_size };
        prop_assert_eq!(page.total_pages(), expected);
    }

    #[test]
    fn prop_beyond_range_pages_are_empty_with_intact_totals(
        len in 0i64..100,
        page_size in 1i64..20,
        overshoot in 1i64..10,
    ) {
        let within = PaginatedList::from_iter(0..len, 1, page_size);
        let beyond =
            PaginatedList::from_iter(0..len, within.total_pages() + overshoot, page_size);

        prop_assert!(beyond.is_empty());
        prop_assert!(!beyond.has_next());
        prop_assert_eq!(beyond.total_count(), within.total_count());
        prop_assert_eq!(beyond.total_pages(), within.total_pages());
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Pour {
    name: &'static str,
    score: f64,
    year: i32,
}

fn pours() -> Vec<Pour> {
    vec![
        Pour { name: "Cascade", score: 4.1, year: 2019 },
        Pour { name: "Amarillo", score: 3.2, year: 2021 },
        Pour { name: "Citra", score: 4.8, year: 2020 },
        Pour { name: "Saaz", score: 2.5, year: 2018 },
        Pour { name: "Galaxy", score: 4.8, year: 2022 },
        Pour { name: "Fuggle", score: 1.9, year: 2017 },
    ]
}

fn pour_columns() -> SortColumns<Pour> {
    SortColumns::new()
        .by_key("NAME", |p: &Pour| p.name)
        .by_f64("SCORE", |p: &Pour| p.score)
        .by_key("YEAR", |p: &Pour| p.year)
}

#[test]
fn test_filter_sort_paginate_compose_in_that_order() {
    let columns = pour_columns();
    let column = columns.resolve(Some("score")).unwrap();
    let predicates: Vec<Predicate<Pour>> = vec![Box::new(|p| p.score >= 3.0)];

    let page = PaginatedList::from_iter(
        sort(
            filter(pours().into_iter(), predicates),
            column,
            SortDirection::Descending,
        ),
        1,
        2,
    );

    // Four pours score at least 3.0; the first page holds the top two.
    assert_eq!(page.total_count(), 4);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.len(), 2);
    assert!(page.items().iter().all(|p| p.score >= 4.0));
    assert!(page.has_next());
}

#[test]
fn test_default_sort_column_is_first_declared() {
    let columns = pour_columns();
    let column = columns.resolve(None).unwrap();

    let sorted: Vec<_> = sort(pours().into_iter(), column, SortDirection::Ascending).collect();
    let names: Vec<_> = sorted.iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        vec!["Amarillo", "Cascade", "Citra", "Fuggle", "Galaxy", "Saaz"]
    );
}

#[test]
fn test_float_column_orders_with_total_ordering() {
    let columns = pour_columns();
    let column = columns.resolve(Some("SCORE")).unwrap();

    let sorted: Vec<_> = sort(pours().into_iter(), column, SortDirection::Ascending).collect();
    let scores: Vec<_> = sorted.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![1.9, 2.5, 3.2, 4.1, 4.8, 4.8]);
}

#[test]
fn test_ties_keep_all_tied_elements() {
    // Two pours share a 4.8 score; both must appear, in either order.
    let columns = pour_columns();
    let column = columns.resolve(Some("score")).unwrap();

    let sorted: Vec<_> = sort(pours().into_iter(), column, SortDirection::Descending).collect();
    let top_two: Vec<_> = sorted[..2].iter().map(|p| p.name).collect();
    assert!(top_two.contains(&"Citra"));
    assert!(top_two.contains(&"Galaxy"));
}
