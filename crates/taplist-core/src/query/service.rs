//! Entity-agnostic filtering and sorting
//!
//! Both operations adapt iterators without forcing materialization. [`filter`]
//! folds its predicates with logical AND as elements stream through, and
//! [`sort`] defers buffering and comparator work until the first element is
//! pulled, so pagination composes on top and drains the whole pipeline in
//! one pass.

use crate::query::params::SortDirection;
use crate::query::sorting::{Comparator, SortColumn};

/// A boolean condition over a single entity instance, used as one filter
/// term.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Apply `predicates` conjunctively, in the supplied order.
///
/// An element passes only when every predicate accepts it; with no
/// predicates the source streams through unchanged.
pub fn filter<T, I>(source: I, predicates: Vec<Predicate<T>>) -> impl Iterator<Item = T>
where
    I: Iterator<Item = T>,
{
    source.filter(move |item| predicates.iter().all(|predicate| predicate(item)))
}

/// Order `source` by one resolved column and direction.
///
/// Exactly one sort key is active per query. Ties between equal keys land in
/// whatever order the unstable sort leaves them, which is not guaranteed to
/// be stable across runs.
pub fn sort<T, I>(source: I, column: &SortColumn<T>, direction: SortDirection) -> Sorted<T, I>
where
    I: Iterator<Item = T>,
{
    Sorted {
        state: SortedState::Pending {
            source,
            compare: column.comparator(),
            direction,
        },
    }
}

/// Iterator adapter produced by [`sort`].
///
/// Collects and sorts the source on the first call to `next`, then drains
/// the sorted buffer.
pub struct Sorted<T, I: Iterator<Item = T>> {
    state: SortedState<T, I>,
}

enum SortedState<T, I: Iterator<Item = T>> {
    Pending {
        source: I,
        compare: Comparator<T>,
        direction: SortDirection,
    },
    Drained(std::vec::IntoIter<T>),
}

impl<T, I: Iterator<Item = T>> Iterator for Sorted<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if matches!(self.state, SortedState::Pending { .. }) {
            let state = std::mem::replace(
                &mut self.state,
                SortedState::Drained(Vec::new().into_iter()),
            );
            if let SortedState::Pending {
                source,
                compare,
                direction,
            } = state
            {
                let mut items: Vec<T> = source.collect();
                items.sort_unstable_by(|a, b| match direction {
                    SortDirection::Ascending => compare(a, b),
                    SortDirection::Descending => compare(a, b).reverse(),
                });
                self.state = SortedState::Drained(items.into_iter());
            }
        }

        match &mut self.state {
            SortedState::Drained(items) => items.next(),
            SortedState::Pending { .. } => None,
        }
    }
}
