//! Sorting-column registries
//!
//! Each entity publishes a registry mapping stable string keys to typed
//! comparators. Registries are assembled once at startup and shared
//! read-only across concurrent requests; entity code never reorders or
//! extends them afterwards. Declaration order is significant: the first
//! registered column is the default used when a query carries no sort key.

use std::cmp::Ordering;
use std::sync::Arc;

use thiserror::Error;

use crate::error::ValidationFailure;

pub(crate) type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Failures when resolving a sort key against a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortKeyError {
    #[error("Unknown sort key: {key}. Must be one of: {allowed}")]
    Unknown { key: String, allowed: String },

    #[error("No sort columns are registered for this entity")]
    Empty,
}

impl From<SortKeyError> for crate::error::AppError {
    // An unknown key surviving past validation is a wiring mistake, not
    // caller input, so it lands in the unrecognized channel.
    fn from(err: SortKeyError) -> Self {
        crate::error::AppError::Unexpected(anyhow::Error::new(err))
    }
}

/// One named, typed comparator over an entity
pub struct SortColumn<T> {
    key: &'static str,
    cmp: Comparator<T>,
}

impl<T> SortColumn<T> {
    /// The stable identifier this column is published under.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Compare two entities by this column, ascending.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }

    pub(crate) fn comparator(&self) -> Comparator<T> {
        Arc::clone(&self.cmp)
    }
}

impl<T> std::fmt::Debug for SortColumn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortColumn").field("key", &self.key).finish()
    }
}

/// The declaration-ordered sort-column registry for one entity type
pub struct SortColumns<T> {
    columns: Vec<SortColumn<T>>,
}

impl<T> SortColumns<T> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Register a column under `key` with an explicit comparator. The first
    /// registered column is the default.
    ///
    /// # Panics
    ///
    /// Panics when `key` is already registered (case-insensitively).
    /// Registries are built at startup, so a duplicate is a programming
    /// error, not an input error.
    pub fn column<F>(mut self, key: &'static str, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        assert!(
            !self.contains(key),
            "duplicate sort column key: {key}"
        );
        self.columns.push(SortColumn {
            key,
            cmp: Arc::new(compare),
        });
        self
    }

    /// Register a column comparing by an extracted `Ord` key.
    pub fn by_key<K, F>(self, key: &'static str, extract: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.column(key, move |a, b| extract(a).cmp(&extract(b)))
    }

    /// Register a column over a floating-point key, using total ordering so
    /// non-finite values still compare.
    pub fn by_f64<F>(self, key: &'static str, extract: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.column(key, move |a, b| extract(a).total_cmp(&extract(b)))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// The published keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.key)
    }

    /// The allowed keys joined for error messages.
    pub fn allowed_keys(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.key.eq_ignore_ascii_case(key))
    }

    /// Resolve a caller-supplied sort key, case-insensitively.
    ///
    /// `None` or a blank key resolves to the first-declared column. An
    /// unknown key fails loudly rather than silently falling back to the
    /// default; the validator exists to reject it one layer earlier.
    pub fn resolve(&self, sort_by: Option<&str>) -> Result<&SortColumn<T>, SortKeyError> {
        let key = sort_by.map(str::trim).filter(|key| !key.is_empty());

        match key {
            None => self.columns.first().ok_or(SortKeyError::Empty),
            Some(key) => self
                .columns
                .iter()
                .find(|column| column.key.eq_ignore_ascii_case(key))
                .ok_or_else(|| SortKeyError::Unknown {
                    key: key.to_string(),
                    allowed: self.allowed_keys(),
                }),
        }
    }

    /// Validation verdict for a caller-supplied sort key. The rejection
    /// message enumerates the allowed key set.
    pub fn validate_key(&self, sort_by: Option<&str>) -> Option<ValidationFailure> {
        match self.resolve(sort_by) {
            Ok(_) => None,
            Err(err) => Some(ValidationFailure::new("SortBy", err.to_string())),
        }
    }
}

impl<T> Default for SortColumns<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SortColumns<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
