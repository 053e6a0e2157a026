//! Common query parameters

use serde::{Deserialize, Serialize};
use taplist_common::settings::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

/// Paging, sorting, and search fields shared by every list query.
///
/// All fields are optional; the accessor methods apply the documented
/// defaults so handlers never branch on absence. Raw field values are kept
/// as supplied, which lets the validator distinguish "absent" from
/// "explicitly invalid".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    /// Sort key, matched case-insensitively against the entity's
    /// sorting-column registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page number (1-indexed). Defaults to 1.
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Page size. Defaults to 15, clamped to 1-100.
    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, DEFAULT_MAX_PAGE_SIZE)
    }

    /// The term actually used for matching: trimmed and lowercased, `None`
    /// when the query is absent or blank.
    pub fn search_term(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Sort order applied to the active sort column.
///
/// An out-of-vocabulary direction cannot be represented once a request
/// exists; textual input fails at parse time instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

impl std::str::FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(anyhow::anyhow!("Invalid sort direction: {other}")),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Carrier of the common list-query parameters.
///
/// Entity queries embed [`QueryParameters`] and expose it through this
/// trait, which is what lets one generic validator cover all of them.
pub trait PagedQuery {
    fn params(&self) -> &QueryParameters;
}
