//! Runtime settings
//!
//! Environment-backed configuration for the query engine and the request
//! pipeline. Every knob has a compiled-in default so `Settings::default()` is
//! always usable in tests and embedded setups.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Query Engine Defaults
// ============================================================================

/// Default page size applied when a query does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// Default upper bound on the page size a caller may request.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Default maximum length of a free-text search query, in characters.
pub const DEFAULT_MAX_SEARCH_LENGTH: usize = 100;

/// Default maximum length of a sort key, in characters.
pub const DEFAULT_MAX_SORT_KEY_LENGTH: usize = 50;

// ============================================================================
// Pipeline Defaults
// ============================================================================

/// Default threshold above which a request is logged as slow, in milliseconds.
pub const DEFAULT_SLOW_REQUEST_THRESHOLD_MS: u64 = 500;

/// Workspace-wide runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub query: QuerySettings,
    pub pipeline: PipelineSettings,
}

/// Bounds enforced on incoming query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub max_search_length: usize,
    pub max_sort_key_length: usize,
}

/// Request pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub slow_request_threshold_ms: u64,
}

impl PipelineSettings {
    /// Threshold as a Duration, for comparison against elapsed time.
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }
}

impl Settings {
    /// Load settings from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Settings {
            query: QuerySettings {
                default_page_size: std::env::var("TAPLIST_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_PAGE_SIZE),
                max_page_size: std::env::var("TAPLIST_MAX_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_PAGE_SIZE),
                max_search_length: std::env::var("TAPLIST_MAX_SEARCH_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_SEARCH_LENGTH),
                max_sort_key_length: std::env::var("TAPLIST_MAX_SORT_KEY_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_SORT_KEY_LENGTH),
            },
            pipeline: PipelineSettings {
                slow_request_threshold_ms: std::env::var("TAPLIST_SLOW_REQUEST_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SLOW_REQUEST_THRESHOLD_MS),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.query.default_page_size < 1 {
            anyhow::bail!("Default page size must be greater than 0");
        }

        if self.query.max_page_size < self.query.default_page_size {
            anyhow::bail!(
                "Max page size ({}) cannot be smaller than the default page size ({})",
                self.query.max_page_size,
                self.query.default_page_size
            );
        }

        if self.query.max_search_length == 0 {
            anyhow::bail!("Max search length must be greater than 0");
        }

        if self.query.max_sort_key_length == 0 {
            anyhow::bail!("Max sort key length must be greater than 0");
        }

        if self.pipeline.slow_request_threshold_ms == 0 {
            anyhow::bail!("Slow request threshold must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            query: QuerySettings {
                default_page_size: DEFAULT_PAGE_SIZE,
                max_page_size: DEFAULT_MAX_PAGE_SIZE,
                max_search_length: DEFAULT_MAX_SEARCH_LENGTH,
                max_sort_key_length: DEFAULT_MAX_SORT_KEY_LENGTH,
            },
            pipeline: PipelineSettings {
                slow_request_threshold_ms: DEFAULT_SLOW_REQUEST_THRESHOLD_MS,
            },
        }
    }
}
