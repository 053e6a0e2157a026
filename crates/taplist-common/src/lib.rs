//! Taplist Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared infrastructure for the taplist workspace members.
//!
//! # Overview
//!
//! This crate provides the ambient concerns used across the workspace:
//!
//! - **Logging**: Structured tracing setup with console and file targets
//! - **Settings**: Environment-based runtime configuration with defaults
//!
//! No domain logic lives here; the request pipeline and query engine are in
//! `taplist-core`, and the catalog features are in `taplist-catalog`.
//!
//! # Example
//!
//! ```no_run
//! use taplist_common::logging::{LogConfig, init_logging};
//! use taplist_common::settings::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let log_config = LogConfig::from_env()?;
//!     init_logging(&log_config)?;
//!
//!     let settings = Settings::load()?;
//!     tracing::info!(page_size = settings.query.default_page_size, "settings loaded");
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod settings;

// Re-export commonly used types
pub use settings::Settings;
