//! Configuration module
//!
//! Handles loading and validation of Huskpack configuration files: the
//! application identity, web asset location, embedded server options, and
//! per-plugin passthrough records.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigFormat, ConfigLoader, LoadResult, LoadWarning, LoaderLimits};
pub use schema::{PackagingConfig, ServerOptions};
