//! Configuration schema types
//!
//! The root record the Huskpack packaging tool consumes at build time.
//! The schema is deliberately narrow: it models the fields the packaging
//! pipeline interprets itself, and passes everything under `plugins`
//! through to the named native plugin unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default configuration file name looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "huskpack.config.json";

/// Top-level keys the schema recognizes, in document order.
///
/// Used by the lint pass to flag probable typos.
pub const KNOWN_KEYS: &[&str] = &["appId", "appName", "webDir", "server", "plugins"];

/// Schemes the embedded Android web view serves without extra setup.
pub const STANDARD_SCHEMES: &[&str] = &["https", "http"];

// ============================================================================
// Root Record
// ============================================================================

/// Root configuration for a Huskpack application package.
///
/// Produced once per tool invocation by [`crate::config::ConfigLoader`],
/// then handed to the packaging pipeline unchanged. Required string fields
/// default to the empty string on deserialization so that a missing field
/// and an empty field fail validation identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingConfig {
    /// Reverse-domain application identifier (e.g. `com.company.app`).
    ///
    /// Stamped into native project metadata by the packaging tool.
    #[serde(default)]
    pub app_id: String,

    /// Human-readable application display name.
    #[serde(default)]
    pub app_name: String,

    /// Directory containing built web assets, relative to the project root.
    ///
    /// Existence is checked by the packaging tool at embed time, not here.
    #[serde(default)]
    pub web_dir: String,

    /// Embedded web view server options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerOptions>,

    /// Per-plugin passthrough configuration, keyed by plugin name.
    ///
    /// Each value must be a record; its keys are plugin-defined and are
    /// never interpreted by the schema. Insertion order is preserved for
    /// display purposes only.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub plugins: IndexMap<String, serde_json::Value>,
}

impl PackagingConfig {
    /// Returns the configuration record for a named plugin, if present.
    ///
    /// Only valid records are reachable through a validated config, so the
    /// accessor exposes the object form directly.
    #[must_use]
    pub fn plugin(&self, name: &str) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.plugins.get(name).and_then(serde_json::Value::as_object)
    }
}

// ============================================================================
// Server Options
// ============================================================================

/// Options for the embedded web view server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOptions {
    /// URL scheme the Android web view serves content under.
    ///
    /// `https` (default behavior of the shell) or `http`, or a custom
    /// lowercase scheme token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_scheme: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
