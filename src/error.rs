//! Error types for Huskpack
//!
//! Configuration errors are operator mistakes requiring a source edit, not
//! transient failures: all of them are fatal to the invocation that loads
//! the configuration, and there is no retry.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for Huskpack CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (parse failure, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for Huskpack operations.
///
/// Aggregates domain-specific errors and provides a unified interface for
/// exit-code mapping.
#[derive(Debug, Error)]
pub enum HuskpackError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HuskpackError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// The five `Invalid*` variants correspond to the ordered constraints the
/// validator checks; the remainder cover the loading pipeline itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `appId` is missing, empty, or not a reverse-domain identifier
    #[error("invalid appId '{value}': expected a reverse-domain identifier like 'com.company.app'")]
    InvalidAppId {
        /// The rejected value (empty string when the field was absent)
        value: String,
    },

    /// `appName` is missing or empty
    #[error("invalid appName: display name must be a non-empty string")]
    InvalidAppName,

    /// `webDir` is missing or empty
    #[error("invalid webDir: expected a non-empty relative directory path")]
    InvalidWebDir,

    /// `server.androidScheme` is not an acceptable URI scheme
    #[error("invalid androidScheme '{scheme}': expected 'https', 'http', or a lowercase scheme token")]
    InvalidScheme {
        /// The rejected scheme
        scheme: String,
    },

    /// A `plugins` entry is not a configuration record
    #[error("invalid configuration for plugin '{plugin}': expected a mapping of plugin settings")]
    InvalidPluginConfig {
        /// Name of the plugin with the malformed entry
        plugin: String,
    },

    /// Document parsing or deserialization failed
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration file not found or unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// A `${VAR:?message}` reference named an unset environment variable
    #[error("required environment variable '{var}' is not set: {message}")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Operator-supplied message from the `:?` form
        message: String,
    },

    /// File extension maps to no supported encoding
    #[error("unsupported config format: {path} (expected .json, .yaml, or .yml)")]
    UnsupportedFormat {
        /// Path with the unrecognized extension
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("configuration too large: {size} bytes (limit: {limit})")]
    TooLarge {
        /// Actual file size in bytes
        size: usize,
        /// Configured size limit in bytes
        limit: usize,
    },

    /// Warnings present while `--strict` is in effect
    #[error("strict mode: {count} warning(s) reported for {path}")]
    StrictWarnings {
        /// Path to the configuration file
        path: PathBuf,
        /// Number of warnings reported
        count: usize,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for Huskpack operations.
pub type Result<T> = std::result::Result<T, HuskpackError>;

// ============================================================================
// Tests
// ============================================================================
