//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. File-size limit check
//! 2. Read raw text (UTF-8 BOM stripped)
//! 3. Environment variable expansion (pre-parse, on raw text)
//! 4. Document parsing, chosen by file extension (JSON or YAML)
//! 5. Deserialization to the typed record
//! 6. Validation (fail-fast)
//! 7. Advisory lint
//! 8. Freeze with `Arc`

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use std::sync::Arc;

use serde_json::Value;

use crate::config::schema::PackagingConfig;
use crate::config::validation;
use crate::error::ConfigError;

/// Origin label used when loading from memory instead of a file.
const IN_MEMORY_ORIGIN: &str = "<string>";

// ============================================================================
// Public API
// ============================================================================

/// Limits applied while loading a configuration file.
#[derive(Debug, Clone)]
pub struct LoaderLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("HUSKPACK_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Source encoding of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `huskpack.config.json`
    Json,
    /// `huskpack.config.yaml` / `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Picks a format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for any extension other than `json`,
    /// `yaml`, or `yml`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Result of loading a configuration.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration, frozen for the rest of the
    /// packaging run.
    pub config: Arc<PackagingConfig>,

    /// Non-fatal findings collected during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning produced during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Field path or file where the warning originated.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full pipeline from source file to frozen [`PackagingConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    limits: LoaderLimits,
}

impl ConfigLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: LoaderLimits) -> Self {
        Self { limits }
    }

    /// Creates a loader with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, oversized, has an
    /// unsupported extension, fails to parse, or violates the schema.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.limits.max_config_size {
            return Err(ConfigError::TooLarge {
                size,
                limit: self.limits.max_config_size,
            });
        }

        let format = ConfigFormat::from_path(path)?;

        let raw_text = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        self.load_inner(&raw_text, format, path)
    }

    /// Loads a configuration from in-memory text.
    ///
    /// Used by tests and the fuzz harness; behaves exactly like [`load`]
    /// minus the filesystem stages.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`load`] apart from `MissingFile`.
    ///
    /// [`load`]: ConfigLoader::load
    pub fn load_from_str(&self, text: &str, format: ConfigFormat) -> Result<LoadResult, ConfigError> {
        self.load_inner(text, format, Path::new(IN_MEMORY_ORIGIN))
    }

    /// Loads a configuration from an already-parsed record.
    ///
    /// This is the pure core of the pipeline: deserialize, validate
    /// fail-fast, lint, freeze. Calling it twice on the same value yields
    /// equal results.
    ///
    /// # Errors
    ///
    /// Returns a `Parse` error if the record does not deserialize, or the
    /// first violated validation constraint.
    pub fn load_value(&self, raw: Value) -> Result<LoadResult, ConfigError> {
        Self::finish(raw, Path::new("<record>"))
    }

    fn load_inner(
        &self,
        raw_text: &str,
        format: ConfigFormat,
        origin: &Path,
    ) -> Result<LoadResult, ConfigError> {
        if raw_text.len() > self.limits.max_config_size {
            return Err(ConfigError::TooLarge {
                size: raw_text.len(),
                limit: self.limits.max_config_size,
            });
        }

        let raw_text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);

        let mut env_warnings = Vec::new();
        let substituted = substitute_env(raw_text, origin, &mut env_warnings)?;

        let raw = parse_document(&substituted, format, origin)?;
        if raw.is_null() {
            return Err(ConfigError::Parse {
                path: origin.to_path_buf(),
                line: None,
                message: "configuration document is empty".to_string(),
            });
        }

        let mut result = Self::finish(raw, origin)?;
        env_warnings.append(&mut result.warnings);
        result.warnings = env_warnings;
        Ok(result)
    }

    fn finish(raw: Value, origin: &Path) -> Result<LoadResult, ConfigError> {
        let config: PackagingConfig =
            serde_json::from_value(raw.clone()).map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                line: None,
                message: format!("failed to deserialize configuration: {e}"),
            })?;

        validation::validate(&config)?;
        let warnings = validation::lint(&raw, &config);

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Document Parsing
// ============================================================================

/// Parses the substituted text into a JSON value.
fn parse_document(text: &str, format: ConfigFormat, origin: &Path) -> Result<Value, ConfigError> {
    match format {
        ConfigFormat::Json => serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            line: Some(e.line()),
            message: e.to_string(),
        }),
        ConfigFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
                    path: origin.to_path_buf(),
                    line: e.location().map(|l| l.line()),
                    message: e.to_string(),
                })?;
            Ok(yaml_to_json(&yaml))
        }
    }
}

/// Converts a `serde_yaml::Value` into the `serde_json::Value` the rest of
/// the pipeline operates on. Non-string mapping keys are rendered through
/// their string form where possible and dropped otherwise.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => n.as_i64().map_or_else(
            || {
                n.as_u64().map_or_else(
                    || {
                        n.as_f64()
                            .and_then(serde_json::Number::from_f64)
                            .map_or(Value::Null, Value::Number)
                    },
                    |u| Value::Number(u.into()),
                )
            },
            |i| Value::Number(i.into()),
        ),
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let obj: serde_json::Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| k.as_str().map(|ks| (ks.to_string(), yaml_to_json(v))))
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Parsed `${...}` reference.
struct VarSpec {
    name: String,
    default: Option<String>,
    required_message: Option<String>,
}

/// Substitutes environment variables in raw configuration text, before any
/// parsing so type inference is unaffected.
///
/// Supports:
/// - `${VAR}` — expand to value (empty string plus warning if unset)
/// - `${VAR:-default}` — expand to default if unset
/// - `${VAR:?message}` — fail if unset
/// - `$$` — literal `$`
fn substitute_env(
    raw: &str,
    origin: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                result.push('$');
            }
            Some('{') => {
                chars.next();
                let spec = parse_var_spec(&mut chars, origin)?;

                match std::env::var(&spec.name) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => {
                        if let Some(default) = spec.default {
                            result.push_str(&default);
                        } else if let Some(message) = spec.required_message {
                            return Err(ConfigError::EnvVarNotSet {
                                var: spec.name,
                                message,
                            });
                        } else {
                            warnings.push(LoadWarning {
                                message: format!(
                                    "environment variable '{}' is not set, substituting empty string",
                                    spec.name
                                ),
                                location: Some(origin.display().to_string()),
                            });
                        }
                    }
                }
            }
            _ => result.push(c),
        }
    }

    Ok(result)
}

/// Parses the body of a `${...}` reference.
fn parse_var_spec(chars: &mut Peekable<Chars>, origin: &Path) -> Result<VarSpec, ConfigError> {
    let mut name = String::new();

    while let Some(&c) = chars.peek() {
        match c {
            '}' => {
                chars.next();
                return Ok(VarSpec {
                    name,
                    default: None,
                    required_message: None,
                });
            }
            ':' => {
                chars.next();
                match chars.peek() {
                    Some('-') => {
                        chars.next();
                        let default = read_until_close(chars, origin)?;
                        return Ok(VarSpec {
                            name,
                            default: Some(default),
                            required_message: None,
                        });
                    }
                    Some('?') => {
                        chars.next();
                        let message = read_until_close(chars, origin)?;
                        return Ok(VarSpec {
                            name,
                            default: None,
                            required_message: Some(message),
                        });
                    }
                    _ => name.push(':'),
                }
            }
            _ => {
                chars.next();
                name.push(c);
            }
        }
    }

    Err(unclosed_reference(&name, origin))
}

/// Reads until the closing `}`, tracking nested braces.
fn read_until_close(chars: &mut Peekable<Chars>, origin: &Path) -> Result<String, ConfigError> {
    let mut value = String::new();
    let mut depth = 1u32;

    for c in chars.by_ref() {
        match c {
            '{' => {
                depth += 1;
                value.push(c);
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(value);
                }
                value.push(c);
            }
            _ => value.push(c),
        }
    }

    Err(unclosed_reference(&value, origin))
}

fn unclosed_reference(partial: &str, origin: &Path) -> ConfigError {
    ConfigError::Parse {
        path: origin.to_path_buf(),
        line: None,
        message: format!("unclosed environment variable reference: ${{{partial}"),
    }
}

/// Parses an environment variable with a fallback default.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
