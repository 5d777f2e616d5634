//! Configuration validation
//!
//! Hard constraints are checked in a fixed order and fail fast: the record
//! is a single literal checked once at the start of a packaging run, so the
//! first violation is the one the operator needs to fix. Advisory findings
//! that do not block a build are collected separately by [`lint`].

use std::sync::LazyLock;

use regex::Regex;

use crate::config::loader::LoadWarning;
use crate::config::schema::{KNOWN_KEYS, PackagingConfig, STANDARD_SCHEMES};
use crate::error::ConfigError;

/// Reverse-domain identifier: two or more dot-separated segments, each
/// starting with a letter.
static APP_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+$").expect("valid regex")
});

/// Custom URI scheme token per RFC 3986, restricted to lowercase.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*$").expect("valid regex"));

/// Display names longer than this draw a lint warning.
const MAX_APP_NAME_ADVISORY_LEN: usize = 100;

// ============================================================================
// Hard Constraints
// ============================================================================

/// Validates a deserialized configuration against the schema's hard
/// constraints, in order, returning the first violation.
///
/// Pure: two calls on the same record yield the same result.
///
/// # Errors
///
/// Returns the first violated constraint:
/// `InvalidAppId`, `InvalidAppName`, `InvalidWebDir`, `InvalidScheme`,
/// or `InvalidPluginConfig`.
pub fn validate(config: &PackagingConfig) -> Result<(), ConfigError> {
    if !APP_ID_RE.is_match(&config.app_id) {
        return Err(ConfigError::InvalidAppId {
            value: config.app_id.clone(),
        });
    }

    if config.app_name.is_empty() {
        return Err(ConfigError::InvalidAppName);
    }

    if config.web_dir.is_empty() {
        return Err(ConfigError::InvalidWebDir);
    }

    if let Some(scheme) = config
        .server
        .as_ref()
        .and_then(|s| s.android_scheme.as_deref())
    {
        if !is_acceptable_scheme(scheme) {
            return Err(ConfigError::InvalidScheme {
                scheme: scheme.to_string(),
            });
        }
    }

    for (name, value) in &config.plugins {
        if !value.is_object() {
            return Err(ConfigError::InvalidPluginConfig {
                plugin: name.clone(),
            });
        }
    }

    Ok(())
}

/// Returns `true` for `https`, `http`, or a lowercase scheme token.
#[must_use]
pub fn is_acceptable_scheme(scheme: &str) -> bool {
    STANDARD_SCHEMES.contains(&scheme) || SCHEME_RE.is_match(scheme)
}

// ============================================================================
// Advisory Lint
// ============================================================================

/// Collects non-fatal findings for a configuration that already passed
/// [`validate`]. Run against the raw document so unknown keys are visible.
#[must_use]
pub fn lint(raw: &serde_json::Value, config: &PackagingConfig) -> Vec<LoadWarning> {
    let mut warnings = Vec::new();

    if let Some(map) = raw.as_object() {
        for key in map.keys() {
            if KNOWN_KEYS.contains(&key.as_str()) {
                continue;
            }
            let message = suggest_key(key).map_or_else(
                || format!("unknown top-level key '{key}' is ignored by the packaging tool"),
                |known| format!("unknown top-level key '{key}' (did you mean '{known}'?)"),
            );
            warnings.push(LoadWarning {
                message,
                location: Some(key.clone()),
            });
        }
    }

    if config.app_name.len() > MAX_APP_NAME_ADVISORY_LEN {
        warnings.push(LoadWarning {
            message: format!(
                "appName is unusually long ({} characters); launchers may truncate it",
                config.app_name.len()
            ),
            location: Some("appName".to_string()),
        });
    }

    if let Some(scheme) = config
        .server
        .as_ref()
        .and_then(|s| s.android_scheme.as_deref())
    {
        if !STANDARD_SCHEMES.contains(&scheme) {
            warnings.push(LoadWarning {
                message: format!(
                    "androidScheme '{scheme}' is a custom scheme; web content will be served under it verbatim"
                ),
                location: Some("server.androidScheme".to_string()),
            });
        }
    }

    for (name, value) in &config.plugins {
        if value.as_object().is_some_and(serde_json::Map::is_empty) {
            warnings.push(LoadWarning {
                message: format!("plugin '{name}' has an empty configuration record"),
                location: Some(format!("plugins.{name}")),
            });
        }
    }

    warnings
}

/// Suggests a recognized top-level key for a probable typo.
///
/// Returns the closest known key if its Damerau-Levenshtein distance is ≤ 3
/// (case-insensitive).
#[must_use]
pub fn suggest_key(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    KNOWN_KEYS
        .iter()
        .map(|key| (*key, strsim::damerau_levenshtein(&lowered, &key.to_lowercase())))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(key, _)| key)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_from(value: serde_json::Value) -> PackagingConfig {
        serde_json::from_value(value).unwrap()
    }

    fn base_config() -> serde_json::Value {
        json!({
            "appId": "com.acme.notes",
            "appName": "Acme Notes",
            "webDir": "dist"
        })
    }

    #[test]
    fn accepts_minimal_valid_config() {
        assert!(validate(&config_from(base_config())).is_ok());
    }

    #[test]
    fn rejects_missing_app_id() {
        let config = config_from(json!({ "appName": "X", "webDir": "dist" }));
        match validate(&config) {
            Err(ConfigError::InvalidAppId { value }) => assert!(value.is_empty()),
            other => panic!("expected InvalidAppId, got {other:?}"),
        }
    }

    #[test]
    fn rejects_app_id_without_separator() {
        let mut doc = base_config();
        doc["appId"] = json!("acmenotes");
        match validate(&config_from(doc)) {
            Err(ConfigError::InvalidAppId { value }) => assert_eq!(value, "acmenotes"),
            other => panic!("expected InvalidAppId, got {other:?}"),
        }
    }

    #[test]
    fn rejects_app_id_with_leading_digit_segment() {
        let mut doc = base_config();
        doc["appId"] = json!("com.1app.core");
        assert!(matches!(
            validate(&config_from(doc)),
            Err(ConfigError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn accepts_underscores_in_app_id() {
        let mut doc = base_config();
        doc["appId"] = json!("com.acme_labs.notes_app");
        assert!(validate(&config_from(doc)).is_ok());
    }

    #[test]
    fn rejects_empty_app_name() {
        let mut doc = base_config();
        doc["appName"] = json!("");
        assert!(matches!(
            validate(&config_from(doc)),
            Err(ConfigError::InvalidAppName)
        ));
    }

    #[test]
    fn rejects_empty_web_dir() {
        let mut doc = base_config();
        doc["webDir"] = json!("");
        assert!(matches!(
            validate(&config_from(doc)),
            Err(ConfigError::InvalidWebDir)
        ));
    }

    #[test]
    fn accepts_standard_and_custom_schemes() {
        for scheme in ["https", "http", "app", "my-app+x.1"] {
            let mut doc = base_config();
            doc["server"] = json!({ "androidScheme": scheme });
            assert!(
                validate(&config_from(doc)).is_ok(),
                "scheme '{scheme}' should be accepted"
            );
        }
    }

    #[test]
    fn rejects_malformed_schemes() {
        for scheme in ["HTTPS", "1app", "my app", ""] {
            let mut doc = base_config();
            doc["server"] = json!({ "androidScheme": scheme });
            match validate(&config_from(doc)) {
                Err(ConfigError::InvalidScheme { scheme: got }) => assert_eq!(got, scheme),
                other => panic!("scheme '{scheme}' should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn server_without_scheme_is_fine() {
        let mut doc = base_config();
        doc["server"] = json!({});
        assert!(validate(&config_from(doc)).is_ok());
    }

    #[test]
    fn rejects_non_record_plugin_config() {
        for bad in [json!("ic_stat_icon"), json!(42), json!([1, 2]), json!(null)] {
            let mut doc = base_config();
            doc["plugins"] = json!({ "LocalNotifications": bad });
            match validate(&config_from(doc)) {
                Err(ConfigError::InvalidPluginConfig { plugin }) => {
                    assert_eq!(plugin, "LocalNotifications");
                }
                other => panic!("expected InvalidPluginConfig, got {other:?}"),
            }
        }
    }

    #[test]
    fn fails_fast_on_first_violation() {
        // Both appId and a plugin entry are invalid; appId is checked first.
        let doc = json!({
            "appId": "",
            "appName": "",
            "webDir": "",
            "plugins": { "Camera": "oops" }
        });
        assert!(matches!(
            validate(&config_from(doc)),
            Err(ConfigError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn lint_flags_unknown_keys_with_suggestion() {
        let raw = json!({
            "appid": "com.acme.notes",
            "appName": "Acme Notes",
            "webDir": "dist"
        });
        let config = config_from(raw.clone());
        let warnings = lint(&raw, &config);
        assert!(
            warnings
                .iter()
                .any(|w| w.message.contains("appid") && w.message.contains("appId")),
            "warnings: {warnings:?}"
        );
    }

    #[test]
    fn lint_flags_custom_scheme_and_empty_plugin() {
        let mut doc = base_config();
        doc["server"] = json!({ "androidScheme": "app" });
        doc["plugins"] = json!({ "SplashScreen": {} });
        let config = config_from(doc.clone());
        let warnings = lint(&doc, &config);
        assert!(warnings.iter().any(|w| w.message.contains("custom scheme")));
        assert!(warnings.iter().any(|w| w.message.contains("SplashScreen")));
    }

    #[test]
    fn lint_is_quiet_on_clean_config() {
        let raw = base_config();
        let config = config_from(raw.clone());
        assert!(lint(&raw, &config).is_empty());
    }

    #[test]
    fn suggest_key_matches_case_insensitively() {
        assert_eq!(suggest_key("webdir"), Some("webDir"));
        assert_eq!(suggest_key("appid"), Some("appId"));
        assert_eq!(suggest_key("completelyunrelated"), None);
    }
}
