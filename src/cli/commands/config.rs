//! Config command handlers
//!
//! Implements `config validate` and `config show`.

use serde::Serialize;

use crate::cli::args::{ConfigShowArgs, ConfigValidateArgs, OutputFormat};
use crate::config::loader::{ConfigLoader, LoadResult};
use crate::error::{ConfigError, HuskpackError};

/// Per-file outcome for the JSON report.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate configuration files without running a packaging build.
///
/// Every file is checked even when an earlier one fails; the exit status
/// reflects the first failure.
///
/// # Errors
///
/// Returns the first configuration error encountered, or a strict-mode
/// error when `--strict` is set and warnings were reported.
pub fn validate(args: &ConfigValidateArgs) -> Result<(), HuskpackError> {
    let loader = ConfigLoader::with_defaults();
    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_error: Option<ConfigError> = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");

        match loader.load(path) {
            Ok(result) => {
                emit_warnings(&result);
                let warnings: Vec<String> =
                    result.warnings.iter().map(|w| w.message.clone()).collect();

                if args.strict && !warnings.is_empty() {
                    if first_error.is_none() {
                        first_error = Some(ConfigError::StrictWarnings {
                            path: path.clone(),
                            count: warnings.len(),
                        });
                    }
                    reports.push(FileReport {
                        file: path.display().to_string(),
                        valid: false,
                        warnings,
                        error: Some("warnings reported in strict mode".to_string()),
                    });
                } else {
                    tracing::info!(
                        file = %path.display(),
                        app_id = %result.config.app_id,
                        "configuration valid"
                    );
                    reports.push(FileReport {
                        file: path.display().to_string(),
                        valid: true,
                        warnings,
                        error: None,
                    });
                }
            }
            Err(e) => {
                tracing::error!(file = %path.display(), "{e}");
                reports.push(FileReport {
                    file: path.display().to_string(),
                    valid: false,
                    warnings: Vec::new(),
                    error: Some(e.to_string()),
                });
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if args.format == OutputFormat::Json {
        let valid = reports.iter().filter(|r| r.valid).count();
        let doc = serde_json::json!({
            "files": reports,
            "summary": {
                "total": reports.len(),
                "valid": valid,
                "invalid": reports.len() - valid,
            },
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    first_error.map_or(Ok(()), |e| Err(e.into()))
}

/// Load a configuration file and print the normalized result.
///
/// # Errors
///
/// Returns an error if the file fails to load or validate.
pub fn show(args: &ConfigShowArgs) -> Result<(), HuskpackError> {
    let loader = ConfigLoader::with_defaults();
    let result = loader.load(&args.file)?;
    emit_warnings(&result);

    let config = result.config.as_ref();
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Human => {
            println!("app id:   {}", config.app_id);
            println!("app name: {}", config.app_name);
            println!("web dir:  {}", config.web_dir);
            if let Some(scheme) = config
                .server
                .as_ref()
                .and_then(|s| s.android_scheme.as_deref())
            {
                println!("android scheme: {scheme}");
            }
            if !config.plugins.is_empty() {
                println!("plugins:");
                for name in config.plugins.keys() {
                    println!("  - {name}");
                }
            }
        }
    }

    Ok(())
}

fn emit_warnings(result: &LoadResult) {
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huskpack.config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn validate_accepts_valid_file() {
        let (_dir, path) = write_temp_config(
            r#"{"appId": "com.acme.notes", "appName": "Acme Notes", "webDir": "dist"}"#,
        );
        let args = ConfigValidateArgs {
            files: vec![path],
            format: OutputFormat::Human,
            strict: false,
        };
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn validate_rejects_invalid_file() {
        let (_dir, path) =
            write_temp_config(r#"{"appName": "Acme Notes", "webDir": "dist"}"#);
        let args = ConfigValidateArgs {
            files: vec![path],
            format: OutputFormat::Human,
            strict: false,
        };
        let err = validate(&args).unwrap_err();
        assert!(matches!(
            err,
            HuskpackError::Config(ConfigError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn validate_strict_promotes_warnings() {
        // Unknown top-level key produces a warning, fatal under --strict.
        let (_dir, path) = write_temp_config(
            r#"{"appId": "com.acme.notes", "appName": "Acme Notes", "webDir": "dist", "appid": "typo"}"#,
        );
        let args = ConfigValidateArgs {
            files: vec![path.clone()],
            format: OutputFormat::Human,
            strict: true,
        };
        let err = validate(&args).unwrap_err();
        assert!(matches!(
            err,
            HuskpackError::Config(ConfigError::StrictWarnings { count: 1, .. })
        ));

        let relaxed = ConfigValidateArgs {
            files: vec![path],
            format: OutputFormat::Human,
            strict: false,
        };
        assert!(validate(&relaxed).is_ok());
    }

    #[test]
    fn validate_reports_first_error_across_files() {
        let (_dir1, good) = write_temp_config(
            r#"{"appId": "com.acme.notes", "appName": "Acme Notes", "webDir": "dist"}"#,
        );
        let (_dir2, bad) = write_temp_config(r#"{"appId": "acmenotes"}"#);
        let args = ConfigValidateArgs {
            files: vec![good, bad],
            format: OutputFormat::Human,
            strict: false,
        };
        let err = validate(&args).unwrap_err();
        assert!(matches!(
            err,
            HuskpackError::Config(ConfigError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn show_fails_on_missing_file() {
        let args = ConfigShowArgs {
            file: PathBuf::from("/nonexistent/huskpack.config.json"),
            format: OutputFormat::Json,
        };
        let err = show(&args).unwrap_err();
        assert!(matches!(
            err,
            HuskpackError::Config(ConfigError::MissingFile { .. })
        ));
    }
}
