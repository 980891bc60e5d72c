//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::node::NodeError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid route: {0}")]
    Route(#[from] NodeError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = load_config_str(&content)?;

    tracing::info!(
        path = %path.display(),
        routes = config.routes.len(),
        modules = config.modules.len(),
        "Route configuration loaded"
    );
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn load_config_str(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_str() {
        let config = load_config_str(
            r#"
            [timeouts]
            guard_ms = 250

            [[routes]]
            path = ""
            pathMatch = "full"
            redirectTo = "feature-one"

            [[routes]]
            path = "feature-one"
            loadChildren = "feature-one"

            [[modules.feature-one]]
            path = ""
            component = "FeatureOneComponent"
            canActivate = ["feature-specific"]
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.timeouts.guard_ms, 250);
        assert_eq!(config.timeouts.load_ms, 30_000);
        assert_eq!(config.modules["feature-one"][0].can_activate, vec!["feature-specific"]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = load_config_str(
            r#"
            [[routes]]
            path = "old"
            redirectTo = "home"
            canActivate = ["auth"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: routes[0]:"));
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_str("routes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
