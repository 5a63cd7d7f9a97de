use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the API process and the seed
/// command. Populated from `APP_*` environment variables with development
/// defaults for every field.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// TCP port the API listens on.
    pub port: u16,
    /// External version segment of the base path (e.g. "v1").
    pub version: String,
    /// Leading path prefix for every route (e.g. "/api").
    pub path_prefix: String,
    /// Environment name, informational only (e.g. "development").
    pub environment: String,
    /// Comma-separated list of allowed CORS origins; "*" allows any.
    pub cors_allowed_origins: String,
    /// Base URL the seed command posts demo data against.
    pub seed_base_url: String,
}

impl Settings {
    /// The base path every entity router is nested under, e.g. `/api/v1`.
    pub fn base_path(&self) -> String {
        format!(
            "{}/{}",
            self.path_prefix.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }

    /// The configured CORS origins, split and trimmed. Empty entries are
    /// dropped, so trailing commas are harmless.
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Whether the origin list contains the wildcard entry.
    pub fn allow_any_origin(&self) -> bool {
        self.cors_origins().iter().any(|o| o == "*")
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.path_prefix.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "path_prefix must start with '/' (got \"{}\")",
                self.path_prefix
            )));
        }
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError(
                "version must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            port: 3000,
            version: "v1".to_string(),
            path_prefix: "/api".to_string(),
            environment: "test".to_string(),
            cors_allowed_origins: "*".to_string(),
            seed_base_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn base_path_joins_prefix_and_version() {
        assert_eq!(settings().base_path(), "/api/v1");

        let mut s = settings();
        s.path_prefix = "/api/".to_string();
        assert_eq!(s.base_path(), "/api/v1");
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let mut s = settings();
        s.cors_allowed_origins =
            "http://localhost:5173, https://conf.example.org,".to_string();
        assert_eq!(
            s.cors_origins(),
            vec![
                "http://localhost:5173".to_string(),
                "https://conf.example.org".to_string()
            ]
        );
        assert!(!s.allow_any_origin());
    }

    #[test]
    fn wildcard_allows_any_origin() {
        assert!(settings().allow_any_origin());
    }

    #[test]
    fn validate_rejects_relative_prefix() {
        let mut s = settings();
        s.path_prefix = "api".to_string();
        assert!(s.validate().is_err());
    }
}
