//! Configuration types for adminkit.
//!
//! A single YAML file (`adminkit.yaml` by convention) is loaded into
//! [`AdminConfig`] at startup. Every section is optional and falls back to
//! the defaults documented on each field.
//!
//! ```yaml
//! root_path: /admin
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! pagination:
//!   per_page: 20
//! resources:
//!   users:
//!     title_property: name
//! ```

pub mod resource;
pub mod server;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use resource::ResourceOptions;
pub use server::{LoggingConfig, ServerConfig};

/// Complete adminkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Path prefix under which the admin is mounted.
    #[serde(default = "default_root_path")]
    pub root_path: String,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults for the built-in `list` action.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Authorization audit trail.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Per-resource options keyed by resource id.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceOptions>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            pagination: PaginationConfig::default(),
            audit: AuditConfig::default(),
            resources: BTreeMap::new(),
        }
    }
}

/// Pagination defaults for listing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size when the request does not ask for one.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Largest page size a request may ask for.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

impl PaginationConfig {
    /// Resolve the page size for a request, capped at `max_per_page`.
    pub fn resolve_per_page(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|n| *n > 0)
            .unwrap_or(self.per_page)
            .min(self.max_per_page)
    }
}

/// Audit trail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether authorization decisions are recorded.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_root_path() -> String {
    "/admin".to_string()
}

fn default_per_page() -> usize {
    10
}

fn default_max_per_page() -> usize {
    500
}

fn default_true() -> bool {
    true
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root_path.starts_with('/') {
            return Err(ConfigError::Config(format!(
                "root_path must start with '/', got '{}'",
                self.root_path
            )));
        }
        if self.pagination.per_page == 0 {
            return Err(ConfigError::Config(
                "pagination.per_page must be greater than zero".to_string(),
            ));
        }
        if self.pagination.per_page > self.pagination.max_per_page {
            return Err(ConfigError::Config(format!(
                "pagination.per_page ({}) exceeds pagination.max_per_page ({})",
                self.pagination.per_page, self.pagination.max_per_page
            )));
        }
        Ok(())
    }

    /// Get the options of a resource, if any were configured.
    pub fn resource(&self, id: &str) -> Option<&ResourceOptions> {
        self.resources.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = AdminConfig::from_yaml("{}").unwrap();

        assert_eq!(config.root_path, "/admin");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.pagination.per_page, 10);
        assert!(config.audit.enabled);
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
root_path: /backoffice
server:
  host: 0.0.0.0
  port: 9000
logging:
  filter: adminkit=debug
pagination:
  per_page: 25
  max_per_page: 100
audit:
  enabled: false
resources:
  users:
    title_property: name
    records:
      - { id: "1", name: "Ann A" }
  orders:
    references:
      user_id: users
"#;
        let config = AdminConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.root_path, "/backoffice");
        assert_eq!(config.server.address(), "0.0.0.0:9000");
        assert_eq!(config.logging.filter, "adminkit=debug");
        assert!(!config.audit.enabled);

        let users = config.resource("users").unwrap();
        assert_eq!(users.title_property.as_deref(), Some("name"));
        assert_eq!(users.records.len(), 1);

        let orders = config.resource("orders").unwrap();
        assert_eq!(orders.references.get("user_id").map(String::as_str), Some("users"));
    }

    #[test]
    fn test_rejects_relative_root_path() {
        let err = AdminConfig::from_yaml("root_path: admin").unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_rejects_per_page_above_max() {
        let err = AdminConfig::from_yaml("pagination: { per_page: 50, max_per_page: 20 }")
            .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_resolve_per_page() {
        let pagination = PaginationConfig {
            per_page: 10,
            max_per_page: 100,
        };

        assert_eq!(pagination.resolve_per_page(None), 10);
        assert_eq!(pagination.resolve_per_page(Some(0)), 10);
        assert_eq!(pagination.resolve_per_page(Some(30)), 30);
        assert_eq!(pagination.resolve_per_page(Some(1000)), 100);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "root_path: /ops").unwrap();

        let config = AdminConfig::from_file(file.path()).unwrap();
        assert_eq!(config.root_path, "/ops");
    }

    #[test]
    fn test_from_missing_file() {
        let err = AdminConfig::from_file("/nonexistent/adminkit.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
