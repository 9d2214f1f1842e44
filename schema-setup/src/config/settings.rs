//! Configuration settings for schema-setup

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::builder::GenerationRequest;
use crate::error::{Result, SetupError};
use crate::output::TmpDirectory;

/// Main configuration struct for setup generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Path to the SQL schema file
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Tables to include (empty for all)
    #[serde(default)]
    pub tables: Vec<String>,

    /// Namespace of the generated class (`Vendor\Area`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Output file, relative to `output_dir`
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Output directory; the process temp directory when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Dry run mode - print the generated source instead of writing it
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_namespace() -> String {
    defaults::NAMESPACE.to_string()
}
fn default_filename() -> String {
    defaults::FILENAME.to_string()
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            tables: Vec::new(),
            namespace: default_namespace(),
            filename: default_filename(),
            output_dir: None,
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl SetupConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SetupConfig = toml::from_str(&content).map_err(|e| {
            SetupError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        // Override with environment variables (SCHEMA_SETUP__*)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tables")
                .try_parsing(true),
        );

        let config: SetupConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// The generation request described by this configuration
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new()
            .tables(self.tables.iter().cloned())
            .namespace(self.namespace.clone())
            .filename(self.filename.clone())
    }

    /// The output directory described by this configuration
    pub fn output_directory(&self) -> TmpDirectory {
        match &self.output_dir {
            Some(dir) => TmpDirectory::new(dir),
            None => TmpDirectory::system(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(SetupError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(SetupError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        if self.filename.trim().is_empty() {
            return Err(SetupError::ValidationError("filename is required".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SetupConfig::default();
        assert!(config.tables.is_empty());
        assert_eq!(config.namespace, "Vendor\\Area");
        assert_eq!(config.filename, "install-schema-generator/InstallSchema.php");
        assert!(config.output_dir.is_none());
        assert!(!config.dry_run);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_validation_missing_schema() {
        let config = SetupConfig::default();
        assert!(config.validate().is_err());

        let config = SetupConfig::default_with_schema(PathBuf::from("/no/such/schema.sql"));
        assert!(matches!(
            config.validate(),
            Err(SetupError::ValidationError(msg)) if msg.contains("not found")
        ));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            schema_file = "schema.sql"
            tables = ["customer_entity", "sales_order"]
            namespace = 'Acme\Sales'
            output_dir = "/var/tmp/setup"
            log_level = "debug"
        "#;
        let config: SetupConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.tables.len(), 2);
        assert_eq!(config.namespace, "Acme\\Sales");
        assert_eq!(config.filename, defaults::FILENAME);
        assert_eq!(config.log_level, Some("debug".to_string()));

        let request = config.request();
        assert_eq!(request.tables, config.tables);
        assert_eq!(request.namespace, "Acme\\Sales");
        assert_eq!(
            config.output_directory().root(),
            Path::new("/var/tmp/setup")
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema-setup.toml");
        std::fs::write(&path, "schema_file = \"db.sql\"\nfilename = \"out/Install.php\"\n").unwrap();

        let config = SetupConfig::from_file(&path).unwrap();
        assert_eq!(config.schema_file, PathBuf::from("db.sql"));
        assert_eq!(config.filename, "out/Install.php");

        std::fs::write(&path, "tables = 3").unwrap();
        assert!(matches!(
            SetupConfig::from_file(&path),
            Err(SetupError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.toml");
        std::fs::write(&path, "schema_file = \"db.sql\"\ndry_run = true\n").unwrap();

        let config = SetupConfig::load(Some(&path)).unwrap();
        assert_eq!(config.schema_file, PathBuf::from("db.sql"));
        assert!(config.dry_run);
        assert_eq!(config.namespace, defaults::NAMESPACE);
    }

    #[test]
    fn test_load_env_uses_double_underscore_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.toml");
        std::fs::write(&path, "schema_file = \"db.sql\"\n").unwrap();

        std::env::set_var("SCHEMA_SETUP__OUTPUT_DIR", "/var/tmp/env-setup");
        std::env::set_var("SCHEMA_SETUP_LOG_LEVEL", "trace");
        let config = SetupConfig::load(Some(&path));
        std::env::remove_var("SCHEMA_SETUP__OUTPUT_DIR");
        std::env::remove_var("SCHEMA_SETUP_LOG_LEVEL");

        let config = config.unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/var/tmp/env-setup")));
        assert!(config.log_level.is_none());
    }
}
