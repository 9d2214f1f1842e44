//! Default configuration values - single source of truth

pub use crate::builder::DEFAULT_FILENAME as FILENAME;
pub use crate::namespace::DEFAULT_NAMESPACE as NAMESPACE;

/// Default config file looked up by [`super::SetupConfig::load`]
pub const CONFIG_FILE: &str = "schema-setup";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SCHEMA_SETUP";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
