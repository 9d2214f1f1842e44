//! schema-setup: Generate InstallSchema setup classes from MySQL schema DDL
//!
//! This crate provides both a CLI tool and a library. Given a set of table
//! names, a `Vendor\Area` namespace and a target filename, it:
//!
//! - retrieves the table metadata from a [`SchemaRetriever`]
//! - renders an `InstallSchema` PHP class with a [`TemplateRenderer`]
//! - writes the result under an exclusive lock into an [`OutputDirectory`]
//!   and returns the filename
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use schema_setup::{
//!     DdlSchemaRetriever, GenerationRequest, InstallSchemaRenderer, SchemaSetupBuilder,
//!     TmpDirectory,
//! };
//!
//! let builder = SchemaSetupBuilder::new(
//!     DdlSchemaRetriever::from_file("schema.sql")?,
//!     InstallSchemaRenderer::new(),
//!     TmpDirectory::system(),
//! );
//! let filename = builder.generate(
//!     &GenerationRequest::new()
//!         .tables(["customer_entity"])
//!         .namespace("Acme\\Sales"),
//! )?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! schema-setup --schema schema.sql --namespace 'Acme\Sales' --tables customer_entity generate
//! ```

pub mod builder;
pub mod codegen;
pub mod config;
pub mod error;
pub mod namespace;
pub mod output;
pub mod schema;

use std::path::PathBuf;

use tracing::info;

pub use builder::{GenerationRequest, SchemaSetupBuilder, DEFAULT_FILENAME};
pub use codegen::{InstallSchemaRenderer, TemplateContext, TemplateRenderer};
pub use config::SetupConfig;
pub use error::{Result, SetupError};
pub use namespace::{Namespace, DEFAULT_NAMESPACE};
pub use output::{OutputDirectory, OutputFile, TmpDirectory};
pub use schema::{DdlSchemaRetriever, Schema, SchemaRetriever};

/// Main entry point: generate the setup file described by `config`.
///
/// Returns the full path of the written file.
pub fn generate(config: &SetupConfig) -> Result<PathBuf> {
    info!("Parsing schema: {:?}", config.schema_file);
    let retriever = DdlSchemaRetriever::from_file(&config.schema_file)?;
    info!("Found {} tables", retriever.tables().len());

    let directory = config.output_directory();
    let builder = SchemaSetupBuilder::new(retriever, InstallSchemaRenderer::new(), &directory);
    let filename = builder.generate(&config.request())?;

    Ok(directory.root().join(filename))
}

/// Render the setup file described by `config` without writing it
pub fn render(config: &SetupConfig) -> Result<String> {
    let retriever = DdlSchemaRetriever::from_file(&config.schema_file)?;
    let builder = SchemaSetupBuilder::new(
        retriever,
        InstallSchemaRenderer::new(),
        config.output_directory(),
    );
    builder.render(&config.tables, &config.namespace)
}
