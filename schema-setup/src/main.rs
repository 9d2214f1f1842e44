//! CLI entry point for schema-setup

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use schema_setup::config::SetupConfig;
use schema_setup::schema::{DdlSchemaRetriever, SchemaRetriever};

#[derive(Parser)]
#[command(name = "schema-setup")]
#[command(about = "Generate an InstallSchema setup class from MySQL schema DDL")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to SQL schema file (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Tables to include, comma-separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    tables: Vec<String>,

    /// Namespace of the generated class, e.g. 'Acme\Sales'
    #[arg(short, long)]
    namespace: Option<String>,

    /// Output file, relative to the output directory
    #[arg(short, long)]
    filename: Option<String>,

    /// Output directory (default: system temp directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Dry run - print the generated source instead of writing it
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the setup file
    Generate,
    /// Inspect schema (show parsed tables for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = if let Some(config_path) = &cli.config {
        SetupConfig::from_file(config_path)?
    } else {
        SetupConfig::load(None)?
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if !cli.tables.is_empty() {
        config.tables = cli.tables;
    }
    if let Some(namespace) = cli.namespace {
        config.namespace = namespace;
    }
    if let Some(filename) = cli.filename {
        config.filename = filename;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = Some(output_dir);
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_schema(&config);
    }

    if config.dry_run {
        print!("{}", schema_setup::render(&config)?);
        return Ok(());
    }

    let path = schema_setup::generate(&config)?;
    info!("Setup file generated successfully");
    println!("{}", path.display());
    Ok(())
}

fn inspect_schema(config: &SetupConfig) -> Result<()> {
    let retriever = DdlSchemaRetriever::from_file(&config.schema_file)?;
    let schema = retriever.get_schema(&config.tables)?;

    println!("{} table(s) selected from {}\n", schema.len(), config.schema_file.display());
    for table in schema.iter() {
        println!("{}", table.name);
        for col in &table.columns {
            let mut flags = Vec::new();
            if table.is_primary_key_column(&col.name) {
                flags.push("pk");
            }
            if col.is_auto_increment {
                flags.push("identity");
            }
            if !col.nullable {
                flags.push("not null");
            }
            println!("  {:<24} {:<20} {}", col.name, col.data_type, flags.join(", "));
        }
        for idx in &table.indexes {
            let kind = if idx.unique { "unique" } else { "index" };
            println!("  {} {} ({})", kind, idx.name, idx.columns.join(", "));
        }
        for fk in &table.foreign_keys {
            println!(
                "  fk {} -> {}.{} on delete {}",
                fk.column_name,
                fk.referenced_table,
                fk.referenced_column,
                fk.on_delete.as_deref().unwrap_or("NO ACTION")
            );
        }
        println!();
    }

    Ok(())
}
