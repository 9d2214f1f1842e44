//! Setup file builder: namespace, schema, template and output wired together

use tracing::{debug, info, warn};

use crate::codegen::{TemplateContext, TemplateRenderer};
use crate::error::{Result, SetupError};
use crate::namespace::{Namespace, DEFAULT_NAMESPACE};
use crate::output::{FileLock, OutputDirectory};
use crate::schema::SchemaRetriever;

/// Default filename for the setup file, relative to the output directory
pub const DEFAULT_FILENAME: &str = "install-schema-generator/InstallSchema.php";

/// Inputs of a single [`SchemaSetupBuilder::generate`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Tables to include; empty means all tables
    pub tables: Vec<String>,
    /// Raw namespace, sanitized before rendering
    pub namespace: String,
    /// Target path relative to the output directory
    pub filename: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Builds an install-schema setup file from live schema metadata
pub struct SchemaSetupBuilder<R, T, D> {
    retriever: R,
    renderer: T,
    directory: D,
}

impl<R, T, D> SchemaSetupBuilder<R, T, D>
where
    R: SchemaRetriever,
    T: TemplateRenderer,
    D: OutputDirectory,
{
    pub fn new(retriever: R, renderer: T, directory: D) -> Self {
        Self {
            retriever,
            renderer,
            directory,
        }
    }

    /// Render the setup file and write it to `request.filename`.
    ///
    /// Returns the filename unchanged. Retriever and renderer errors are
    /// returned as-is; any failure to open, lock or write the file becomes
    /// [`SetupError::GenerationFailed`].
    pub fn generate(&self, request: &GenerationRequest) -> Result<String> {
        info!(
            "Generating {} ({} tables requested)",
            request.filename,
            request.tables.len()
        );

        let content = self.render(&request.tables, &request.namespace)?;
        self.write_file(&request.filename, &content)?;

        info!("Setup file {} written", request.filename);
        Ok(request.filename.clone())
    }

    /// Sanitize the namespace, retrieve the schema and render it, without writing
    pub fn render(&self, tables: &[String], namespace: &str) -> Result<String> {
        let sanitized = Namespace::sanitize(namespace);
        if sanitized.as_str() != namespace {
            warn!(
                "Invalid namespace {:?}, falling back to {}",
                namespace, sanitized
            );
        }

        let schema = self.retriever.get_schema(tables)?;
        debug!("Retrieved schema for tables {:?}", schema.names());

        let context = TemplateContext::new()
            .with_namespace(sanitized)
            .with_tables(schema);
        self.renderer.render(&context)
    }

    fn write_file(&self, filename: &str, content: &str) -> Result<()> {
        let mut file = self
            .directory
            .open_file(filename)
            .map_err(|e| SetupError::generation_failed(filename, e))?;

        let written = FileLock::acquire(file.as_mut()).and_then(|mut lock| lock.write(content));
        drop(file);

        written.map_err(|e| {
            debug!("Writing {} failed: {}", filename, e);
            SetupError::generation_failed(filename, e)
        })
    }
}
