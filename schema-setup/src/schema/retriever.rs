//! Schema retrieval: the contract the builder consumes and a DDL-backed retriever

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ddl_parser::parse_schema;
use super::metadata::TableMetadata;
use crate::error::{Result, SetupError};

/// Structured schema data keyed by table name.
///
/// Tables keep the order they were retrieved in, which is the order the
/// installer creates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    tables: Vec<TableMetadata>,
}

impl Schema {
    pub fn new(tables: Vec<TableMetadata>) -> Self {
        Self { tables }
    }

    /// Look up a table by name
    pub fn get(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Table names in order
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableMetadata> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<TableMetadata> for Schema {
    fn from_iter<I: IntoIterator<Item = TableMetadata>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source of table metadata for the setup builder
pub trait SchemaRetriever {
    /// Return the schema of `tables`; an empty slice means every known table
    fn get_schema(&self, tables: &[String]) -> Result<Schema>;
}

impl<R: SchemaRetriever + ?Sized> SchemaRetriever for &R {
    fn get_schema(&self, tables: &[String]) -> Result<Schema> {
        (**self).get_schema(tables)
    }
}

/// Retriever backed by a MySQL DDL dump (`CREATE TABLE` statements)
#[derive(Debug, Clone)]
pub struct DdlSchemaRetriever {
    tables: Vec<TableMetadata>,
}

impl DdlSchemaRetriever {
    /// Parse the DDL in `sql`
    pub fn from_sql(sql: &str) -> Result<Self> {
        let tables = parse_schema(sql)?;
        debug!("Parsed {} tables from DDL", tables.len());
        Ok(Self { tables })
    }

    /// Read and parse a DDL file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let sql = std::fs::read_to_string(path.as_ref())?;
        Self::from_sql(&sql)
    }

    /// Every table known to this retriever, in DDL order
    pub fn tables(&self) -> &[TableMetadata] {
        &self.tables
    }
}

impl SchemaRetriever for DdlSchemaRetriever {
    fn get_schema(&self, tables: &[String]) -> Result<Schema> {
        if tables.is_empty() {
            return Ok(Schema::new(self.tables.clone()));
        }

        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(tables.len());
        for name in tables {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let table = self
                .tables
                .iter()
                .find(|t| &t.name == name)
                .ok_or_else(|| SetupError::UnknownTable(name.clone()))?;
            selected.push(table.clone());
        }
        Ok(Schema::new(selected))
    }
}
