//! Metadata structures describing a database schema

use serde::{Deserialize, Serialize};

/// One table as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub comment: Option<String>,
    /// Columns in declaration order
    pub columns: Vec<ColumnMetadata>,
    /// Secondary indexes; the primary key is kept apart
    pub indexes: Vec<IndexMetadata>,
    pub foreign_keys: Vec<ForeignKeyMetadata>,
    pub primary_key: Option<PrimaryKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// MySQL type as written, e.g. "INT UNSIGNED" or "DECIMAL(12,4)"
    pub data_type: String,
    pub nullable: bool,
    /// `DEFAULT` clause; absent for no default and for `DEFAULT NULL`
    pub default_value: Option<ColumnDefault>,
    pub is_auto_increment: bool,
    pub is_unsigned: bool,
    /// Allowed values of an ENUM column
    pub enum_values: Option<Vec<String>>,
    pub comment: Option<String>,
}

/// Default value of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDefault {
    /// String or numeric literal, unescaped (`'it''s'` is stored as `it's`)
    Literal(String),
    Boolean(bool),
    /// Any other expression as written, e.g. `CURRENT_TIMESTAMP`
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

/// Single-column foreign key; composite keys are split per column pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyMetadata {
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
    /// `ON DELETE` action such as "CASCADE", if declared
    pub on_delete: Option<String>,
}

impl TableMetadata {
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_primary_key_column(&self, column_name: &str) -> bool {
        self.primary_key
            .as_ref()
            .map(|pk| pk.columns.iter().any(|c| c == column_name))
            .unwrap_or(false)
    }
}

impl ColumnMetadata {
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    /// Arguments between the parentheses of the data type, if any.
    ///
    /// `VARCHAR(255)` gives `["255"]`, `DECIMAL(12, 4)` gives `["12", "4"]`.
    pub fn type_arguments(&self) -> Vec<&str> {
        let Some(open) = self.data_type.find('(') else {
            return Vec::new();
        };
        let Some(close) = self.data_type[open..].find(')') else {
            return Vec::new();
        };
        self.data_type[open + 1..open + close]
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .collect()
    }
}
