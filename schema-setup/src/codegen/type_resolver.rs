//! MySQL to DDL table column type mapping

use crate::schema::ColumnMetadata;

/// Column types understood by `Magento\Framework\DB\Ddl\Table`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Text,
    Blob,
    VarBinary,
}

impl TableType {
    /// PHP class constant for this type
    pub fn constant(&self) -> &'static str {
        match self {
            TableType::Boolean => "Table::TYPE_BOOLEAN",
            TableType::SmallInt => "Table::TYPE_SMALLINT",
            TableType::Integer => "Table::TYPE_INTEGER",
            TableType::BigInt => "Table::TYPE_BIGINT",
            TableType::Float => "Table::TYPE_FLOAT",
            TableType::Decimal => "Table::TYPE_DECIMAL",
            TableType::Date => "Table::TYPE_DATE",
            TableType::DateTime => "Table::TYPE_DATETIME",
            TableType::Timestamp => "Table::TYPE_TIMESTAMP",
            TableType::Text => "Table::TYPE_TEXT",
            TableType::Blob => "Table::TYPE_BLOB",
            TableType::VarBinary => "Table::TYPE_VARBINARY",
        }
    }

    /// Whether the `unsigned` option applies
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TableType::SmallInt
                | TableType::Integer
                | TableType::BigInt
                | TableType::Float
                | TableType::Decimal
        )
    }
}

/// Size argument of an `addColumn` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSize {
    /// No size, rendered as `null`
    Default,
    Length(u64),
    Precision { precision: u32, scale: u32 },
}

impl ColumnSize {
    pub fn to_php(&self) -> String {
        match self {
            ColumnSize::Default => "null".to_string(),
            ColumnSize::Length(len) => len.to_string(),
            ColumnSize::Precision { precision, scale } => format!("'{},{}'", precision, scale),
        }
    }
}

const TEXT_SIZE: u64 = 65_536;
const MEDIUM_SIZE: u64 = 16_777_216;
const LONG_SIZE: u64 = 4_294_967_295;
const DEFAULT_VARCHAR_SIZE: u64 = 255;

/// Resolve MySQL data types to table column types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the table type and size for a column
    pub fn resolve(column: &ColumnMetadata) -> (TableType, ColumnSize) {
        let data_type = column.data_type.to_lowercase();
        let args = column.type_arguments();
        let length = args.first().and_then(|a| a.parse::<u64>().ok());

        if column.is_enum() || data_type.starts_with("enum") || data_type.starts_with("set") {
            return (TableType::Text, ColumnSize::Length(DEFAULT_VARCHAR_SIZE));
        }

        if Self::is_boolean_type(&data_type) {
            return (TableType::Boolean, ColumnSize::Default);
        }

        // Integer types
        if data_type.starts_with("tinyint") || data_type.starts_with("smallint") {
            return (TableType::SmallInt, ColumnSize::Default);
        }
        if data_type.starts_with("mediumint") || data_type.starts_with("int") {
            return (TableType::Integer, ColumnSize::Default);
        }
        if data_type.starts_with("bigint") {
            return (TableType::BigInt, ColumnSize::Default);
        }

        // Float types
        if data_type.starts_with("float")
            || data_type.starts_with("double")
            || data_type.starts_with("real")
        {
            return (TableType::Float, ColumnSize::Default);
        }

        // Decimal types
        if data_type.starts_with("decimal") || data_type.starts_with("numeric") {
            let precision = args.first().and_then(|a| a.parse().ok()).unwrap_or(10);
            let scale = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(0);
            return (TableType::Decimal, ColumnSize::Precision { precision, scale });
        }

        // String types
        if data_type.starts_with("char") || data_type.starts_with("varchar") {
            return (
                TableType::Text,
                ColumnSize::Length(length.unwrap_or(DEFAULT_VARCHAR_SIZE)),
            );
        }
        if data_type.contains("text") || data_type == "json" {
            return (TableType::Text, ColumnSize::Length(Self::lob_size(&data_type)));
        }

        // Binary types
        if data_type.starts_with("binary") || data_type.starts_with("varbinary") {
            return (
                TableType::VarBinary,
                ColumnSize::Length(length.unwrap_or(DEFAULT_VARCHAR_SIZE)),
            );
        }
        if data_type.contains("blob") {
            return (TableType::Blob, ColumnSize::Length(Self::lob_size(&data_type)));
        }

        // Date/time types
        if data_type == "date" {
            return (TableType::Date, ColumnSize::Default);
        }
        if data_type.starts_with("datetime") {
            return (TableType::DateTime, ColumnSize::Default);
        }
        if data_type.starts_with("timestamp") {
            return (TableType::Timestamp, ColumnSize::Default);
        }

        // Default fallback (TIME, YEAR, spatial types)
        (TableType::Text, ColumnSize::Length(DEFAULT_VARCHAR_SIZE))
    }

    /// Check if the type represents a boolean
    fn is_boolean_type(data_type_lower: &str) -> bool {
        if data_type_lower == "bool" || data_type_lower == "boolean" {
            return true;
        }

        // TINYINT(1) and BIT(1) are the usual MySQL booleans
        (data_type_lower.starts_with("tinyint") || data_type_lower.starts_with("bit"))
            && data_type_lower.contains("(1)")
    }

    fn lob_size(data_type_lower: &str) -> u64 {
        if data_type_lower.starts_with("medium") {
            MEDIUM_SIZE
        } else if data_type_lower.starts_with("long") || data_type_lower == "json" {
            LONG_SIZE
        } else {
            TEXT_SIZE
        }
    }
}
