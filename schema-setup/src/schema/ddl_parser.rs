//! MySQL DDL parser using sqlparser-rs

use sqlparser::ast::{
    ColumnDef, ColumnOption, CommentDef, CreateTable, CreateTableOptions, DataType, EnumMember,
    Expr, ForeignKeyConstraint, Ident, IndexColumn, IndexConstraint, ObjectName,
    PrimaryKeyConstraint, SqlOption, Statement, TableConstraint, UniqueConstraint, Value,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::Result;

/// Parse `CREATE TABLE` statements into table metadata, in statement order.
///
/// Other statements are skipped.
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let statements = Parser::parse_sql(&MySqlDialect {}, sql)?;

    Ok(statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::CreateTable(create) => Some(read_table(create)),
            _ => None,
        })
        .collect())
}

fn read_table(create: &CreateTable) -> TableMetadata {
    let mut table = TableMetadata {
        name: object_name(&create.name),
        comment: table_comment(create),
        columns: Vec::with_capacity(create.columns.len()),
        indexes: Vec::new(),
        foreign_keys: Vec::new(),
        primary_key: None,
    };

    for def in &create.columns {
        read_column(&mut table, def);
    }
    for constraint in &create.constraints {
        read_constraint(&mut table, constraint);
    }

    table
}

/// Append a column, recording inline `PRIMARY KEY` / `UNIQUE` on the table
fn read_column(table: &mut TableMetadata, def: &ColumnDef) {
    let data_type = def.data_type.to_string();
    let mut column = ColumnMetadata {
        name: def.name.value.clone(),
        is_unsigned: data_type.to_uppercase().contains("UNSIGNED"),
        enum_values: enum_values(&def.data_type),
        data_type,
        nullable: true,
        default_value: None,
        is_auto_increment: false,
        comment: None,
    };

    for option in &def.options {
        match &option.option {
            ColumnOption::NotNull => column.nullable = false,
            ColumnOption::Null => column.nullable = true,
            ColumnOption::Default(expr) => column.default_value = column_default(expr),
            ColumnOption::Comment(text) => column.comment = Some(text.clone()),
            ColumnOption::PrimaryKey(_) => {
                column.nullable = false;
                table.primary_key = Some(PrimaryKey {
                    columns: vec![column.name.clone()],
                });
            }
            ColumnOption::Unique(_) => table.indexes.push(IndexMetadata {
                name: format!("{}_unique", column.name),
                columns: vec![column.name.clone()],
                unique: true,
            }),
            // MySQL's AUTO_INCREMENT only shows up as raw dialect tokens
            ColumnOption::DialectSpecific(tokens) => {
                if tokens
                    .iter()
                    .any(|t| t.to_string().eq_ignore_ascii_case("AUTO_INCREMENT"))
                {
                    column.is_auto_increment = true;
                }
            }
            _ => {}
        }
    }

    table.columns.push(column);
}

fn read_constraint(table: &mut TableMetadata, constraint: &TableConstraint) {
    match constraint {
        TableConstraint::PrimaryKey(PrimaryKeyConstraint { columns, .. }) => {
            let columns: Vec<String> = columns.iter().map(index_column).collect();
            for column in table.columns.iter_mut() {
                if columns.contains(&column.name) {
                    column.nullable = false;
                }
            }
            table.primary_key = Some(PrimaryKey { columns });
        }
        TableConstraint::Unique(UniqueConstraint { columns, name, .. }) => {
            let columns: Vec<String> = columns.iter().map(index_column).collect();
            table.indexes.push(IndexMetadata {
                name: index_name(name.as_ref(), &columns, |first| format!("{}_unique", first)),
                columns,
                unique: true,
            });
        }
        TableConstraint::Index(IndexConstraint { columns, name, .. }) => {
            let columns: Vec<String> = columns.iter().map(index_column).collect();
            table.indexes.push(IndexMetadata {
                name: index_name(name.as_ref(), &columns, |first| format!("idx_{}", first)),
                columns,
                unique: false,
            });
        }
        TableConstraint::ForeignKey(ForeignKeyConstraint {
            columns,
            foreign_table,
            referred_columns,
            on_delete,
            ..
        }) => {
            let referenced_table = object_name(foreign_table);
            let on_delete = on_delete.as_ref().map(|action| action.to_string());
            table.foreign_keys.extend(columns.iter().zip(referred_columns).map(
                |(column, referenced)| ForeignKeyMetadata {
                    column_name: column.value.clone(),
                    referenced_table: referenced_table.clone(),
                    referenced_column: referenced.value.clone(),
                    on_delete: on_delete.clone(),
                },
            ));
        }
        _ => {}
    }
}

/// `COMMENT='...'` table option (MySQL) or trailing `COMMENT '...'` (Hive)
fn table_comment(create: &CreateTable) -> Option<String> {
    if let Some(comment) = &create.comment {
        return Some(comment_text(comment));
    }
    let options = match &create.table_options {
        CreateTableOptions::Plain(options)
        | CreateTableOptions::With(options)
        | CreateTableOptions::Options(options)
        | CreateTableOptions::TableProperties(options) => options,
        CreateTableOptions::None => return None,
    };
    options.iter().find_map(|option| match option {
        SqlOption::Comment(comment) => Some(comment_text(comment)),
        _ => None,
    })
}

fn comment_text(comment: &CommentDef) -> String {
    match comment {
        CommentDef::WithEq(text) | CommentDef::WithoutEq(text) => text.clone(),
    }
}

/// Typed `DEFAULT` value; `DEFAULT NULL` is the same as no default
fn column_default(expr: &Expr) -> Option<ColumnDefault> {
    match expr {
        Expr::Value(value) => match &value.value {
            Value::Null => None,
            Value::Boolean(flag) => Some(ColumnDefault::Boolean(*flag)),
            Value::SingleQuotedString(text) | Value::DoubleQuotedString(text) => {
                Some(ColumnDefault::Literal(text.clone()))
            }
            other => Some(ColumnDefault::Literal(other.to_string())),
        },
        other => Some(ColumnDefault::Expression(other.to_string())),
    }
}

/// Declared index name, or one derived from the first column
fn index_name(
    declared: Option<&Ident>,
    columns: &[String],
    derive: impl Fn(&str) -> String,
) -> String {
    match declared {
        Some(ident) => ident.value.clone(),
        None => derive(columns.first().map(String::as_str).unwrap_or_default()),
    }
}

fn enum_values(data_type: &DataType) -> Option<Vec<String>> {
    match data_type {
        DataType::Enum(members, _) => Some(
            members
                .iter()
                .map(|member| match member {
                    EnumMember::Name(name) | EnumMember::NamedValue(name, _) => name.clone(),
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Last part of a possibly schema-qualified name
fn object_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn index_column(column: &IndexColumn) -> String {
    match &column.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => other.to_string(),
    }
}
