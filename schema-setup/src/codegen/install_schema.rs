//! InstallSchema renderer - generates a PHP setup class from table metadata

use tracing::debug;

use crate::error::{Result, SetupError};
use crate::schema::{
    ColumnDefault, ColumnMetadata, ForeignKeyMetadata, IndexMetadata, TableMetadata,
};

use super::naming::{php_string, php_string_list, to_label};
use super::template::{TemplateContext, TemplateRenderer};
use super::type_resolver::{TableType, TypeResolver};

/// Name of the generated class
pub const CLASS_NAME: &str = "InstallSchema";

const INDENT: &str = "        ";

/// Renders an `InstallSchema` class creating every table of the context
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallSchemaRenderer;

impl InstallSchemaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for InstallSchemaRenderer {
    fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut code = String::new();

        code.push_str(&generate_header(context));
        for table in context.tables.iter() {
            debug!("Rendering table {}", table.name);
            code.push_str(&generate_table(table)?);
        }
        code.push_str(&generate_footer());

        Ok(code)
    }
}

fn generate_header(context: &TemplateContext) -> String {
    format!(
        r#"<?php
/**
 * Generated by schema-setup. Review before shipping.
 */
namespace {namespace}\Setup;

use Magento\Framework\DB\Adapter\AdapterInterface;
use Magento\Framework\DB\Ddl\Table;
use Magento\Framework\Setup\InstallSchemaInterface;
use Magento\Framework\Setup\ModuleContextInterface;
use Magento\Framework\Setup\SchemaSetupInterface;

/**
 * Class {class}
 */
class {class} implements InstallSchemaInterface
{{
    /**
     * {{@inheritdoc}}
     */
    public function install(SchemaSetupInterface $setup, ModuleContextInterface $context)
    {{
        $installer = $setup;
        $installer->startSetup();
"#,
        namespace = context.namespace,
        class = CLASS_NAME,
    )
}

fn generate_footer() -> String {
    format!("\n{INDENT}$installer->endSetup();\n    }}\n}}\n")
}

/// Generate the `newTable(...)` chain and `createTable` call for one table
fn generate_table(table: &TableMetadata) -> Result<String> {
    if table.columns.is_empty() {
        return Err(SetupError::TemplateError(format!(
            "table '{}' has no columns",
            table.name
        )));
    }

    let table_name = php_string(&table.name);
    let mut code = String::new();

    code.push_str(&format!(
        "\n{INDENT}/**\n{INDENT} * Create table {table_name}\n{INDENT} */\n"
    ));
    code.push_str(&format!(
        "{INDENT}$table = $installer->getConnection()->newTable(\n{INDENT}    $installer->getTable({table_name})\n{INDENT})"
    ));

    for column in &table.columns {
        code.push_str(&generate_column(table, column));
    }
    for index in &table.indexes {
        code.push_str(&generate_index(table, index));
    }
    for fk in &table.foreign_keys {
        code.push_str(&generate_foreign_key(table, fk));
    }

    let comment = table
        .comment
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| to_label(&table.name));
    code.push_str(&format!(
        "->setComment(\n{INDENT}    {}\n{INDENT});\n",
        php_string(&comment)
    ));
    code.push_str(&format!(
        "{INDENT}$installer->getConnection()->createTable($table);\n"
    ));

    Ok(code)
}

fn generate_column(table: &TableMetadata, column: &ColumnMetadata) -> String {
    let (table_type, size) = TypeResolver::resolve(column);
    let options = column_options(table, column, table_type);
    let comment = column
        .comment
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| to_label(&column.name));

    chain_call(
        "addColumn",
        &[
            php_string(&column.name),
            table_type.constant().to_string(),
            size.to_php(),
            format!("[{}]", options.join(", ")),
            php_string(&comment),
        ],
    )
}

fn column_options(
    table: &TableMetadata,
    column: &ColumnMetadata,
    table_type: TableType,
) -> Vec<String> {
    let mut options = Vec::new();

    if column.is_auto_increment {
        options.push("'identity' => true".to_string());
    }
    if table_type.is_numeric() && column.is_unsigned {
        options.push("'unsigned' => true".to_string());
    }
    options.push(format!("'nullable' => {}", column.nullable));
    if table.is_primary_key_column(&column.name) {
        options.push("'primary' => true".to_string());
    }
    if let Some(default) = column_default(column, table_type) {
        options.push(format!("'default' => {}", default));
    }

    options
}

/// PHP expression for the `default` option; `None` leaves the option out
fn column_default(column: &ColumnMetadata, table_type: TableType) -> Option<String> {
    match column.default_value.as_ref()? {
        ColumnDefault::Literal(value) => Some(php_string(value)),
        ColumnDefault::Boolean(flag) if table_type == TableType::Boolean => Some(flag.to_string()),
        ColumnDefault::Boolean(flag) => Some(php_string(if *flag { "1" } else { "0" })),
        ColumnDefault::Expression(expr) => {
            let upper = expr.trim().to_uppercase();
            if upper == "NULL" {
                None
            } else if upper.starts_with("CURRENT_TIMESTAMP") {
                Some("Table::TIMESTAMP_INIT".to_string())
            } else {
                Some(php_string(expr))
            }
        }
    }
}

fn generate_index(table: &TableMetadata, index: &IndexMetadata) -> String {
    let index_type = if index.unique {
        "AdapterInterface::INDEX_TYPE_UNIQUE"
    } else {
        "AdapterInterface::INDEX_TYPE_INDEX"
    };
    let columns = php_string_list(&index.columns);

    chain_call(
        "addIndex",
        &[
            format!(
                "$installer->getIdxName({}, {}, {})",
                php_string(&table.name),
                columns,
                index_type
            ),
            columns,
            format!("['type' => {}]", index_type),
        ],
    )
}

fn generate_foreign_key(table: &TableMetadata, fk: &ForeignKeyMetadata) -> String {
    chain_call(
        "addForeignKey",
        &[
            format!(
                "$installer->getFkName({}, {}, {}, {})",
                php_string(&table.name),
                php_string(&fk.column_name),
                php_string(&fk.referenced_table),
                php_string(&fk.referenced_column)
            ),
            php_string(&fk.column_name),
            format!("$installer->getTable({})", php_string(&fk.referenced_table)),
            php_string(&fk.referenced_column),
            foreign_key_action(fk.on_delete.as_deref()).to_string(),
        ],
    )
}

fn foreign_key_action(on_delete: Option<&str>) -> &'static str {
    match on_delete.map(|a| a.trim().to_uppercase()).as_deref() {
        Some("CASCADE") => "Table::ACTION_CASCADE",
        Some("SET NULL") => "Table::ACTION_SET_NULL",
        Some("SET DEFAULT") => "Table::ACTION_SET_DEFAULT",
        Some("RESTRICT") => "Table::ACTION_RESTRICT",
        _ => "Table::ACTION_NO_ACTION",
    }
}

/// Render `->method(\n    arg,\n    ...\n)` at table-chain indentation
fn chain_call(method: &str, args: &[String]) -> String {
    let args: Vec<String> = args.iter().map(|a| format!("{INDENT}    {a}")).collect();
    format!("->{}(\n{}\n{INDENT})", method, args.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use crate::schema::{parse_schema, Schema};

    fn render_sql(sql: &str, namespace: &str) -> String {
        let tables = parse_schema(sql).unwrap();
        let context = TemplateContext::new()
            .with_namespace(Namespace::sanitize(namespace))
            .with_tables(Schema::new(tables));
        InstallSchemaRenderer::new().render(&context).unwrap()
    }

    #[test]
    fn test_header_uses_namespace() {
        let code = render_sql("CREATE TABLE t (id INT PRIMARY KEY);", "Acme\\Sales");
        assert!(code.starts_with("<?php\n"));
        assert!(code.contains("namespace Acme\\Sales\\Setup;"));
        assert!(code.contains("class InstallSchema implements InstallSchemaInterface"));
        assert!(code.contains("$installer->startSetup();"));
        assert!(code.trim_end().ends_with('}'));
        assert!(code.contains("$installer->endSetup();"));
    }

    #[test]
    fn test_columns() {
        let code = render_sql(
            r#"
            CREATE TABLE customer_entity (
                entity_id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                email VARCHAR(255) COMMENT 'Email',
                is_active SMALLINT UNSIGNED NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
            "Acme\\Sales",
        );

        assert!(code.contains("$installer->getTable('customer_entity')"));
        assert!(code.contains(
            "'entity_id',\n            Table::TYPE_INTEGER,\n            null,\n            ['identity' => true, 'unsigned' => true, 'nullable' => false, 'primary' => true],\n            'Entity Id'"
        ));
        assert!(code.contains("'email',\n            Table::TYPE_TEXT,\n            255,\n            ['nullable' => true],\n            'Email'"));
        assert!(code.contains("['unsigned' => true, 'nullable' => false, 'default' => '1']"));
        assert!(code.contains("'default' => Table::TIMESTAMP_INIT"));
        assert!(code.contains("->setComment(\n            'Customer Entity'\n        );"));
        assert!(code.contains("$installer->getConnection()->createTable($table);"));
    }

    #[test]
    fn test_table_comment() {
        let code = render_sql(
            r#"
            CREATE TABLE customer_entity (
                entity_id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8 COMMENT='Customer Entity Table';
            "#,
            "Acme\\Sales",
        );
        assert!(code.contains("->setComment(\n            'Customer Entity Table'\n        );"));
    }

    #[test]
    fn test_default_values() {
        let code = render_sql(
            r#"
            CREATE TABLE sales_order (
                entity_id INT UNSIGNED NOT NULL PRIMARY KEY,
                customer_note VARCHAR(255) NOT NULL DEFAULT 'it''s',
                is_virtual BOOLEAN NOT NULL DEFAULT TRUE,
                email_sent TINYINT(1) NOT NULL DEFAULT FALSE,
                send_email SMALLINT NOT NULL DEFAULT TRUE,
                shipping_method VARCHAR(120) DEFAULT NULL
            );
            "#,
            "Acme\\Sales",
        );

        assert!(code.contains(r"['nullable' => false, 'default' => 'it\'s']"));
        assert!(code.contains(
            "'is_virtual',\n            Table::TYPE_BOOLEAN,\n            null,\n            ['nullable' => false, 'default' => true]"
        ));
        assert!(code.contains(
            "'email_sent',\n            Table::TYPE_BOOLEAN,\n            null,\n            ['nullable' => false, 'default' => false]"
        ));
        assert!(code.contains(
            "'send_email',\n            Table::TYPE_SMALLINT,\n            null,\n            ['nullable' => false, 'default' => '1']"
        ));
        assert!(code.contains(
            "'shipping_method',\n            Table::TYPE_TEXT,\n            120,\n            ['nullable' => true],"
        ));
        assert!(!code.contains("'TRUE'"));
    }

    #[test]
    fn test_indexes_and_foreign_keys() {
        let code = render_sql(
            r#"
            CREATE TABLE customer_address (
                entity_id INT NOT NULL PRIMARY KEY,
                parent_id INT NOT NULL,
                postcode VARCHAR(20),
                UNIQUE INDEX uniq_parent_postcode (parent_id, postcode),
                INDEX idx_postcode (postcode),
                FOREIGN KEY (parent_id) REFERENCES customer_entity(entity_id) ON DELETE CASCADE
            );
            "#,
            "Acme\\Sales",
        );

        assert!(code.contains(
            "$installer->getIdxName('customer_address', ['parent_id', 'postcode'], AdapterInterface::INDEX_TYPE_UNIQUE)"
        ));
        assert!(code.contains("['type' => AdapterInterface::INDEX_TYPE_INDEX]"));
        assert!(code.contains(
            "$installer->getFkName('customer_address', 'parent_id', 'customer_entity', 'entity_id')"
        ));
        assert!(code.contains("$installer->getTable('customer_entity')"));
        assert!(code.contains("Table::ACTION_CASCADE"));
    }

    #[test]
    fn test_tables_in_schema_order() {
        let code = render_sql(
            "CREATE TABLE b_table (id INT PRIMARY KEY); CREATE TABLE a_table (id INT PRIMARY KEY);",
            "Acme\\Sales",
        );
        let b = code.find("Create table 'b_table'").unwrap();
        let a = code.find("Create table 'a_table'").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_empty_schema_renders_empty_install() {
        let context = TemplateContext::new();
        let code = InstallSchemaRenderer::new().render(&context).unwrap();
        assert!(code.contains("namespace Vendor\\Area\\Setup;"));
        assert!(!code.contains("newTable"));
    }

    #[test]
    fn test_table_without_columns_is_rejected() {
        let table = TableMetadata {
            name: "empty".to_string(),
            comment: None,
            columns: vec![],
            indexes: vec![],
            foreign_keys: vec![],
            primary_key: None,
        };
        let context = TemplateContext::new().with_tables(Schema::new(vec![table]));
        let err = InstallSchemaRenderer::new().render(&context).unwrap_err();
        assert!(matches!(err, SetupError::TemplateError(_)));
    }

    #[test]
    fn test_foreign_key_action() {
        assert_eq!(foreign_key_action(None), "Table::ACTION_NO_ACTION");
        assert_eq!(foreign_key_action(Some("SET NULL")), "Table::ACTION_SET_NULL");
        assert_eq!(foreign_key_action(Some("restrict")), "Table::ACTION_RESTRICT");
    }
}
