//! Template contract consumed by the setup builder

use crate::error::Result;
use crate::namespace::Namespace;
use crate::schema::Schema;

/// A configured setup template: the namespace and tables to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    pub namespace: Namespace,
    pub tables: Schema,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_tables(mut self, tables: Schema) -> Self {
        self.tables = tables;
        self
    }
}

/// Turns a configured template into generated source text
pub trait TemplateRenderer {
    fn render(&self, context: &TemplateContext) -> Result<String>;
}

impl<T: TemplateRenderer + ?Sized> TemplateRenderer for &T {
    fn render(&self, context: &TemplateContext) -> Result<String> {
        (**self).render(context)
    }
}
