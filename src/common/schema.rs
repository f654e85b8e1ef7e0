use crate::translate::types::TypeTag;

/// One column as introspected from the source catalog, or as produced by
/// the translator. `length` carries the declared character length for
/// string-family types; numeric and temporal types leave it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub type_tag: TypeTag,
    pub length: Option<u32>,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, type_tag: TypeTag, length: Option<u32>) -> Self {
        ColumnSchema {
            name: name.into(),
            type_tag,
            length,
        }
    }
}

/// Ordered column list of one source table. Column order is preserved all
/// the way into the rendered DDL.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub schema: String,
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Schema-qualified name used to tag log messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}
