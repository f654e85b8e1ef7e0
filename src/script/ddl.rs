use crate::common::schema::ColumnSchema;
use crate::config::{DefaultColsPosition, TableTypeRule};

/// Render the target-dialect CREATE statement for one table variant.
/// Translated columns keep source order; a table-type rule's default
/// column definitions are spliced in verbatim at the configured end,
/// never between translated columns.
pub fn build_create_table_ddl(
    schema: &str,
    table: &str,
    columns: &[ColumnSchema],
    rule: Option<&TableTypeRule>,
) -> String {
    let mut column_defs: Vec<String> = columns.iter().map(render_column).collect();

    if let Some(rule) = rule {
        if !rule.default_cols.is_empty() {
            match rule.default_cols_position {
                DefaultColsPosition::Start => {
                    let mut spliced = rule.default_cols.clone();
                    spliced.extend(column_defs);
                    column_defs = spliced;
                }
                DefaultColsPosition::End => column_defs.extend(rule.default_cols.iter().cloned()),
            }
        }
    }

    format!(
        "CREATE OR REPLACE TABLE \"{}\".\"{}\" ({})",
        schema,
        table,
        column_defs.join(", ")
    )
}

fn render_column(column: &ColumnSchema) -> String {
    match column.length {
        Some(length) => format!("{} {}({})", column.name, column.type_tag, length),
        None => format!("{} {}", column.name, column.type_tag),
    }
}
