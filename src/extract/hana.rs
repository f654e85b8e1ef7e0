use std::sync::Arc;

use async_trait::async_trait;
use odbc_api::buffers::TextRowSet;
use odbc_api::{Connection, Cursor, Environment, ResultSetMetadata};

use crate::common::schema::{ColumnSchema, TableSchema};
use crate::connection::connect;
use crate::error::{Result, ScriptError};
use crate::extract::source::SchemaSource;
use crate::translate::types::TypeTag;

/// HANA column introspection, covering both tables and views. POSITION is
/// selected so the UNION keeps catalog column order.
const COLUMN_METADATA_QUERY: &str = "\
SELECT COLUMN_NAME, DATA_TYPE_NAME, LENGTH, POSITION \
FROM SYS.TABLE_COLUMNS \
WHERE SCHEMA_NAME = '{schema}' AND TABLE_NAME = '{table}' \
UNION ALL \
SELECT COLUMN_NAME, DATA_TYPE_NAME, LENGTH, POSITION \
FROM SYS.VIEW_COLUMNS \
WHERE SCHEMA_NAME = '{schema}' AND VIEW_NAME = '{table}' \
ORDER BY POSITION";

/// Aggregated column-name list used to derive a SELECT statement for
/// views that generic introspection cannot autoload. Hierarchy and data
/// preview helper views are excluded.
const COLUMN_NAMES_QUERY: &str = "\
SELECT string_agg('\"' || COLUMN_NAME || '\"', ',') AS COL \
FROM \"PUBLIC\".\"VIEW_COLUMNS\" \
WHERE VIEW_NAME = '{table}' AND VIEW_NAME NOT LIKE '%hier%' AND VIEW_NAME NOT LIKE '%dp%' \
AND SCHEMA_NAME = '{schema}' \
GROUP BY VIEW_NAME \
UNION \
SELECT string_agg('\"' || COLUMN_NAME || '\"', ',') AS COL \
FROM \"PUBLIC\".\"TABLE_COLUMNS\" \
WHERE TABLE_NAME = '{table}' AND SCHEMA_NAME = '{schema}' \
GROUP BY TABLE_NAME";

pub struct HanaSource {
    environment: Arc<Environment>,
    connection_string: String,
}

impl HanaSource {
    pub fn new(environment: Arc<Environment>, connection_string: String) -> Self {
        HanaSource {
            environment,
            connection_string,
        }
    }

    fn connection(&self) -> Result<Connection<'_>> {
        connect(&self.environment, "hana", &self.connection_string)
    }
}

#[async_trait]
impl SchemaSource for HanaSource {
    async fn table_schema(&self, schema: &str, table: &str) -> Result<TableSchema> {
        let connection = self.connection()?;
        let query = fill_catalog_query(COLUMN_METADATA_QUERY, schema, table);

        let rows = fetch_rows(&connection, &query)
            .map_err(|e| ScriptError::introspection(table, e.to_string()))?;

        if rows.is_empty() {
            return Err(ScriptError::introspection(
                table,
                format!("table or view not found in schema {}", schema),
            ));
        }

        let columns = rows
            .into_iter()
            .map(|row| parse_column_row(table, &row))
            .collect::<Result<Vec<_>>>()?;

        Ok(TableSchema {
            schema: schema.to_string(),
            name: table.to_string(),
            columns,
        })
    }

    async fn column_select_query(&self, schema: &str, table: &str) -> Result<Option<String>> {
        let connection = self.connection()?;
        let query = fill_catalog_query(COLUMN_NAMES_QUERY, schema, table);

        let rows = fetch_rows(&connection, &query)
            .map_err(|e| ScriptError::introspection(table, e.to_string()))?;

        let columns = match rows.into_iter().next().and_then(|row| row.into_iter().next()) {
            Some(Some(columns)) if !columns.is_empty() => columns,
            _ => return Ok(None),
        };

        Ok(Some(format!(
            "SELECT {} FROM \"{}\".\"{}\";",
            columns, schema, table
        )))
    }
}

fn fill_catalog_query(template: &str, schema: &str, table: &str) -> String {
    template
        .replace("{schema}", &escape_sql_string(schema))
        .replace("{table}", &escape_sql_string(table))
}

/// Double single quotes so identifier values are safe inside a literal.
fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

fn parse_column_row(table: &str, row: &[Option<String>]) -> Result<ColumnSchema> {
    let name = row
        .first()
        .and_then(|value| value.clone())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ScriptError::introspection(table, "column with empty name"))?;

    let type_tag = row
        .get(1)
        .and_then(|value| value.as_deref())
        .map(TypeTag::parse)
        .ok_or_else(|| {
            ScriptError::introspection(table, format!("column {} has no data type", name))
        })?;

    // HANA reports a display LENGTH for every type; only the character
    // length of string-family columns is meaningful downstream.
    let length = if type_tag.is_string_family() {
        row.get(2)
            .and_then(|value| value.as_deref())
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|length| *length > 0)
    } else {
        None
    };

    Ok(ColumnSchema::new(name, type_tag, length))
}

/// Run a query and materialize every row as text cells. Used only for
/// small catalog result sets.
fn fetch_rows(
    connection: &Connection<'_>,
    sql: &str,
) -> std::result::Result<Vec<Vec<Option<String>>>, odbc_api::Error> {
    let mut rows = Vec::new();

    if let Some(mut cursor) = connection.execute(sql, ())? {
        let column_count = cursor.num_result_cols()? as usize;

        let mut buffers = TextRowSet::for_cursor(1000, &mut cursor, Some(4096))?;
        let mut row_cursor = cursor.bind_buffer(&mut buffers)?;

        while let Some(batch) = row_cursor.fetch()? {
            for row_index in 0..batch.num_rows() {
                let mut row = Vec::with_capacity(column_count);
                for column_index in 0..column_count {
                    let value = batch
                        .at(column_index, row_index)
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string());
                    row.push(value);
                }
                rows.push(row);
            }
        }
    }

    Ok(rows)
}
