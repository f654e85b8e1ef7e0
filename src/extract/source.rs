use std::sync::Arc;

use async_trait::async_trait;
use odbc_api::Environment;

use crate::common::schema::TableSchema;
use crate::config::Credentials;
use crate::connection::{build_connection_string, connect};
use crate::error::{Result, ScriptError};
use crate::extract::hana::HanaSource;

/// Read-side view of one source database: column metadata for a named
/// table, plus an optional dialect-specific SELECT statement for backends
/// whose generic introspection is unreliable.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn table_schema(&self, schema: &str, table: &str) -> Result<TableSchema>;

    /// Compatibility shim. Returns a full-column SELECT statement when
    /// the backend needs one persisted (HANA views), `None` otherwise.
    async fn column_select_query(&self, schema: &str, table: &str) -> Result<Option<String>>;
}

/// Opens a `SchemaSource` for a database id, resolving credentials and
/// verifying connectivity. One connector serves the whole run; sources
/// are acquired per task.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    async fn connect(&self, database: &str) -> Result<Box<dyn SchemaSource>>;
}

pub struct OdbcSourceConnector {
    environment: Arc<Environment>,
    credentials: Credentials,
}

impl OdbcSourceConnector {
    pub fn new(environment: Arc<Environment>, credentials: Credentials) -> Self {
        OdbcSourceConnector {
            environment,
            credentials,
        }
    }
}

#[async_trait]
impl SourceConnector for OdbcSourceConnector {
    async fn connect(&self, database: &str) -> Result<Box<dyn SchemaSource>> {
        // A missing credential entry surfaces as a connection failure for
        // the task, not as a fatal config problem for the run.
        let params = self
            .credentials
            .get(database)
            .map_err(|e| ScriptError::connection(database, e.to_string()))?;

        if database != "hana" {
            return Err(ScriptError::connection(
                database,
                "no source introspection support for this database type",
            ));
        }

        let connection_string = build_connection_string(database, params)
            .map_err(|e| ScriptError::connection(database, e.to_string()))?;

        // Verify the credentials now so the task fails at the connect
        // step rather than mid-introspection.
        drop(connect(&self.environment, database, &connection_string)?);

        Ok(Box::new(HanaSource::new(
            Arc::clone(&self.environment),
            connection_string,
        )))
    }
}
