use std::sync::Arc;

use async_trait::async_trait;
use odbc_api::Environment;

use crate::config::{ConnectionParams, Credentials};
use crate::connection::{build_connection_string, connect};
use crate::error::{Result, ScriptError};

/// Write side of the target database: executes rendered DDL when a
/// task's build flag is set.
#[async_trait]
pub trait DdlExecutor: Send + Sync {
    async fn execute(&self, table: &str, ddl: &str) -> Result<()>;
}

pub struct SnowflakeTarget {
    environment: Arc<Environment>,
    connection_string: String,
}

impl SnowflakeTarget {
    /// Resolve target credentials up front; a missing target entry is
    /// fatal for the whole run, unlike per-task source failures.
    pub fn from_credentials(
        environment: Arc<Environment>,
        target: &str,
        credentials: &Credentials,
    ) -> Result<Self> {
        let params: &ConnectionParams = credentials.get(target)?;
        let connection_string = build_connection_string(target, params)?;
        Ok(SnowflakeTarget {
            environment,
            connection_string,
        })
    }
}

#[async_trait]
impl DdlExecutor for SnowflakeTarget {
    async fn execute(&self, table: &str, ddl: &str) -> Result<()> {
        let connection = connect(&self.environment, "snowflake", &self.connection_string)?;

        connection
            .execute(ddl, ())
            .map_err(|e| ScriptError::execution(table, e.to_string()))?;

        Ok(())
    }
}
