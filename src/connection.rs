use std::sync::Arc;

use odbc_api::{Connection, ConnectionOptions, Environment};

use crate::config::ConnectionParams;
use crate::error::{Result, ScriptError};

/// One ODBC environment for the whole process; every driver struct holds
/// a clone of the Arc and opens short-lived connections from it.
pub fn create_environment() -> Result<Arc<Environment>> {
    let environment = Environment::new()
        .map_err(|e| ScriptError::config(format!("Failed to create ODBC environment: {}", e)))?;
    Ok(Arc::new(environment))
}

pub fn connect<'env>(
    environment: &'env Environment,
    database: &str,
    connection_string: &str,
) -> Result<Connection<'env>> {
    environment
        .connect_with_connection_string(connection_string, ConnectionOptions::default())
        .map_err(|e| ScriptError::connection(database, e.to_string()))
}

/// Build the ODBC connection string for a database id. The id doubles as
/// the backend kind, so required credential fields differ per id.
pub fn build_connection_string(database: &str, params: &ConnectionParams) -> Result<String> {
    match database {
        "snowflake" => build_snowflake_connection_string(params),
        "hana" => build_hana_connection_string(params),
        other => Err(ScriptError::config(format!(
            "Unsupported database type: {}",
            other
        ))),
    }
}

fn build_snowflake_connection_string(params: &ConnectionParams) -> Result<String> {
    let account = params.required("account")?;
    let mut connection_string = format!(
        "Driver={{SnowflakeDSIIDriver}};Server={}.snowflakecomputing.com;Uid={};Pwd={};",
        account,
        params.required("username")?,
        params.required("password")?,
    );

    for (field, key) in [
        ("Authenticator", "authenticator"),
        ("Database", "database"),
        ("Warehouse", "warehouse"),
        ("Schema", "schema"),
        ("Role", "role"),
    ] {
        if let Some(value) = params.optional(key) {
            connection_string.push_str(&format!("{}={};", field, value));
        }
    }

    Ok(connection_string)
}

fn build_hana_connection_string(params: &ConnectionParams) -> Result<String> {
    let host = params.required("host")?;
    let port = params.optional("port").unwrap_or("30015");

    let mut connection_string = format!(
        "Driver={{HDBODBC}};ServerNode={}:{};Uid={};Pwd={};",
        host,
        port,
        params.required("username")?,
        params.required("password")?,
    );

    if let Some(database) = params.optional("database") {
        connection_string.push_str(&format!("DatabaseName={};", database));
    }

    Ok(connection_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hana_connection_string_defaults_the_port() {
        let params = ConnectionParams::from_pairs(&[
            ("host", "hana.internal"),
            ("username", "reader"),
            ("password", "secret"),
        ]);
        let connection_string = build_connection_string("hana", &params).unwrap();
        assert_eq!(
            connection_string,
            "Driver={HDBODBC};ServerNode=hana.internal:30015;Uid=reader;Pwd=secret;"
        );
    }

    #[test]
    fn snowflake_connection_string_includes_optional_fields() {
        let params = ConnectionParams::from_pairs(&[
            ("account", "acme-eu1"),
            ("username", "loader"),
            ("password", "secret"),
            ("warehouse", "LOAD_WH"),
            ("role", "SYSADMIN"),
        ]);
        let connection_string = build_connection_string("snowflake", &params).unwrap();
        assert!(connection_string.starts_with(
            "Driver={SnowflakeDSIIDriver};Server=acme-eu1.snowflakecomputing.com;"
        ));
        assert!(connection_string.contains("Warehouse=LOAD_WH;"));
        assert!(connection_string.contains("Role=SYSADMIN;"));
        assert!(!connection_string.contains("Database="));
    }

    #[test]
    fn missing_required_field_is_a_config_error() {
        let params = ConnectionParams::from_pairs(&[("host", "hana.internal")]);
        let err = build_connection_string("hana", &params).unwrap_err();
        assert!(matches!(err, ScriptError::Config(_)));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let params = ConnectionParams::from_pairs(&[]);
        let err = build_connection_string("oracle", &params).unwrap_err();
        assert!(err.to_string().contains("Unsupported database type"));
    }
}
