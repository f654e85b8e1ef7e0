use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Result, ScriptError};
use crate::translate::translator::{CasePolicy, LengthPolicy};

/// Where a table-type rule's default column definitions land relative to
/// the translated source columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultColsPosition {
    Start,
    End,
}

/// Named template deriving one target table from a source table: naming
/// affixes plus verbatim column definitions owned by configuration.
#[derive(Debug, Clone)]
pub struct TableTypeRule {
    pub name: String,
    pub prefix: String,
    pub suffix: String,
    pub default_cols: Vec<String>,
    pub default_cols_position: DefaultColsPosition,
}

impl TableTypeRule {
    pub fn target_table_name(&self, target_table: &str) -> String {
        format!("{}{}{}", self.prefix, target_table, self.suffix)
    }
}

/// Schema-generation configuration, loaded from the YAML config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: String,
    pub table_types: Vec<TableTypeRule>,
    pub case_policy: CasePolicy,
    pub length_policy: LengthPolicy,
    pub source_file: PathBuf,
    pub result_file: PathBuf,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&content)?;
        Config::from_yaml(&value)
    }

    pub fn from_yaml(config: &Value) -> Result<Self> {
        let target = required_str(config, "target")?;
        let source_file = PathBuf::from(required_str(config, "source_file")?);
        let result_file = PathBuf::from(required_str(config, "result_file")?);
        let table_types = parse_table_types(config.get("table_types"))?;
        let case_policy = parse_case_policy(config.get("column_names"))?;
        let length_policy = parse_length_policy(config.get("column_length"))?;

        Ok(Config {
            target,
            table_types,
            case_policy,
            length_policy,
            source_file,
            result_file,
        })
    }
}

fn required_str(value: &Value, key: &str) -> Result<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| ScriptError::config(format!("Missing or invalid '{}'", key)))
}

fn parse_case_policy(value: Option<&Value>) -> Result<CasePolicy> {
    match value {
        None => Ok(CasePolicy::Uppercase),
        Some(value) => match value.as_str() {
            Some("uppercase") => Ok(CasePolicy::Uppercase),
            Some("lowercase") => Ok(CasePolicy::Lowercase),
            Some("unchanged") => Ok(CasePolicy::Unchanged),
            _ => Err(ScriptError::config(
                "'column_names' must be uppercase, lowercase or unchanged",
            )),
        },
    }
}

fn parse_length_policy(value: Option<&Value>) -> Result<LengthPolicy> {
    match value {
        None => Ok(LengthPolicy::Current),
        Some(value) => {
            if value.as_str() == Some("current") {
                return Ok(LengthPolicy::Current);
            }
            match value.as_u64() {
                Some(length) if length > 0 => Ok(LengthPolicy::Fixed(length as u32)),
                _ => Err(ScriptError::config(
                    "'column_length' must be a positive integer or 'current'",
                )),
            }
        }
    }
}

fn parse_table_types(value: Option<&Value>) -> Result<Vec<TableTypeRule>> {
    let mapping = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value
            .as_mapping()
            .ok_or_else(|| ScriptError::config("'table_types' must be a mapping"))?,
    };

    // YAML mapping order is preserved; it decides variant generation order.
    let mut rules = Vec::with_capacity(mapping.len());
    for (name, properties) in mapping {
        let name = name
            .as_str()
            .ok_or_else(|| ScriptError::config("Table type name must be a string"))?
            .to_string();

        let prefix = optional_str(properties, "prefix");
        let suffix = optional_str(properties, "suffix");
        let default_cols = parse_default_cols(properties.get("default_cols"))?;
        let default_cols_position = match properties.get("default_cols_position") {
            None => DefaultColsPosition::End,
            Some(position) => match position.as_str() {
                Some("start") => DefaultColsPosition::Start,
                Some("end") => DefaultColsPosition::End,
                _ => {
                    return Err(ScriptError::config(format!(
                        "Table type '{}': 'default_cols_position' must be start or end",
                        name
                    )))
                }
            },
        };

        rules.push(TableTypeRule {
            name,
            prefix,
            suffix,
            default_cols,
            default_cols_position,
        });
    }

    Ok(rules)
}

fn optional_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn parse_default_cols(value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        // A bare scalar is accepted as a one-element list
        Some(Value::String(definition)) => Ok(vec![definition.clone()]),
        Some(Value::Sequence(definitions)) => definitions
            .iter()
            .map(|definition| {
                definition
                    .as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| ScriptError::config("'default_cols' entries must be strings"))
            })
            .collect(),
        Some(_) => Err(ScriptError::config(
            "'default_cols' must be a string or a list of strings",
        )),
    }
}

/// Connection parameters for one database id. Required fields vary by
/// backend, so the values stay a flat string map and connection-string
/// builders pull what they need.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    values: BTreeMap<String, String>,
}

impl ConnectionParams {
    pub fn required(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ScriptError::config(format!("Missing credential field '{}'", key)))
    }

    pub fn optional(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        ConnectionParams {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Credential file: database id -> connection parameters.
#[derive(Debug, Clone)]
pub struct Credentials {
    databases: HashMap<String, ConnectionParams>,
}

impl Credentials {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&content)?;
        Credentials::from_yaml(&value)
    }

    pub fn from_yaml(value: &Value) -> Result<Self> {
        let mapping = value
            .as_mapping()
            .ok_or_else(|| ScriptError::config("Credentials file must be a mapping"))?;

        let mut databases = HashMap::new();
        for (database, params) in mapping {
            let database = database
                .as_str()
                .ok_or_else(|| ScriptError::config("Database id must be a string"))?
                .to_lowercase();

            let params_mapping = params.as_mapping().ok_or_else(|| {
                ScriptError::config(format!("Credentials for '{}' must be a mapping", database))
            })?;

            let mut values = BTreeMap::new();
            for (key, value) in params_mapping {
                let key = key
                    .as_str()
                    .ok_or_else(|| ScriptError::config("Credential keys must be strings"))?
                    .to_string();
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(ScriptError::config(format!(
                            "Credential field '{}' for '{}' must be scalar",
                            key, database
                        )))
                    }
                };
                values.insert(key, value);
            }

            databases.insert(database, ConnectionParams { values });
        }

        Ok(Credentials { databases })
    }

    pub fn get(&self, database: &str) -> Result<&ConnectionParams> {
        self.databases.get(database).ok_or_else(|| {
            ScriptError::config(format!("No credentials configured for '{}'", database))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_config(yaml: &str) -> Result<Config> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Config::from_yaml(&value)
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse_config(
            "target: snowflake\nsource_file: tables.csv\nresult_file: out\n",
        )
        .unwrap();

        assert_eq!(config.target, "snowflake");
        assert_eq!(config.case_policy, CasePolicy::Uppercase);
        assert_eq!(config.length_policy, LengthPolicy::Current);
        assert!(config.table_types.is_empty());
    }

    #[test]
    fn table_types_keep_file_order() {
        let config = parse_config(
            r#"
target: snowflake
source_file: tables.csv
result_file: out
table_types:
  staging:
    prefix: "STG_"
    default_cols: "LOAD_TS TIMESTAMP"
  history:
    suffix: "_HIST"
    default_cols:
      - "VALID_FROM TIMESTAMP"
      - "VALID_TO TIMESTAMP"
    default_cols_position: start
"#,
        )
        .unwrap();

        assert_eq!(config.table_types.len(), 2);
        assert_eq!(config.table_types[0].name, "staging");
        assert_eq!(config.table_types[0].default_cols, ["LOAD_TS TIMESTAMP"]);
        assert_eq!(
            config.table_types[0].default_cols_position,
            DefaultColsPosition::End
        );
        assert_eq!(config.table_types[1].target_table_name("ORDERS"), "ORDERS_HIST");
        assert_eq!(
            config.table_types[1].default_cols_position,
            DefaultColsPosition::Start
        );
    }

    #[test]
    fn invalid_column_length_is_rejected() {
        let err = parse_config(
            "target: t\nsource_file: s\nresult_file: r\ncolumn_length: nope\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("column_length"));
    }

    #[test]
    fn fixed_column_length_is_parsed() {
        let config = parse_config(
            "target: t\nsource_file: s\nresult_file: r\ncolumn_length: 500\ncolumn_names: lowercase\n",
        )
        .unwrap();
        assert_eq!(config.length_policy, LengthPolicy::Fixed(500));
        assert_eq!(config.case_policy, CasePolicy::Lowercase);
    }

    #[test]
    fn missing_credentials_entry_is_a_config_error() {
        let value: Value =
            serde_yaml::from_str("hana:\n  host: h1\n  username: u\n  password: p\n").unwrap();
        let credentials = Credentials::from_yaml(&value).unwrap();

        assert!(credentials.get("hana").is_ok());
        let err = credentials.get("snowflake").unwrap_err();
        assert!(matches!(err, ScriptError::Config(_)));
    }

    #[test]
    fn numeric_credential_fields_become_strings() {
        let value: Value =
            serde_yaml::from_str("hana:\n  host: h1\n  port: 30015\n  username: u\n  password: p\n")
                .unwrap();
        let credentials = Credentials::from_yaml(&value).unwrap();
        let params = credentials.get("hana").unwrap();
        assert_eq!(params.optional("port"), Some("30015"));
        assert!(params.required("account").is_err());
    }
}
