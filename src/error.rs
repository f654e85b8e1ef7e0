use thiserror::Error;

/// Error taxonomy for a scripting run. Every variant raised while
/// processing a single task is caught at the task boundary and turned
/// into one line of the error log; only failures outside the task loop
/// (bad config, unwritable result directory) abort the run.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Missing credential entry, missing required field or unsupported option
    #[error("Configuration error: {0}")]
    Config(String),

    /// Driver-level connect failure for a database id
    #[error("Connection to '{database}' failed: {message}")]
    Connection { database: String, message: String },

    /// Table or view not found, or its columns are not readable
    #[error("Introspection of '{table}' failed: {message}")]
    Introspection { table: String, message: String },

    /// Reserved for unrecoverable type-mapping states; the translator is
    /// permissive by design and does not currently raise this.
    #[error("Translation error: {0}")]
    Translation(String),

    /// DDL rejected by the target database
    #[error("Executing DDL for '{table}' failed: {message}")]
    Execution { table: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScriptError {
    pub fn config(message: impl Into<String>) -> Self {
        ScriptError::Config(message.into())
    }

    pub fn connection(database: impl Into<String>, message: impl Into<String>) -> Self {
        ScriptError::Connection {
            database: database.into(),
            message: message.into(),
        }
    }

    pub fn introspection(table: impl Into<String>, message: impl Into<String>) -> Self {
        ScriptError::Introspection {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn execution(table: impl Into<String>, message: impl Into<String>) -> Self {
        ScriptError::Execution {
            table: table.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
