use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

/// Per-run output directory `{target}_TableScript_{YYYYMMDD}` under the
/// configured result root. A leftover directory from an earlier run on
/// the same day is replaced wholesale.
pub struct ResultDir {
    path: PathBuf,
}

impl ResultDir {
    pub fn create(root: &Path, target: &str) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d");
        let path = root.join(format!("{}_TableScript_{}", target, timestamp));

        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;

        Ok(ResultDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One DDL artifact per generated target table.
    pub fn write_ddl(&self, table_name: &str, ddl: &str) -> Result<PathBuf> {
        let file_path = self.path.join(format!("{}_ddl.txt", table_name));
        fs::write(&file_path, ddl)?;
        Ok(file_path)
    }

    /// Derived SELECT statement for one source table.
    pub fn write_select_query(&self, table_basename: &str, query: &str) -> Result<PathBuf> {
        let file_path = self.path.join(format!("{}_select.txt", table_basename));
        fs::write(&file_path, query)?;
        Ok(file_path)
    }

    /// Consolidated error log, one message per line. Written even when
    /// the run had no errors.
    pub fn write_error_log(&self, errors: &[String]) -> Result<PathBuf> {
        let log_dir = self.path.join("log");
        fs::create_dir_all(&log_dir)?;

        let file_path = log_dir.join("error_log.txt");
        let mut content = errors.join("\n");
        if !errors.is_empty() {
            content.push('\n');
        }
        fs::write(&file_path, content)?;

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use tempfile::tempdir;

    #[test]
    fn creates_timestamped_directory() {
        let root = tempdir().unwrap();
        let result_dir = ResultDir::create(root.path(), "snowflake").unwrap();

        let expected = format!("snowflake_TableScript_{}", Local::now().format("%Y%m%d"));
        assert_eq!(result_dir.path().file_name().unwrap(), expected.as_str());
        assert!(result_dir.path().is_dir());
    }

    #[test]
    fn existing_directory_is_replaced() {
        let root = tempdir().unwrap();
        let first = ResultDir::create(root.path(), "snowflake").unwrap();
        let stale = first.write_ddl("OLD", "CREATE OR REPLACE TABLE ...").unwrap();
        assert!(stale.exists());

        let _second = ResultDir::create(root.path(), "snowflake").unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn artifacts_land_in_the_run_directory() {
        let root = tempdir().unwrap();
        let result_dir = ResultDir::create(root.path(), "snowflake").unwrap();

        let ddl_path = result_dir.write_ddl("STG_ORDERS", "CREATE ...").unwrap();
        assert_eq!(ddl_path.file_name().unwrap(), "STG_ORDERS_ddl.txt");

        let select_path = result_dir
            .write_select_query("CV_SALES", "SELECT \"A\" FROM \"S\".\"CV_SALES\";")
            .unwrap();
        assert_eq!(select_path.file_name().unwrap(), "CV_SALES_select.txt");
    }

    #[test]
    fn error_log_writes_one_message_per_line() {
        let root = tempdir().unwrap();
        let result_dir = ResultDir::create(root.path(), "snowflake").unwrap();

        let log_path = result_dir
            .write_error_log(&["first error".to_string(), "second error".to_string()])
            .unwrap();
        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content, "first error\nsecond error\n");

        let empty_path = result_dir.write_error_log(&[]).unwrap();
        assert_eq!(fs::read_to_string(empty_path).unwrap(), "");
    }
}
