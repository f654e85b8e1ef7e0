use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;

/// One row of the task spreadsheet: which source table to script into
/// which target table. Disabled tasks are skipped entirely; tasks with
/// `build = false` generate DDL text without executing it.
#[derive(Debug, Clone)]
pub struct MigrationTask {
    pub source_db: String,
    pub source_schema: String,
    pub source_table: String,
    pub target_schema: String,
    pub target_table: String,
    pub disabled: bool,
    pub build: bool,
}

impl MigrationTask {
    /// Identity used to tag success and error messages.
    pub fn source_key(&self) -> String {
        format!("{}.{}", self.source_schema, self.source_table)
    }
}

pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<MigrationTask>> {
    let file = File::open(path)?;
    read_tasks(file)
}

pub fn read_tasks<R: std::io::Read>(reader: R) -> Result<Vec<MigrationTask>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let field = |record: &csv::StringRecord, name: &str| -> String {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|index| record.get(index))
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    let mut tasks = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        tasks.push(MigrationTask {
            source_db: field(&record, "SOURCE_DB").to_lowercase(),
            source_schema: field(&record, "SOURCE_SCHEMA"),
            source_table: field(&record, "SOURCE_TABLE"),
            target_schema: field(&record, "TARGET_SCHEMA"),
            target_table: field(&record, "TARGET_TABLE"),
            disabled: field(&record, "DISABLE").eq_ignore_ascii_case("Y"),
            build: field(&record, "BUILD").eq_ignore_ascii_case("Y"),
        });
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
SOURCE_DB,SOURCE_SCHEMA,SOURCE_TABLE,TARGET_SCHEMA,TARGET_TABLE,DISABLE,BUILD
hana,ERP,ORDERS,RAW,ORDERS,N,Y
HANA,ERP,pkg.sales/CV_REVENUE,RAW,REVENUE,Y,
hana,ERP,ITEMS,RAW,ITEMS,,
";

    #[test]
    fn rows_are_parsed_in_order() {
        let tasks = read_tasks(SHEET.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].source_table, "ORDERS");
        assert_eq!(tasks[0].source_key(), "ERP.ORDERS");
        assert!(tasks[0].build);
        assert!(!tasks[0].disabled);
    }

    #[test]
    fn source_db_is_normalized_to_lowercase() {
        let tasks = read_tasks(SHEET.as_bytes()).unwrap();
        assert_eq!(tasks[1].source_db, "hana");
    }

    #[test]
    fn disable_and_build_default_to_no() {
        let tasks = read_tasks(SHEET.as_bytes()).unwrap();
        assert!(tasks[1].disabled);
        assert!(!tasks[1].build);
        assert!(!tasks[2].disabled);
        assert!(!tasks[2].build);
    }
}
