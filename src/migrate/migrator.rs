use log::{debug, error, info};

use crate::common::helpers::table_basename;
use crate::common::schema::ColumnSchema;
use crate::config::TableTypeRule;
use crate::error::Result;
use crate::extract::source::SourceConnector;
use crate::migrate::run_result::{RunResult, TaskStatus};
use crate::migrate::script_options::ScriptOptions;
use crate::output::ResultDir;
use crate::script::ddl::build_create_table_ddl;
use crate::script::executor::DdlExecutor;
use crate::tasks::MigrationTask;
use crate::translate::translator::translate_columns;

/// Sequential batch driver. Tasks are independent failure domains: every
/// error raised while processing one task is converted into a log
/// message and the loop moves on. Only writing the final error log can
/// abort the run.
pub struct ScriptGenerator {
    sources: Box<dyn SourceConnector>,
    target: Box<dyn DdlExecutor>,
    options: ScriptOptions,
    output: ResultDir,
}

impl ScriptGenerator {
    pub fn new(
        sources: Box<dyn SourceConnector>,
        target: Box<dyn DdlExecutor>,
        options: ScriptOptions,
        output: ResultDir,
    ) -> Self {
        ScriptGenerator {
            sources,
            target,
            options,
            output,
        }
    }

    pub async fn run(&self, tasks: &[MigrationTask]) -> Result<RunResult> {
        info!("Running table scripter, {} task(s)", tasks.len());

        let mut result = RunResult::default();

        for task in tasks {
            if task.disabled {
                debug!("Skipping disabled task {}", task.source_key());
                result.statuses.push((task.source_key(), TaskStatus::Skipped));
                continue;
            }

            match self.process_task(task).await {
                Ok(status) => {
                    let message =
                        format!("DDL script generated successfully for: {}", task.source_key());
                    info!("{}", message);
                    result.successes.push(message);
                    result.statuses.push((task.source_key(), status));
                }
                Err(e) => {
                    let message = format!(
                        "ERROR: generating script for {} failed: {}",
                        task.source_key(),
                        e
                    );
                    error!("{}", message);
                    result.errors.push(message);
                    result.statuses.push((task.source_key(), TaskStatus::Failed));
                }
            }
        }

        // Not error-isolated: without the log artifact there is no record
        // of what failed.
        self.output.write_error_log(&result.errors)?;

        Ok(result)
    }

    async fn process_task(&self, task: &MigrationTask) -> Result<TaskStatus> {
        let source = self.sources.connect(&task.source_db).await?;

        let table = source
            .table_schema(&task.source_schema, &task.source_table)
            .await?;
        debug!(
            "Introspected {} column(s) from {}",
            table.columns.len(),
            table.qualified_name()
        );

        if let Some(select_query) = source
            .column_select_query(&task.source_schema, &task.source_table)
            .await?
        {
            self.output
                .write_select_query(table_basename(&task.source_table), &select_query)?;
            info!("SELECT query generated for: {}", task.source_table);
        }

        let translated = translate_columns(&table.columns, &self.options.translation);

        if self.options.table_types.is_empty() {
            self.generate_variant(task, &task.target_table, &translated, None)
                .await?;
        } else {
            for rule in &self.options.table_types {
                let variant_name = rule.target_table_name(&task.target_table);
                self.generate_variant(task, &variant_name, &translated, Some(rule))
                    .await?;
            }
        }

        Ok(if task.build {
            TaskStatus::ScriptGeneratedAndBuilt
        } else {
            TaskStatus::ScriptGenerated
        })
    }

    async fn generate_variant(
        &self,
        task: &MigrationTask,
        table_name: &str,
        columns: &[ColumnSchema],
        rule: Option<&TableTypeRule>,
    ) -> Result<()> {
        let ddl = build_create_table_ddl(&task.target_schema, table_name, columns, rule);
        self.output.write_ddl(table_name, &ddl)?;
        debug!("DDL artifact written for {}", table_name);

        if task.build {
            self.target.execute(table_name, &ddl).await?;
            info!("Table {} created successfully", table_name);
        }

        Ok(())
    }
}
