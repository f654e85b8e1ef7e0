/// Terminal state of one task. No retries within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Skipped,
    Failed,
    ScriptGenerated,
    ScriptGeneratedAndBuilt,
}

/// Accumulated outcome of a whole run, returned by the orchestrator.
/// `successes` and `errors` are append-only, in task order; `errors` is
/// what ends up in `log/error_log.txt`.
#[derive(Debug, Default)]
pub struct RunResult {
    pub successes: Vec<String>,
    pub errors: Vec<String>,
    pub statuses: Vec<(String, TaskStatus)>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
