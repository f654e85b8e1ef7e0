pub mod migrator;
pub mod run_result;
pub mod script_options;
