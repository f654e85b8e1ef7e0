pub mod substitutions;
pub mod translator;
pub mod types;
