pub mod ddl;
pub mod executor;
