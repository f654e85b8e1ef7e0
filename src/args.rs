use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
name = "TableScripter",
version = env ! ("CARGO_PKG_VERSION"),
about = "Generates Snowflake CREATE TABLE scripts from introspected SAP HANA tables and views, driven by a task spreadsheet and a YAML config.",
setting = AppSettings::ColoredHelp,
)]
pub struct Args {
    /// Activate verbose mode
    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,

    /// Activate quiet mode
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,

    /// Path to the schema generation config
    #[structopt(short = "c", long = "config", default_value = "schema_config.yml")]
    pub config: String,

    /// Path to the credentials file
    #[structopt(short = "s", long = "credentials", default_value = "credentials.yml")]
    pub credentials: String,
}
