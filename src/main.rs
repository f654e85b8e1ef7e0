#[macro_use]
extern crate log;

use std::io::Write;
use std::sync::Arc;
use std::{env, thread};

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::Env;
use structopt::StructOpt;

use crate::args::Args;
use crate::common::helpers::print_error_chain;
use crate::config::{Config, Credentials};
use crate::connection::create_environment;
use crate::extract::source::OdbcSourceConnector;
use crate::migrate::migrator::ScriptGenerator;
use crate::migrate::script_options::ScriptOptions;
use crate::output::ResultDir;
use crate::script::executor::SnowflakeTarget;
use crate::tasks::load_tasks;
use crate::translate::substitutions::TypeSubstitutions;
use crate::translate::translator::TranslationConfig;

mod args;
mod common;
mod config;
mod connection;
mod error;
mod extract;
mod migrate;
mod output;
mod script;
mod tasks;
mod translate;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    if let Err(error) = init().await.with_context(|| "Run failed") {
        print_error_chain(&error);
    }

    Ok(())
}

async fn init() -> Result<()> {
    let options = Args::from_args();

    initialize_logger(options.verbose, options.quiet);

    // Parse config
    let config = Config::load(&options.config).context("Failed to load config file")?;
    let credentials =
        Credentials::load(&options.credentials).context("Failed to load credentials file")?;
    let tasks = load_tasks(&config.source_file).context("Failed to load task spreadsheet")?;
    let substitutions = TypeSubstitutions::default();

    debug!("Total tasks loaded: {}", tasks.len());
    debug!("Total type substitutions loaded: {}", substitutions.len());
    info!("Initializing connections...");

    let environment = create_environment()?;

    let target = SnowflakeTarget::from_credentials(
        Arc::clone(&environment),
        &config.target,
        &credentials,
    )
    .context("Failed to initialize target connection")?;

    let result_dir = ResultDir::create(&config.result_file, &config.target)
        .context("Failed to create result directory")?;
    info!("Result directory: {}", result_dir.path().display());

    let sources = OdbcSourceConnector::new(Arc::clone(&environment), credentials);

    let script_options = ScriptOptions {
        translation: TranslationConfig {
            case_policy: config.case_policy,
            length_policy: config.length_policy,
            substitutions,
        },
        table_types: config.table_types.clone(),
    };

    let generator = ScriptGenerator::new(
        Box::new(sources),
        Box::new(target),
        script_options,
        result_dir,
    );

    let result = generator.run(&tasks).await?;

    info!(
        "Run finished: {} script(s) generated, {} task(s) failed",
        result.successes.len(),
        result.errors.len()
    );

    if result.has_errors() {
        warn!("See log/error_log.txt in the result directory for details");
    }

    Ok(())
}

fn initialize_logger(verbose: bool, quiet: bool) {
    // Set the `RUST_LOG` environment variable to control the logging level

    if quiet {
        env::set_var("RUST_LOG", "warn");
    } else {
        env::set_var("RUST_LOG", if verbose { "debug" } else { "info" });
    }

    // Initialize the logger with the desired format and additional configuration
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("odbc_api", log::LevelFilter::Error)
        .format(|buf, record| {
            let timestamp = Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "{} {:<5} [{}] - {}",
                timestamp,
                record.level(),
                thread::current().name().unwrap_or("<unnamed>"),
                record.args()
            )
        })
        .init();
}
