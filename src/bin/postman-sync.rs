//! postman-sync CLI Binary
//!
//! Command-line interface for keeping Postman collections in step with their specs.

use clap::Parser;
use postman_sync::logging::init_logging;
use postman_sync::tooling::cli::{Cli, CliContext, CommandOutput};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<CommandOutput> {
    let context = CliContext::new(cli.workspace.clone(), cli.config.clone())?;

    let logging = cli.logging_config(&context.config().logging);
    init_logging(Some(&logging))?;

    Ok(context.run(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output.text);
            if let Some(failure) = output.failure {
                eprintln!("Error: {}", failure);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
