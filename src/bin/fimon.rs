//! Fimon CLI Binary
//!
//! Command-line entry point for the polling file-integrity monitor.

use clap::Parser;
use fimon::logging::init_logging;
use fimon::tooling::cli::{Cli, CliContext};
use std::process;
use tracing::info;

fn main() {
    let cli = Cli::parse();

    let mut context = match CliContext::new(cli.config.clone(), &cli.overrides()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    cli.apply_logging_flags(context.config_mut());
    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let cancel = context.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Interrupt received, stopping");
        cancel.cancel();
    }) {
        eprintln!("Error installing interrupt handler: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
