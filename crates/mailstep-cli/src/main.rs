//! mailstep - batch mailbox actions against Microsoft Graph
//!
//! Reads a step configuration and an optional list of actions, runs them
//! against one user's mailbox with an app-only token, and writes the results
//! as newline-delimited JSON.

mod app;
mod cli;
mod config;
mod io;

use cli::Args;
use mailstep_core::CoreError;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for records
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mailstep=info")),
        )
        .init();

    let default_config = std::env::var("MAILSTEP_CONFIG").ok();
    let args = match Args::parse(std::env::args().skip(1), default_config) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match app::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CoreError>() {
                Some(core) => {
                    for line in core.diagnostics() {
                        eprintln!("{}", line);
                    }
                }
                None => eprintln!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
