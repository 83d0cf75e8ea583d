//! One step run: configure, authenticate, process, write

use crate::cli::Args;
use crate::config::StepConfig;
use crate::io;
use anyhow::Result;
use mailstep_auth::Authenticator;
use mailstep_core::BatchRunner;
use tracing::info;

pub async fn run(args: &Args) -> Result<()> {
    let config = StepConfig::load(&args.config)?;

    let actions = match &args.input {
        Some(path) => Some(io::read_actions(path)?),
        None => None,
    };

    let mut authenticator = Authenticator::new(config.credentials());
    if let Some(host) = &config.authority_host {
        authenticator = authenticator.with_authority_host(host);
    }

    let mut mailbox = mailstep_core::connect(&authenticator, &config.user_id).await?;
    if let Some(base_url) = &config.graph_base_url {
        mailbox = mailbox.with_base_url(base_url);
    }
    let runner = BatchRunner::new(mailbox);

    // Output is written once, after every action has completed
    match actions {
        Some(actions) => {
            let output = runner.run(&actions).await?;
            io::write_records(args.output.as_deref(), &output.records)?;
        }
        None => {
            let request = config.legacy_request();
            info!(
                "Fetching emails for user {} from folder '{}'...",
                config.user_id, request.folder
            );
            let messages = runner.run_legacy(&request).await?;
            io::write_records(args.output.as_deref(), &messages)?;
        }
    }

    Ok(())
}
