use std::env;

use crate::cli::ConfigCommands;
use crate::commands::common::CliContext;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, context: CliContext) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            timeout_secs,
        } => run_config_init(context, &api_url, timeout_secs),
        ConfigCommands::Show => run_config_show(&context),
    }
}

pub fn run_config_init(
    mut context: CliContext,
    api_url: &str,
    timeout_secs: Option<u64>,
) -> Result<(), CliError> {
    context
        .config
        .set_api_base_url(api_url)
        .map_err(CliError::Config)?;
    if timeout_secs.is_some() {
        context.config.request_timeout_secs = timeout_secs.filter(|secs| *secs > 0);
    }
    context
        .config
        .save_to_path(&context.config_path)
        .map_err(CliError::Config)?;

    tracing::debug!("Wrote CLI config to {}", context.config_path.display());
    println!("Saved config to {}", context.config_path.display());
    Ok(())
}

pub fn run_config_show(context: &CliContext) -> Result<(), CliError> {
    println!("Config file: {}", context.config_path.display());
    match context.config.client_config(|name| env::var(name).ok())? {
        Some(client) => {
            println!("API: {}", client.api_base_url);
            match client.request_timeout {
                Some(timeout) => println!("Request timeout: {}s", timeout.as_secs()),
                None => println!("Request timeout: none"),
            }
        }
        None => println!("API: not configured"),
    }
    Ok(())
}
