//! Notas CLI - Manage your remote notes from the terminal.

mod auth;
mod cli;
mod commands;
mod config;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::account::{run_login, run_logout, run_register, run_status};
use crate::commands::add::run_add;
use crate::commands::common::CliContext;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::{build_changes, run_edit, run_set_completed};
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive: tracing_subscriber::filter::Directive = "notas=info"
        .parse()
        .map_err(|error| CliError::Config(format!("Invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let context = CliContext::load(cli.config_path)?;

    match cli.command {
        Commands::Login { email, password } => run_login(&context, &email, &password).await?,
        Commands::Register { email, password } => {
            run_register(&context, &email, &password).await?;
        }
        Commands::Logout => run_logout(&context)?,
        Commands::Status => run_status(&context)?,
        Commands::List { json } => run_list(&context, json).await?,
        Commands::Show { id, json } => run_show(&context, id, json).await?,
        Commands::Add { title, body } => run_add(&context, &title, &body).await?,
        Commands::Edit {
            id,
            title,
            body,
            completed,
        } => run_edit(&context, id, build_changes(title, body, completed)?).await?,
        Commands::Done { id } => run_set_completed(&context, id, true).await?,
        Commands::Undone { id } => run_set_completed(&context, id, false).await?,
        Commands::Delete { id } => run_delete(&context, id).await?,
        Commands::Config { command } => run_config(command, context)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
