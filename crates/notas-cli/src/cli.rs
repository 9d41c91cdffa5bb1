use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notas_core::NoteId;

#[derive(Parser)]
#[command(name = "notas")]
#[command(about = "Keep your notes in sync with the Notas service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the CLI config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token in the keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create a new account
    Register {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password (at least 8 characters)
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// List notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note
    Show {
        /// Note ID
        id: NoteId,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,
        /// Note body (HTML allowed)
        #[arg(short, long, default_value = "")]
        body: String,
    },
    /// Change fields of an existing note
    Edit {
        /// Note ID
        id: NoteId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New body
        #[arg(short, long)]
        body: Option<String>,
        /// New completion flag
        #[arg(long, value_name = "BOOL")]
        completed: Option<bool>,
    },
    /// Mark a note as completed
    Done {
        /// Note ID
        id: NoteId,
    },
    /// Mark a note as not completed
    Undone {
        /// Note ID
        id: NoteId,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: NoteId,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the API endpoint to the config file
    Init {
        /// Base URL of the notes API (e.g. <https://notas.example.com/api>)
        #[arg(long, value_name = "URL")]
        api_url: String,
        /// Request timeout in seconds (0 disables it)
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
    },
    /// Print the effective configuration
    Show,
}
