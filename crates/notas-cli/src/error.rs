use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notas_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Nothing to change. Pass --title, --body, or --completed.")]
    NothingToEdit,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    LoadFailed(String),
    #[error("Not signed in. Run `notas login --email <EMAIL> --password <PASSWORD>` first.")]
    NotSignedIn,
    #[error(
        "The API is not configured. Run `notas config init --api-url <URL>` or set NOTAS_API_URL."
    )]
    NotConfigured,
}
