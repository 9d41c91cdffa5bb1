use std::env;
use std::path::PathBuf;

use notas_core::auth::AuthService;
use notas_core::{HttpGateway, Note, NoteId, NoteStore, Session};
use serde::Serialize;

use crate::auth::KeyringTokenStore;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

const PREVIEW_CHARS: usize = 48;

/// Resolved config file plus the values loaded from it.
#[derive(Debug)]
pub struct CliContext {
    pub config_path: PathBuf,
    pub config: CliConfig,
}

impl CliContext {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config_path = match config_path {
            Some(path) => path,
            None => default_config_path().map_err(CliError::Config)?,
        };
        let config = CliConfig::load_from_path(&config_path).map_err(CliError::Config)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn gateway(&self) -> Result<HttpGateway, CliError> {
        let client = self
            .config
            .client_config(|name| env::var(name).ok())?
            .ok_or(CliError::NotConfigured)?;
        Ok(HttpGateway::new(
            client,
            Session::new(KeyringTokenStore),
        )?)
    }

    pub fn auth_service(&self) -> Result<AuthService, CliError> {
        Ok(AuthService::new(self.gateway()?))
    }

    /// Note commands only run once a session token is stored.
    pub fn note_store(&self) -> Result<NoteStore<HttpGateway>, CliError> {
        let gateway = self.gateway()?;
        if !gateway.session().is_authenticated()? {
            return Err(CliError::NotSignedIn);
        }
        Ok(NoteStore::new(gateway))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub preview: String,
    pub completed: bool,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        body: note.body.clone(),
        preview: note.body_preview(PREVIEW_CHARS),
        completed: note.completed,
    }
}

pub fn format_note_line(note: &Note) -> String {
    let mark = if note.completed { 'x' } else { ' ' };
    let preview = note.body_preview(PREVIEW_CHARS);
    if preview.is_empty() {
        format!("{:>6}  [{mark}]  {}", note.id.get(), note.title)
    } else {
        format!("{:>6}  [{mark}]  {:<30}  {preview}", note.id.get(), note.title)
    }
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes.iter().map(format_note_line).collect()
}

pub fn format_note_detail(note: &Note) -> String {
    let status = if note.completed { "completed" } else { "open" };
    let body = note.body_preview(usize::MAX);
    if body.is_empty() {
        format!("#{} {} ({status})", note.id, note.title)
    } else {
        format!("#{} {} ({status})\n\n{body}", note.id, note.title)
    }
}

/// A 404 from a single-note route means the id does not exist.
pub fn missing_note_error(error: notas_core::Error, id: NoteId) -> CliError {
    if error.status() == Some(404) {
        CliError::NoteNotFound(id.to_string())
    } else {
        CliError::Core(error)
    }
}
