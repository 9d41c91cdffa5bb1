use notas_core::{NoteChanges, NoteId};

use crate::commands::common::{format_note_line, missing_note_error, CliContext};
use crate::error::CliError;

pub fn build_changes(
    title: Option<String>,
    body: Option<String>,
    completed: Option<bool>,
) -> Result<NoteChanges, CliError> {
    let changes = NoteChanges {
        title,
        body,
        completed,
    };
    if changes.is_empty() {
        return Err(CliError::NothingToEdit);
    }
    Ok(changes)
}

pub async fn run_edit(
    context: &CliContext,
    id: NoteId,
    changes: NoteChanges,
) -> Result<(), CliError> {
    let store = context.note_store()?;
    let note = store
        .update_note(id, changes)
        .await
        .map_err(|error| missing_note_error(error, id))?;

    println!("{}", format_note_line(&note));
    Ok(())
}

pub async fn run_set_completed(
    context: &CliContext,
    id: NoteId,
    completed: bool,
) -> Result<(), CliError> {
    run_edit(context, id, NoteChanges::default().completed(completed)).await
}
