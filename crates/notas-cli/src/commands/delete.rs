use notas_core::NoteId;

use crate::commands::common::{missing_note_error, CliContext};
use crate::error::CliError;

pub async fn run_delete(context: &CliContext, id: NoteId) -> Result<(), CliError> {
    let store = context.note_store()?;
    store
        .delete_note(id)
        .await
        .map_err(|error| missing_note_error(error, id))?;

    println!("Deleted note {id}");
    Ok(())
}
