use notas_core::NoteId;

use crate::commands::common::{
    format_note_detail, missing_note_error, note_to_list_item, CliContext,
};
use crate::error::CliError;

pub async fn run_show(context: &CliContext, id: NoteId, as_json: bool) -> Result<(), CliError> {
    let store = context.note_store()?;
    let note = store
        .refresh_note(id)
        .await
        .map_err(|error| missing_note_error(error, id))?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&note_to_list_item(&note))?
        );
    } else {
        println!("{}", format_note_detail(&note));
    }
    Ok(())
}
