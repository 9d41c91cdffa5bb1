use crate::commands::common::{format_note_lines, note_to_list_item, CliContext, NoteListItem};
use crate::error::CliError;

pub async fn run_list(context: &CliContext, as_json: bool) -> Result<(), CliError> {
    let store = context.note_store()?;
    store.load().await;
    if let Some(error) = store.error() {
        return Err(CliError::LoadFailed(error));
    }
    let notes = store.notes();

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes yet. Add one with `notas add --title <TITLE>`.");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
