use crate::commands::common::CliContext;
use crate::error::CliError;

pub async fn run_add(context: &CliContext, title: &str, body: &str) -> Result<(), CliError> {
    let store = context.note_store()?;
    let note = store.save(title, body).await?;

    println!("{}", note.id);
    Ok(())
}
