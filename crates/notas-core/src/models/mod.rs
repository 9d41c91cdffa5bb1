//! Data models for Notas

mod note;

pub use note::{strip_html, NewNote, Note, NoteChanges, NoteId};
