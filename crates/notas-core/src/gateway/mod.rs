//! Remote note gateway.
//!
//! Translates logical note operations into calls against the remote service.
//! The gateway is stateless: no retries, no caching. `NoteGateway` is the seam
//! the note store depends on; `HttpGateway` is the network implementation.

mod http;
mod wire;

use std::future::Future;

use crate::error::Result;
use crate::models::{Note, NoteChanges, NoteId};

pub use http::HttpGateway;
pub use wire::RegisterConfirmation;

/// Note operations offered by the remote service.
pub trait NoteGateway: Send + Sync {
    /// Every note visible to the current session, in server order
    fn list(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// One note by id
    fn get(&self, id: NoteId) -> impl Future<Output = Result<Note>> + Send;

    /// Create a note; it is always created with `completed == false`
    fn create(&self, title: &str, body: &str) -> impl Future<Output = Result<Note>> + Send;

    /// Send only the supplied fields and return the server's representation
    fn update(
        &self,
        id: NoteId,
        changes: &NoteChanges,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Delete a note
    fn remove(&self, id: NoteId) -> impl Future<Output = Result<()>> + Send;
}
