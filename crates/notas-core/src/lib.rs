//! notas-core - Core library for Notas
//!
//! This crate contains the note model, the gateway to the remote note
//! service, the session/token handling, and the in-memory note store used by
//! Notas front ends.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use gateway::{HttpGateway, NoteGateway};
pub use models::{Note, NoteChanges, NoteId};
pub use session::{Session, TokenStore};
pub use store::{NoteStore, StorePhase, StoreSnapshot};
