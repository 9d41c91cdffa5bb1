//! In-memory note store for the active session.
//!
//! The store owns the canonical note collection and routes every mutation
//! through a [`NoteGateway`]. Mutations are confirm-then-apply: the collection
//! only ever changes after the remote service has accepted a change, so it is
//! always a subset of confirmed server state and nothing needs rolling back.
//!
//! No lock is held across a network call. Overlapping operations run
//! independently; for overlapping loads the most recently *started* load wins
//! and older results are dropped.
//!
//! A store starts out `Loading`: its first observable state is the initial
//! fetch, which the owner drives with [`NoteStore::load`] (or builds through
//! [`NoteStore::open`]).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::gateway::NoteGateway;
use crate::models::{Note, NoteChanges, NoteId};

/// Error text recorded when a load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Loading,
    Ready,
    Failed,
    /// Terminal; see [`NoteStore::close`].
    Closed,
}

/// Presentation view of the store at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub notes: Vec<Note>,
    pub phase: StorePhase,
    pub error: Option<String>,
}

impl StoreSnapshot {
    const fn initial() -> Self {
        Self {
            notes: Vec::new(),
            phase: StorePhase::Loading,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == StorePhase::Loading
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }
}

pub struct NoteStore<G> {
    gateway: G,
    state: watch::Sender<StoreSnapshot>,
    latest_load: AtomicU64,
    closed: AtomicBool,
}

impl<G: NoteGateway> NoteStore<G> {
    /// An empty store in `Loading`; the initial fetch runs on the first
    /// [`Self::load`].
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::initial());
        Self {
            gateway,
            state,
            latest_load: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Build a store and run its initial load.
    pub async fn open(gateway: G) -> Self {
        let store = Self::new(gateway);
        store.load().await;
        store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.borrow().notes.clone()
    }

    pub fn note(&self, id: NoteId) -> Option<Note> {
        self.state.borrow().note(id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn phase(&self) -> StorePhase {
        self.state.borrow().phase
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Stop applying results. Operations already in flight still resolve for
    /// their callers, but the collection no longer changes and the phase
    /// settles on `Closed`.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.send_modify(|state| state.phase = StorePhase::Closed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Refresh the whole collection from the remote service.
    ///
    /// Failure is recorded in [`Self::error`] rather than returned, and the
    /// previous collection stays available.
    pub async fn load(&self) {
        if self.is_closed() {
            return;
        }
        let generation = self.latest_load.fetch_add(1, Ordering::SeqCst) + 1;
        self.modify_open(|state| {
            state.phase = StorePhase::Loading;
            state.error = None;
        });

        let result = self.gateway.list().await;

        if self.latest_load.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping superseded note load #{}", generation);
            return;
        }

        match result {
            Ok(notes) => {
                let notes = dedupe_by_id(notes);
                tracing::debug!("Loaded {} notes", notes.len());
                self.modify_open(|state| {
                    state.notes = notes;
                    state.phase = StorePhase::Ready;
                    state.error = None;
                });
            }
            Err(error) => {
                tracing::warn!("Failed to load notes: {}", error);
                self.modify_open(|state| {
                    state.phase = StorePhase::Failed;
                    state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                });
            }
        }
    }

    /// Create a note and append the confirmed result.
    ///
    /// A blank title is rejected before anything is sent; otherwise the
    /// title and body go out exactly as given.
    pub async fn save(&self, title: &str, body: &str) -> Result<Note> {
        validate_title(title)?;
        let note = self.gateway.create(title, body).await?;

        self.apply(|notes| {
            if notes.iter().any(|existing| existing.id == note.id) {
                tracing::warn!("Created note {} is already cached; merging", note.id);
            }
            upsert(notes, note.clone());
        });
        Ok(note)
    }

    /// Send `changes` and merge the confirmed note into the matching entry.
    pub async fn update_note(&self, id: NoteId, changes: NoteChanges) -> Result<Note> {
        validate_changes(&changes)?;
        let confirmed = self.gateway.update(id, &changes).await?;

        self.apply(|notes| {
            if let Some(existing) = notes.iter_mut().find(|note| note.id == id) {
                existing.merge(confirmed.clone());
            }
        });
        Ok(confirmed)
    }

    /// Delete remotely, then drop the local entry.
    pub async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.gateway.remove(id).await?;

        self.apply(|notes| notes.retain(|note| note.id != id));
        Ok(())
    }

    /// Re-fetch one note and merge it in, appending it if it was not cached.
    pub async fn refresh_note(&self, id: NoteId) -> Result<Note> {
        let note = self.gateway.get(id).await?;

        self.apply(|notes| upsert(notes, note.clone()));
        Ok(note)
    }

    fn apply(&self, mutate: impl FnOnce(&mut Vec<Note>)) {
        self.modify_open(|state| mutate(&mut state.notes));
    }

    /// Change the snapshot unless the store is closed. The flag is read under
    /// the channel's write lock, so nothing lands after `close` settles.
    fn modify_open(&self, modify: impl FnOnce(&mut StoreSnapshot)) {
        self.state.send_if_modified(|state| {
            if self.is_closed() {
                return false;
            }
            modify(state);
            true
        });
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("Note title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_changes(changes: &NoteChanges) -> Result<()> {
    if changes.is_empty() {
        return Err(Error::Validation("No note fields to update".to_string()));
    }
    changes.title.as_deref().map_or(Ok(()), validate_title)
}

fn upsert(notes: &mut Vec<Note>, note: Note) {
    match notes.iter_mut().find(|existing| existing.id == note.id) {
        Some(existing) => existing.merge(note),
        None => notes.push(note),
    }
}

fn dedupe_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut unique: Vec<Note> = Vec::with_capacity(notes.len());
    for note in notes {
        if unique.iter().any(|existing| existing.id == note.id) {
            tracing::warn!("Remote list repeated note {}; keeping the first", note.id);
            continue;
        }
        unique.push(note);
    }
    unique
}
