#![forbid(unsafe_code)]

use thiserror::Error;

use crate::note::Note;

/// Persistence failures surfaced by a [`NoteStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
	#[error("note store unavailable")]
	Unavailable,
	#[error("note store rejected save: {reason}")]
	Rejected { reason: String },
}

/// Injected persistence port for notes.
///
/// The projection talks to its owning store only through this seam: the
/// store builds notes from `(key, document)`, applies updated documents via
/// [`Note::replace_document`] and diffs via [`Note::diffable_value`]. The
/// projection itself only calls back in for [`save`](NoteStore::save) after
/// a local mutation, fire and forget.
pub trait NoteStore: Send + Sync {
	fn save(&self, note: &Note) -> Result<(), StoreError>;
}
