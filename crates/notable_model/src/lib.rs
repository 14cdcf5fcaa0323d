#![forbid(unsafe_code)]

//! Notification projection core: a raw server-pushed JSON document per note,
//! typed derived accessors over it, capability derivation for comment
//! moderation, calendar time grouping and the compact push-payload decoder.

pub mod actions;
pub mod note;
pub mod path;
pub mod push;
pub mod store;
pub mod time;

pub use actions::{derive_enabled_actions, find_comment_actions, has_liked_comment};
pub use note::Note;
pub use path::{PathError, PathExpr, Step};
pub use push::{PUSH_PAYLOAD_MAX_BYTES, note_from_push_payload};
pub use store::{NoteStore, StoreError};
pub use time::{time_group_at, time_group_for_timestamp};
