#![forbid(unsafe_code)]

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use flate2::{Decompress, FlushDecompress};
use notable_domain::NoteId;
use serde_json::Value;
use tracing::error;

use crate::note::Note;

/// Maximum decompressed size of a push-notification payload. Output beyond
/// the ceiling is dropped as truncation, not reported as an error.
pub const PUSH_PAYLOAD_MAX_BYTES: usize = 4096;

/// Build a note from a base64-encoded, deflate-compressed push payload.
///
/// Push payloads may legitimately arrive malformed or truncated; any stage
/// failure is logged and collapses to `None`, nothing reaches the caller.
pub fn note_from_push_payload(id: NoteId, payload: &str) -> Option<Note> {
	match decode_push_payload(payload) {
		Ok(doc) => Some(Note::new(id, doc)),
		Err(err) => {
			error!(note_id = %id, error = %format!("{err:#}"), "discarding undecodable push payload");
			None
		}
	}
}

fn decode_push_payload(payload: &str) -> anyhow::Result<Value> {
	let compressed = BASE64_STANDARD.decode(payload.trim()).context("base64 decode")?;

	let mut inflated = vec![0u8; PUSH_PAYLOAD_MAX_BYTES];
	let mut inflater = Decompress::new(true);
	inflater
		.decompress(&compressed, &mut inflated, FlushDecompress::Finish)
		.context("inflate")?;
	let len = usize::try_from(inflater.total_out()).unwrap_or(PUSH_PAYLOAD_MAX_BYTES);

	let text = std::str::from_utf8(&inflated[..len]).context("utf-8 decode")?;
	let parsed: Value = serde_json::from_str(text).context("json parse")?;
	Ok(unwrap_notes_envelope(parsed))
}

/// A `{ "notes": [doc] }` envelope with exactly one element unwraps to that
/// element; any other shape is used as the document directly.
fn unwrap_notes_envelope(parsed: Value) -> Value {
	match parsed {
		Value::Object(mut map) => {
			let single = matches!(map.get("notes"), Some(Value::Array(notes)) if notes.len() == 1);
			if single {
				if let Some(Value::Array(mut notes)) = map.remove("notes") {
					return notes.remove(0);
				}
			}
			Value::Object(map)
		}
		other => other,
	}
}
