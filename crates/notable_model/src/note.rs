#![forbid(unsafe_code)]

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat};
use notable_domain::{Comment, CommentStatus, EnabledActions, NoteId, NoteType, Reply};
use notable_util::text;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{error, warn};

use crate::store::NoteStore;
use crate::{actions, path};

/// Maximum character length for a comment preview.
const MAX_COMMENT_PREVIEW_LENGTH: usize = 200;

/// One server-pushed notification: an opaque key plus the raw JSON document
/// behind it, with all fields derived on read.
///
/// The document lives behind a single lock and is replaced wholesale on
/// sync updates. Readers clone the `Arc` under the lock and traverse the
/// immutable snapshot, so a concurrent replacement is observed entirely or
/// not at all.
pub struct Note {
	id: NoteId,
	doc: Mutex<Arc<Value>>,
	store: Mutex<Option<Arc<dyn NoteStore>>>,
	local_status: Mutex<Option<String>>,
}

impl Note {
	/// Create a note from a freshly received document.
	pub fn new(id: NoteId, doc: Value) -> Self {
		Self {
			id,
			doc: Mutex::new(Arc::new(doc)),
			store: Mutex::new(None),
			local_status: Mutex::new(None),
		}
	}

	/// Create a note already attached to its persistence port.
	pub fn with_store(id: NoteId, doc: Value, store: Arc<dyn NoteStore>) -> Self {
		let note = Self::new(id, doc);
		note.attach_store(store);
		note
	}

	pub fn id(&self) -> &NoteId {
		&self.id
	}

	/// Attach the persistence port used by [`mark_read`](Self::mark_read).
	pub fn attach_store(&self, store: Arc<dyn NoteStore>) {
		*self.store.lock() = Some(store);
	}

	fn snapshot(&self) -> Arc<Value> {
		self.doc.lock().clone()
	}

	/// Deep copy of the current document, for diffing by the owning store.
	pub fn diffable_value(&self) -> Value {
		(*self.snapshot()).clone()
	}

	/// Atomically swap in an updated document.
	pub fn replace_document(&self, doc: Value) {
		*self.doc.lock() = Arc::new(doc);
	}

	fn query_str(&self, path: &str, default: &str) -> String {
		path::query_str(&self.snapshot(), path, default)
	}

	fn query_i64(&self, path: &str, default: i64) -> i64 {
		path::query_i64(&self.snapshot(), path, default)
	}

	pub fn note_type(&self) -> NoteType {
		NoteType::from_wire(&self.query_str("type", NoteType::Unknown.as_str()))
	}

	fn is_type(&self, ty: NoteType) -> bool {
		self.note_type() == ty
	}

	pub fn is_automattcher_type(&self) -> bool {
		self.is_type(NoteType::Automattcher)
	}

	pub fn is_follow_type(&self) -> bool {
		self.is_type(NoteType::Follow)
	}

	pub fn is_like_type(&self) -> bool {
		self.is_type(NoteType::Like)
	}

	pub fn is_comment_like_type(&self) -> bool {
		self.is_type(NoteType::CommentLike)
	}

	pub fn is_reblog_type(&self) -> bool {
		self.is_type(NoteType::Reblog)
	}

	/// Comment semantics: literally a comment note, or an automattcher note
	/// carrying a real comment id.
	pub fn is_comment_type(&self) -> bool {
		let doc = self.snapshot();
		let ty = NoteType::from_wire(&path::query_str(&doc, "type", NoteType::Unknown.as_str()));
		ty == NoteType::Comment
			|| (ty == NoteType::Automattcher && path::query_i64(&doc, "meta.ids.comment", -1) != -1)
	}

	pub fn is_comment_reply_type(&self) -> bool {
		self.is_comment_type() && self.parent_comment_id() > 0
	}

	/// Whether the user has already replied to this comment note.
	pub fn is_comment_with_user_reply(&self) -> bool {
		self.is_comment_type() && !self.comment_subject_noticon().is_empty()
	}

	/// Whether the note renders as a user list (likes, follows, reblogs).
	pub fn is_user_list(&self) -> bool {
		matches!(
			self.note_type(),
			NoteType::Like | NoteType::CommentLike | NoteType::Follow | NoteType::Reblog
		)
	}

	/// Epoch seconds parsed from the ISO-8601 `timestamp` field, 0 when
	/// missing or malformed.
	pub fn timestamp(&self) -> i64 {
		timestamp_from_iso8601(&self.query_str("timestamp", ""))
	}

	pub fn site_id(&self) -> i64 {
		self.query_i64("meta.ids.site", 0)
	}

	pub fn post_id(&self) -> i64 {
		self.query_i64("meta.ids.post", 0)
	}

	pub fn comment_id(&self) -> i64 {
		self.query_i64("meta.ids.comment", 0)
	}

	pub fn parent_comment_id(&self) -> i64 {
		self.query_i64("meta.ids.parent_comment", 0)
	}

	pub fn comment_reply_id(&self) -> i64 {
		self.query_i64("meta.ids.reply_comment", 0)
	}

	pub fn is_read(&self) -> bool {
		self.query_i64("read", 0) == 1
	}

	pub fn is_unread(&self) -> bool {
		!self.is_read()
	}

	pub fn title(&self) -> String {
		self.query_str("title", "")
	}

	pub fn url(&self) -> String {
		self.query_str("url", "")
	}

	pub fn icon_url(&self) -> String {
		self.query_str("icon", "")
	}

	/// Character code for the notification glyph font.
	pub fn noticon_character(&self) -> String {
		self.query_str("noticon", "")
	}

	pub fn subject_text(&self) -> String {
		self.query_str("subject[0].text", "")
	}

	/// Comment excerpt from the second subject block, previewed to at most
	/// 199 characters.
	pub fn comment_subject(&self) -> String {
		let subject = self.query_str("subject[1].text", "");
		if subject.chars().count() > MAX_COMMENT_PREVIEW_LENGTH {
			text::truncate_chars(&subject, MAX_COMMENT_PREVIEW_LENGTH - 1).to_string()
		} else {
			subject
		}
	}

	/// Glyph attached to the subject line, e.g. the "replied" marker.
	pub fn comment_subject_noticon(&self) -> String {
		let doc = self.snapshot();
		let Some(ranges) = path::query_array(&doc, "subject[0].ranges") else {
			return String::new();
		};
		for range in ranges {
			let Some(range) = range.as_object() else {
				return String::new();
			};
			if range.get("type").and_then(Value::as_str) == Some("noticon") {
				return range.get("value").and_then(Value::as_str).unwrap_or_default().to_string();
			}
		}
		String::new()
	}

	/// Body block list, empty when absent.
	pub fn body(&self) -> Vec<Value> {
		path::query_array(&self.snapshot(), "body").map(<[Value]>::to_vec).unwrap_or_default()
	}

	/// Header block list, empty when absent.
	pub fn header(&self) -> Vec<Value> {
		path::query_array(&self.snapshot(), "header").map(<[Value]>::to_vec).unwrap_or_default()
	}

	/// Client-local status string, never part of the synced document.
	pub fn local_status(&self) -> String {
		let guard = self.local_status.lock();
		text::not_null(guard.as_deref()).to_string()
	}

	pub fn set_local_status(&self, status: impl Into<String>) {
		*self.local_status.lock() = Some(status.into());
	}

	/// Capability set for the comment this note points at, derived fresh
	/// from the current document on every call.
	pub fn enabled_actions(&self) -> EnabledActions {
		let doc = self.snapshot();
		let body = path::query_array(&doc, "body").unwrap_or(&[]);
		actions::derive_enabled_actions(body, path::query_i64(&doc, "meta.ids.comment", 0))
	}

	pub fn can_moderate(&self) -> bool {
		self.enabled_actions().can_moderate()
	}

	pub fn can_trash(&self) -> bool {
		self.can_moderate()
	}

	pub fn can_mark_as_spam(&self) -> bool {
		self.enabled_actions().spam
	}

	pub fn can_reply(&self) -> bool {
		self.enabled_actions().reply
	}

	pub fn can_like(&self) -> bool {
		self.enabled_actions().like
	}

	pub fn can_edit(&self, local_blog_id: i64) -> bool {
		local_blog_id > 0 && self.can_moderate()
	}

	pub fn has_liked_comment(&self) -> bool {
		let doc = self.snapshot();
		let body = path::query_array(&doc, "body").unwrap_or(&[]);
		actions::has_liked_comment(body, path::query_i64(&doc, "meta.ids.comment", 0))
	}

	pub fn comment_status(&self) -> CommentStatus {
		let actions = self.enabled_actions();
		if actions.unapprove {
			CommentStatus::Approved
		} else if actions.approve {
			CommentStatus::Unapproved
		} else {
			CommentStatus::Unknown
		}
	}

	/// Set the read flag and save through the attached store, if any. The
	/// in-memory flag sticks even when the save fails; the failure is only
	/// logged.
	pub fn mark_read(&self) {
		{
			let mut guard = self.doc.lock();
			match Arc::make_mut(&mut guard) {
				Value::Object(map) => {
					map.insert("read".to_string(), Value::from(1));
				}
				_ => {
					warn!(note_id = %self.id, "cannot mark non-object note document as read");
					return;
				}
			}
		}

		let store = self.store.lock().clone();
		if let Some(store) = store {
			if let Err(err) = store.save(self) {
				error!(note_id = %self.id, error = %err, "failed to persist read flag");
			}
		}
	}

	/// Build the REST reply target for this note, paired with the reply
	/// text. Comment-like notes reply to the comment, everything else to
	/// the post.
	pub fn build_reply(&self, content: impl Into<String>) -> Reply {
		let rest_path = if self.is_comment_type() {
			format!("sites/{}/comments/{}", self.site_id(), self.comment_id())
		} else {
			format!("sites/{}/posts/{}", self.site_id(), self.post_id())
		};
		Reply::new(format!("{rest_path}/replies/new"), content)
	}

	/// Reconstruct a comment record from the note's derived fields.
	pub fn build_comment(&self) -> Comment {
		Comment {
			post_id: self.post_id(),
			comment_id: self.comment_id(),
			author_name: self.comment_author_name(),
			published: iso8601_from_timestamp(self.timestamp()),
			text: self.comment_text().trim().to_string(),
			status: self.comment_status().as_str().to_string(),
			post_title: String::new(),
			author_url: self.comment_author_url(),
			author_email: String::new(),
			profile_image_url: self.icon_url(),
		}
	}

	/// Display name from the first `user` body block.
	pub fn comment_author_name(&self) -> String {
		let doc = self.snapshot();
		let body = path::query_array(&doc, "body").unwrap_or(&[]);
		first_user_block(body)
			.map(|block| path::query_str(block, "text", ""))
			.unwrap_or_default()
	}

	/// Home link from the first `user` body block.
	pub fn comment_author_url(&self) -> String {
		let doc = self.snapshot();
		let body = path::query_array(&doc, "body").unwrap_or(&[]);
		first_user_block(body)
			.map(|block| path::query_str(block, "meta.links.home", ""))
			.unwrap_or_default()
	}

	pub fn comment_text(&self) -> String {
		self.query_str("body[last].text", "")
	}
}

impl std::fmt::Debug for Note {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Note")
			.field("id", &self.id)
			.field("type", &self.note_type())
			.finish_non_exhaustive()
	}
}

fn first_user_block(body: &[Value]) -> Option<&Value> {
	for block in body {
		if !block.is_object() {
			return None;
		}
		if path::query(block, "type").and_then(Value::as_str) == Some("user") {
			return Some(block);
		}
	}
	None
}

fn timestamp_from_iso8601(s: &str) -> i64 {
	DateTime::parse_from_rfc3339(s).map(|dt| dt.timestamp()).unwrap_or(0)
}

fn iso8601_from_timestamp(timestamp: i64) -> String {
	DateTime::from_timestamp(timestamp, 0)
		.map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
		.unwrap_or_default()
}
