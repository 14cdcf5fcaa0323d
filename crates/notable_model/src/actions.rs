#![forbid(unsafe_code)]

use notable_domain::EnabledActions;
use serde_json::{Map, Value};

use crate::path;

// Wire-level action map keys.
pub const ACTION_KEY_REPLY: &str = "replyto-comment";
pub const ACTION_KEY_APPROVE: &str = "approve-comment";
pub const ACTION_KEY_SPAM: &str = "spam-comment";
pub const ACTION_KEY_LIKE: &str = "like-comment";

/// Locate the action map for `comment_id` in a body block list.
///
/// The first block of type `comment` whose `meta.ids.comment` equals the
/// target supplies the map. A non-object entry aborts the scan; malformed
/// data reads as "not found", it never errors.
pub fn find_comment_actions(body: &[Value], comment_id: i64) -> Option<&Map<String, Value>> {
	for block in body {
		if !block.is_object() {
			return None;
		}
		if path::query(block, "type").and_then(Value::as_str) == Some("comment")
			&& path::query_i64(block, "meta.ids.comment", 0) == comment_id
		{
			return path::query_object(block, "actions");
		}
	}
	None
}

/// Derive the capability set for `comment_id` from a body block list.
///
/// Keys translate 1:1 to flags, except `approve-comment`: a `true` value
/// means the comment is already approved and may be unapproved, anything
/// else under that key means it may be approved. Without the key, neither
/// flag is set.
pub fn derive_enabled_actions(body: &[Value], comment_id: i64) -> EnabledActions {
	let mut actions = EnabledActions::none();
	let Some(map) = find_comment_actions(body, comment_id) else {
		return actions;
	};
	if map.is_empty() {
		return actions;
	}

	if map.contains_key(ACTION_KEY_REPLY) {
		actions.reply = true;
	}
	if let Some(approve) = map.get(ACTION_KEY_APPROVE) {
		if approve.as_bool().unwrap_or(false) {
			actions.unapprove = true;
		} else {
			actions.approve = true;
		}
	}
	if map.contains_key(ACTION_KEY_SPAM) {
		actions.spam = true;
	}
	if map.contains_key(ACTION_KEY_LIKE) {
		actions.like = true;
	}

	actions
}

/// Whether the user has already liked the comment. Independent of the
/// capability set: the like key must be present *and* true.
pub fn has_liked_comment(body: &[Value], comment_id: i64) -> bool {
	find_comment_actions(body, comment_id)
		.and_then(|map| map.get(ACTION_KEY_LIKE))
		.and_then(Value::as_bool)
		.unwrap_or(false)
}
