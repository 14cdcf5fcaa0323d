#![forbid(unsafe_code)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for parsing identifiers from strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
	#[error("empty value")]
	Empty,
	#[error("invalid format: {0}")]
	InvalidFormat(String),
}

/// Server-issued notification key, stable across document updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
	/// Create a non-empty `NoteId`.
	pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
		let id = id.into();
		if id.trim().is_empty() {
			return Err(ParseIdError::Empty);
		}
		Ok(Self(id))
	}
	pub fn as_str(&self) -> &str {
		&self.0
	}
	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for NoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for NoteId {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		NoteId::new(s.to_string())
	}
}

/// Server-assigned notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
	Follow,
	Like,
	Comment,
	Automattcher,
	CommentLike,
	Reblog,
	Unknown,
}

impl NoteType {
	/// Stable wire string.
	pub const fn as_str(self) -> &'static str {
		match self {
			NoteType::Follow => "follow",
			NoteType::Like => "like",
			NoteType::Comment => "comment",
			NoteType::Automattcher => "automattcher",
			NoteType::CommentLike => "comment_like",
			NoteType::Reblog => "reblog",
			NoteType::Unknown => "unknown",
		}
	}

	/// Map a server-controlled type string; anything unrecognized is `Unknown`.
	pub fn from_wire(s: &str) -> Self {
		match s {
			"follow" => NoteType::Follow,
			"like" => NoteType::Like,
			"comment" => NoteType::Comment,
			"automattcher" => NoteType::Automattcher,
			"comment_like" => NoteType::CommentLike,
			"reblog" => NoteType::Reblog,
			_ => NoteType::Unknown,
		}
	}
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Moderation status derived for the comment a note points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
	Approved,
	Unapproved,
	Unknown,
}

impl CommentStatus {
	pub const fn as_str(self) -> &'static str {
		match self {
			CommentStatus::Approved => "approved",
			CommentStatus::Unapproved => "unapproved",
			CommentStatus::Unknown => "unknown",
		}
	}
}

impl fmt::Display for CommentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Capability flags enabled on a comment notification.
///
/// `approve` and `unapprove` are mutually exclusive; the single derivation
/// site maps one boolean wire flag onto exactly one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnabledActions {
	pub reply: bool,
	pub approve: bool,
	pub unapprove: bool,
	pub spam: bool,
	pub like: bool,
}

impl EnabledActions {
	pub const fn none() -> Self {
		Self {
			reply: false,
			approve: false,
			unapprove: false,
			spam: false,
			like: false,
		}
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::none()
	}

	/// Whether the user may approve or unapprove the comment.
	pub fn can_moderate(&self) -> bool {
		self.approve || self.unapprove
	}
}

/// Calendar bucket for list grouping, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTimeGroup {
	Today,
	Yesterday,
	OlderTwoDays,
	OlderWeek,
	OlderMonth,
}

/// A user reply to a note: REST target path plus the reply text.
///
/// Pure data transfer, submitting it is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
	pub rest_path: String,
	pub content: String,
}

impl Reply {
	pub fn new(rest_path: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			rest_path: rest_path.into(),
			content: content.into(),
		}
	}
}

/// Flat comment record reconstructed from a note document.
///
/// `post_title` and `author_email` are never present in the note payload and
/// stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	pub post_id: i64,
	pub comment_id: i64,
	pub author_name: String,
	pub published: String,
	pub text: String,
	pub status: String,
	pub post_title: String,
	pub author_url: String,
	pub author_email: String,
	pub profile_image_url: String,
}
