#![forbid(unsafe_code)]

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
	#[error("empty segment in path {0:?}")]
	EmptySegment(String),
	#[error("invalid index {index:?} in path {path:?}")]
	InvalidIndex { path: String, index: String },
	#[error("unterminated index in path {0:?}")]
	UnterminatedIndex(String),
	#[error("trailing characters after index in path {0:?}")]
	TrailingInput(String),
}

/// One traversal step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	Key(String),
	Index(usize),
	Last,
}

/// Parsed form of a dotted/indexed path like `meta.ids.comment`,
/// `subject[0].ranges` or `body[last].text`.
///
/// This is the single extraction primitive for the note document; every
/// derived field resolves through it instead of hand-rolling traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
	steps: Vec<Step>,
}

impl PathExpr {
	/// Parse a path expression. `last` inside brackets addresses the final
	/// element of the list at that point.
	pub fn parse(path: &str) -> Result<Self, PathError> {
		let mut steps = Vec::new();
		for segment in path.split('.') {
			let (name, mut rest) = match segment.find('[') {
				Some(pos) => (&segment[..pos], &segment[pos..]),
				None => (segment, ""),
			};
			if name.is_empty() {
				return Err(PathError::EmptySegment(path.to_string()));
			}
			steps.push(Step::Key(name.to_string()));

			while let Some(stripped) = rest.strip_prefix('[') {
				let Some(end) = stripped.find(']') else {
					return Err(PathError::UnterminatedIndex(path.to_string()));
				};
				let literal = &stripped[..end];
				if literal == "last" {
					steps.push(Step::Last);
				} else {
					let index = literal.parse::<usize>().map_err(|_| PathError::InvalidIndex {
						path: path.to_string(),
						index: literal.to_string(),
					})?;
					steps.push(Step::Index(index));
				}
				rest = &stripped[end + 1..];
			}
			if !rest.is_empty() {
				return Err(PathError::TrailingInput(path.to_string()));
			}
		}
		Ok(Self { steps })
	}

	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	/// Resolve against a document. Any missing key, wrong container type or
	/// out-of-range index yields `None`.
	pub fn eval<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
		let mut cur = doc;
		for step in &self.steps {
			cur = match step {
				Step::Key(name) => cur.as_object()?.get(name)?,
				Step::Index(i) => cur.as_array()?.get(*i)?,
				Step::Last => cur.as_array()?.last()?,
			};
		}
		Some(cur)
	}
}

/// Parse-and-resolve convenience. A malformed path reads as "absent"; the
/// paths in this crate are compile-time constants, so that case never fires
/// outside of tests.
pub fn query<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
	PathExpr::parse(path).ok()?.eval(doc)
}

/// String at `path`, or `default` when absent or not a string.
pub fn query_str(doc: &Value, path: &str, default: &str) -> String {
	query(doc, path)
		.and_then(Value::as_str)
		.unwrap_or(default)
		.to_string()
}

/// Integer at `path`, or `default`. JSON floats and numeric strings do not
/// coerce.
pub fn query_i64(doc: &Value, path: &str, default: i64) -> i64 {
	query(doc, path).and_then(Value::as_i64).unwrap_or(default)
}

/// Boolean at `path`, or `default`.
pub fn query_bool(doc: &Value, path: &str, default: bool) -> bool {
	query(doc, path).and_then(Value::as_bool).unwrap_or(default)
}

/// List at `path`, or `None` when absent or not a list.
pub fn query_array<'a>(doc: &'a Value, path: &str) -> Option<&'a [Value]> {
	query(doc, path).and_then(Value::as_array).map(Vec::as_slice)
}

/// Object at `path`, or `None` when absent or not an object.
pub fn query_object<'a>(doc: &'a Value, path: &str) -> Option<&'a serde_json::Map<String, Value>> {
	query(doc, path).and_then(Value::as_object)
}
