#![forbid(unsafe_code)]

pub mod text {
	/// Truncate to at most `max_chars` characters, always on a char boundary.
	pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
		match s.char_indices().nth(max_chars) {
			Some((idx, _)) => &s[..idx],
			None => s,
		}
	}

	/// Collapse an absent string to the empty string.
	pub fn not_null(value: Option<&str>) -> &str {
		value.unwrap_or("")
	}

	#[cfg(test)]
	mod tests {
		use super::*;

		#[test]
		fn truncate_shorter_input_is_identity() {
			assert_eq!(truncate_chars("hello", 10), "hello");
			assert_eq!(truncate_chars("hello", 5), "hello");
			assert_eq!(truncate_chars("", 3), "");
		}

		#[test]
		fn truncate_counts_characters_not_bytes() {
			assert_eq!(truncate_chars("héllo", 2), "hé");
			assert_eq!(truncate_chars("ααββ", 3), "ααβ");
		}

		#[test]
		fn truncate_never_splits_a_char() {
			let s = "日本語テキスト";
			let t = truncate_chars(s, 4);
			assert_eq!(t, "日本語テ");
			assert!(s.starts_with(t));
		}

		#[test]
		fn truncate_to_zero_is_empty() {
			assert_eq!(truncate_chars("abc", 0), "");
		}

		#[test]
		fn not_null_defaults_to_empty() {
			assert_eq!(not_null(None), "");
			assert_eq!(not_null(Some("approved")), "approved");
		}
	}
}
