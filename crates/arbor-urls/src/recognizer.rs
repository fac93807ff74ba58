//! Route recognizers.
//!
//! The route table stores entries and delegates matching to a
//! [`RouteRecognizer`]. [`ExactRecognizer`] is the default and matches path
//! strings exactly. [`PatternRecognizer`] accepts `{name}` and `{name:*}`
//! segments for applications that want one page to answer a family of
//! paths. Neither extracts parameter values: a match only identifies the
//! target.

use crate::error::RouteError;
use std::collections::HashMap;

/// Maximum allowed length for a route pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20;

/// Matches paths to route targets.
///
/// Targets are opaque indices handed out by the route table.
pub trait RouteRecognizer: Send + Sync {
	/// Registers `path` for `target`.
	fn add(&mut self, path: &str, target: usize) -> Result<(), RouteError>;

	/// Returns every target whose route matches `path`, in registration order.
	fn recognize(&self, path: &str) -> Vec<usize>;
}

/// Exact string matching.
#[derive(Debug, Default, Clone)]
pub struct ExactRecognizer {
	routes: HashMap<String, usize>,
}

impl ExactRecognizer {
	/// Creates an empty recognizer.
	pub fn new() -> Self {
		Self::default()
	}
}

impl RouteRecognizer for ExactRecognizer {
	fn add(&mut self, path: &str, target: usize) -> Result<(), RouteError> {
		self.routes.insert(path.to_string(), target);
		Ok(())
	}

	fn recognize(&self, path: &str) -> Vec<usize> {
		self.routes.get(path).copied().into_iter().collect()
	}
}

/// A compiled route pattern.
///
/// - `{name}` matches one segment (no `/`)
/// - `{name:*}` matches the rest of the path, `/` included
/// - everything else is literal, nested separators included
#[derive(Debug, Clone)]
pub struct RoutePattern {
	pattern: String,
	regex: regex::Regex,
}

impl RoutePattern {
	/// Compiles a pattern.
	///
	/// # Errors
	///
	/// Returns [`RouteError::InvalidPattern`] if the pattern is too long, has
	/// too many segments, or compiles to an invalid regex.
	pub fn new(pattern: &str) -> Result<Self, RouteError> {
		let invalid = |reason: String| RouteError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"length {} exceeds maximum of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(format!(
				"{} path segments, exceeding maximum of {}",
				segment_count, MAX_PATH_SEGMENTS
			)));
		}

		let regex = regex::RegexBuilder::new(&Self::compile(pattern))
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
		})
	}

	fn compile(pattern: &str) -> String {
		let mut regex_str = String::from("^");
		let mut chars = pattern.chars();

		while let Some(c) = chars.next() {
			if c == '{' {
				let mut wildcard = false;
				for next in chars.by_ref() {
					match next {
						'}' => break,
						'*' => wildcard = true,
						_ => {}
					}
				}
				regex_str.push_str(if wildcard { "(?:.*)" } else { "(?:[^/]+)" });
			} else {
				regex_str.push_str(&regex::escape(&c.to_string()));
			}
		}

		regex_str.push('$');
		regex_str
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Checks whether `path` matches.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Returns whether the pattern has no placeholders.
	pub fn is_exact(&self) -> bool {
		!self.pattern.contains('{')
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Pattern matching in registration order.
#[derive(Debug, Default, Clone)]
pub struct PatternRecognizer {
	patterns: Vec<(RoutePattern, usize)>,
}

impl PatternRecognizer {
	/// Creates an empty recognizer.
	pub fn new() -> Self {
		Self::default()
	}
}

impl RouteRecognizer for PatternRecognizer {
	fn add(&mut self, path: &str, target: usize) -> Result<(), RouteError> {
		self.patterns.push((RoutePattern::new(path)?, target));
		Ok(())
	}

	fn recognize(&self, path: &str) -> Vec<usize> {
		self.patterns
			.iter()
			.filter(|(pattern, _)| pattern.is_match(path))
			.map(|(_, target)| *target)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_exact_recognizer() {
		let mut r = ExactRecognizer::new();
		r.add("/home", 0).unwrap();
		r.add("/settings~profile", 1).unwrap();

		assert_eq!(r.recognize("/home"), vec![0]);
		assert_eq!(r.recognize("/settings~profile"), vec![1]);
		assert!(r.recognize("/home/").is_empty());
	}

	#[rstest]
	fn test_exact_pattern() {
		let pattern = RoutePattern::new("/users/").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/users/"));
		assert!(!pattern.is_match("/users/123/"));
	}

	#[rstest]
	fn test_segment_placeholder() {
		let pattern = RoutePattern::new("/users/{id}/").unwrap();
		assert!(!pattern.is_exact());
		assert!(pattern.is_match("/users/42/"));
		assert!(!pattern.is_match("/users/"));
		assert!(!pattern.is_match("/users/4/2/"));
	}

	#[rstest]
	fn test_wildcard_placeholder() {
		let pattern = RoutePattern::new("/files/{path:*}").unwrap();
		assert!(pattern.is_match("/files/a/b/c.txt"));
	}

	#[rstest]
	fn test_special_chars_escaped() {
		let pattern = RoutePattern::new("/api/v1.0~docs").unwrap();
		assert!(pattern.is_match("/api/v1.0~docs"));
		assert!(!pattern.is_match("/api/v1X0~docs"));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_length() {
		let long_pattern = "/".to_string() + &"a".repeat(1025);
		assert!(matches!(
			RoutePattern::new(&long_pattern),
			Err(RouteError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}/", segments.join("/"));
		assert!(RoutePattern::new(&pattern).is_err());
	}

	#[rstest]
	fn test_pattern_recognizer_keeps_registration_order() {
		let mut r = PatternRecognizer::new();
		r.add("/users/{id}", 0).unwrap();
		r.add("/users/{rest:*}", 1).unwrap();

		assert_eq!(r.recognize("/users/7"), vec![0, 1]);
		assert_eq!(r.recognize("/users/7/edit"), vec![1]);
	}
}
