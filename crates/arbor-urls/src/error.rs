//! Error types for route registration.

/// Errors raised while building the route table.
///
/// All of these are configuration errors: they are raised synchronously
/// during application setup and are never recovered automatically.
/// A route miss at navigation time is not an error, see
/// [`Recognized::NoMatch`](crate::Recognized::NoMatch).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
	/// The page id, or the route it resolves to, is already registered.
	#[error("Page \"{page_id}\" cannot be registered at \"{path}\": {reason}")]
	DuplicatePage {
		/// The page being registered.
		page_id: String,
		/// The route it was registered at.
		path: String,
		/// What collided.
		reason: String,
	},

	/// No page node with this id exists in the page tree.
	#[error("No page element with id \"{0}\" exists")]
	MissingElement(String),

	/// The page is its own ancestor.
	#[error("Page \"{0}\" is its own ancestor")]
	CyclicPageTree(String),

	/// A nested page was registered before its parent got a route.
	#[error("Parent page \"{parent}\" of \"{page_id}\" has no registered route")]
	UnroutedParent {
		/// The nested page.
		page_id: String,
		/// Its parent page.
		parent: String,
	},

	/// A pattern route failed to compile.
	#[error("Invalid route pattern \"{pattern}\": {reason}")]
	InvalidPattern {
		/// The pattern string.
		pattern: String,
		/// Compiler message.
		reason: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_route_error_display() {
		assert_eq!(
			RouteError::MissingElement("home".to_string()).to_string(),
			"No page element with id \"home\" exists"
		);
		assert_eq!(
			RouteError::CyclicPageTree("a".to_string()).to_string(),
			"Page \"a\" is its own ancestor"
		);
	}

	#[rstest]
	fn test_duplicate_page_display() {
		let err = RouteError::DuplicatePage {
			page_id: "profile".to_string(),
			path: "/settings~profile".to_string(),
			reason: "route already taken by \"other\"".to_string(),
		};
		let msg = err.to_string();
		assert!(msg.contains("profile"));
		assert!(msg.contains("/settings~profile"));
		assert!(msg.contains("already taken"));
	}
}
