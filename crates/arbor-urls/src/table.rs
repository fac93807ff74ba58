//! Route table.
//!
//! Associates routes with page identifiers. Nested pages get a route built
//! from their parent's route, a nested separator and their own local
//! segment, so `/settings` + `profile` becomes `/settings~profile`. The
//! separator is distinct from `/` so nested routes never collide with flat
//! sibling routes.

use crate::error::RouteError;
use crate::normalize::full_path;
use crate::recognizer::{ExactRecognizer, RouteRecognizer};
use std::collections::{HashMap, HashSet};

/// Default separator between a parent route and a nested segment.
pub const NESTED_SEPARATOR: &str = "~";

/// Read-only view of the page hierarchy needed to register routes.
pub trait PageLookup {
	/// Returns true when a page node with this id exists.
	fn contains_page(&self, page_id: &str) -> bool;

	/// Returns the parent page of `page_id`, if it is nested.
	fn parent_of(&self, page_id: &str) -> Option<&str>;
}

impl PageLookup for HashMap<String, Option<String>> {
	fn contains_page(&self, page_id: &str) -> bool {
		self.contains_key(page_id)
	}

	fn parent_of(&self, page_id: &str) -> Option<&str> {
		self.get(page_id).and_then(|p| p.as_deref())
	}
}

/// What a route leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
	/// A page node.
	Page(String),
	/// Another app-relative path.
	Redirect(String),
}

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
	path: String,
	target: RouteTarget,
}

impl RouteEntry {
	/// Returns the route path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the route target.
	pub fn target(&self) -> &RouteTarget {
		&self.target
	}

	/// Returns the page id when this route leads to a page.
	pub fn page_id(&self) -> Option<&str> {
		match &self.target {
			RouteTarget::Page(id) => Some(id),
			RouteTarget::Redirect(_) => None,
		}
	}
}

/// Outcome of matching a path.
///
/// A miss is an ordinary value: callers branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized {
	/// The path belongs to this page.
	Page(String),
	/// The path redirects to another app-relative path.
	Redirect(String),
	/// Nothing registered matches.
	NoMatch,
}

/// The route table.
pub struct RouteTable {
	entries: Vec<RouteEntry>,
	by_page: HashMap<String, usize>,
	by_path: HashMap<String, usize>,
	recognizer: Box<dyn RouteRecognizer>,
	separator: String,
}

impl std::fmt::Debug for RouteTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteTable")
			.field("entries", &self.entries)
			.field("separator", &self.separator)
			.finish()
	}
}

impl Default for RouteTable {
	fn default() -> Self {
		Self::new()
	}
}

impl RouteTable {
	/// Creates a table with exact matching and the default separator.
	pub fn new() -> Self {
		Self::with_recognizer(Box::new(ExactRecognizer::new()))
	}

	/// Creates a table that delegates matching to `recognizer`.
	pub fn with_recognizer(recognizer: Box<dyn RouteRecognizer>) -> Self {
		Self {
			entries: Vec::new(),
			by_page: HashMap::new(),
			by_path: HashMap::new(),
			recognizer,
			separator: NESTED_SEPARATOR.to_string(),
		}
	}

	/// Sets the nested separator.
	pub fn separator(mut self, separator: impl Into<String>) -> Self {
		self.separator = separator.into();
		self
	}

	/// Returns the nested separator.
	pub fn nested_separator(&self) -> &str {
		&self.separator
	}

	/// Registers `path` for `page_id`.
	///
	/// # Errors
	///
	/// - [`RouteError::DuplicatePage`] if the page already has a route or the
	///   path is taken
	/// - [`RouteError::MissingElement`] if `pages` has no such page
	pub fn add<P: PageLookup + ?Sized>(
		&mut self,
		path: &str,
		page_id: &str,
		pages: &P,
	) -> Result<(), RouteError> {
		if let Some(&idx) = self.by_page.get(page_id) {
			return Err(RouteError::DuplicatePage {
				page_id: page_id.to_string(),
				path: path.to_string(),
				reason: format!("page already registered at \"{}\"", self.entries[idx].path),
			});
		}
		self.check_path_free(path, page_id)?;

		if !pages.contains_page(page_id) {
			return Err(RouteError::MissingElement(page_id.to_string()));
		}

		let idx = self.push(path, RouteTarget::Page(page_id.to_string()))?;
		self.by_page.insert(page_id.to_string(), idx);
		Ok(())
	}

	/// Registers a redirect from `path` to another app-relative path.
	pub fn add_redirect(&mut self, path: &str, target: &str) -> Result<(), RouteError> {
		self.check_path_free(path, target)?;
		self.push(path, RouteTarget::Redirect(target.to_string()))?;
		Ok(())
	}

	/// Computes the route of `page_id` from its local segment.
	///
	/// Root pages route at `/segment`. Nested pages route at
	/// `parent_route + separator + segment`.
	///
	/// # Errors
	///
	/// - [`RouteError::MissingElement`] if the page is unknown
	/// - [`RouteError::CyclicPageTree`] if the page's ancestry loops
	/// - [`RouteError::UnroutedParent`] if the parent has no route yet
	pub fn resolve_nested_path<P: PageLookup + ?Sized>(
		&self,
		page_id: &str,
		local_segment: &str,
		pages: &P,
	) -> Result<String, RouteError> {
		if !pages.contains_page(page_id) {
			return Err(RouteError::MissingElement(page_id.to_string()));
		}
		check_acyclic(page_id, pages)?;

		match pages.parent_of(page_id) {
			None => {
				if local_segment.starts_with('/') {
					Ok(local_segment.to_string())
				} else {
					Ok(format!("/{}", local_segment))
				}
			}
			Some(parent) => {
				let parent_route =
					self.route_of(parent)
						.ok_or_else(|| RouteError::UnroutedParent {
							page_id: page_id.to_string(),
							parent: parent.to_string(),
						})?;
				Ok(format!(
					"{}{}{}",
					parent_route,
					self.separator,
					local_segment.trim_start_matches('/')
				))
			}
		}
	}

	/// Resolves the nested route of `page_id` and registers it.
	///
	/// Returns the resolved route.
	pub fn register_page<P: PageLookup + ?Sized>(
		&mut self,
		local_segment: &str,
		page_id: &str,
		pages: &P,
	) -> Result<String, RouteError> {
		let path = self.resolve_nested_path(page_id, local_segment, pages)?;
		self.add(&path, page_id, pages)?;
		Ok(path)
	}

	/// Matches `path` against the registered routes. The first match wins.
	pub fn recognize(&self, path: &str) -> Recognized {
		match self.recognizer.recognize(path).first() {
			Some(&idx) => match &self.entries[idx].target {
				RouteTarget::Page(id) => Recognized::Page(id.clone()),
				RouteTarget::Redirect(to) => Recognized::Redirect(to.clone()),
			},
			None => Recognized::NoMatch,
		}
	}

	/// Returns the route registered for `page_id`.
	pub fn route_of(&self, page_id: &str) -> Option<&str> {
		self.by_page
			.get(page_id)
			.map(|&idx| self.entries[idx].path.as_str())
	}

	/// Returns the full URL of `page_id` under `base_prefix`.
	pub fn page_url(&self, base_prefix: &str, page_id: &str) -> Option<String> {
		self.route_of(page_id)
			.map(|route| full_path(base_prefix, route))
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates routes in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
		self.entries.iter()
	}

	fn check_path_free(&self, path: &str, registering: &str) -> Result<(), RouteError> {
		if let Some(&idx) = self.by_path.get(path) {
			let taken_by = match &self.entries[idx].target {
				RouteTarget::Page(id) => format!("page \"{}\"", id),
				RouteTarget::Redirect(to) => format!("a redirect to \"{}\"", to),
			};
			return Err(RouteError::DuplicatePage {
				page_id: registering.to_string(),
				path: path.to_string(),
				reason: format!("route already taken by {}", taken_by),
			});
		}
		Ok(())
	}

	fn push(&mut self, path: &str, target: RouteTarget) -> Result<usize, RouteError> {
		let idx = self.entries.len();
		self.recognizer.add(path, idx)?;
		self.entries.push(RouteEntry {
			path: path.to_string(),
			target,
		});
		self.by_path.insert(path.to_string(), idx);
		Ok(idx)
	}
}

/// Walks the ancestry of `page_id`, failing on the first revisited node.
fn check_acyclic<P: PageLookup + ?Sized>(page_id: &str, pages: &P) -> Result<(), RouteError> {
	let mut seen = HashSet::new();
	let mut current = Some(page_id);

	while let Some(id) = current {
		if !seen.insert(id) {
			return Err(RouteError::CyclicPageTree(id.to_string()));
		}
		current = pages.parent_of(id);
	}

	Ok(())
}
