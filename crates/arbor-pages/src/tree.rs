//! The page tree.
//!
//! Pages are elements marked with the page attribute. A page nested inside
//! another page's element is that page's child, which is what makes routes
//! like `/settings~profile` possible.

use crate::dom::{Dom, NodeRef};
use crate::error::ConfigError;
use crate::settings::PagesSettings;
use arbor_urls::PageLookup;
use std::collections::{HashMap, HashSet};

/// A page in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
	id: String,
	title: String,
	parent: Option<String>,
	node: Option<NodeRef>,
	visible: bool,
}

impl PageNode {
	/// The page id.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Title template. `{}` placeholders are filled by
	/// [`Navigator::format_title`](crate::Navigator::format_title).
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Parent page id.
	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}

	/// Backing element, absent for trees built without a DOM.
	pub fn node(&self) -> Option<NodeRef> {
		self.node
	}

	/// Whether the page is shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}
}

/// All pages of an application, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
	nodes: Vec<PageNode>,
	index: HashMap<String, usize>,
}

impl PageTree {
	/// Discovers pages in `dom`.
	///
	/// Every element with `settings.page_attr` is a page, titled by
	/// `settings.title_attr`. Its parent is the closest ancestor element
	/// that is also a page.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::DuplicatePage`] if two elements share an id.
	pub fn from_dom<D: Dom + ?Sized>(dom: &D, settings: &PagesSettings) -> Result<Self, ConfigError> {
		let mut tree = Self::default();

		for node in dom.find_by_attr(&settings.page_attr) {
			let id = dom.attr(node, &settings.page_attr).unwrap_or_default();
			let title = dom.attr(node, &settings.title_attr).unwrap_or_default();

			let mut ancestor = dom.parent(node);
			let parent = loop {
				match ancestor {
					Some(a) => match dom.attr(a, &settings.page_attr) {
						Some(parent_id) => break Some(parent_id),
						None => ancestor = dom.parent(a),
					},
					None => break None,
				}
			};

			tree.insert(PageNode {
				id,
				title,
				parent,
				node: Some(node),
				visible: dom.is_visible(node),
			})?;
		}

		Ok(tree)
	}

	/// Starts a tree without a DOM.
	pub fn builder() -> PageTreeBuilder {
		PageTreeBuilder::default()
	}

	fn insert(&mut self, node: PageNode) -> Result<(), ConfigError> {
		if self.index.contains_key(&node.id) {
			return Err(ConfigError::DuplicatePage(node.id));
		}
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
		Ok(())
	}

	/// Looks up a page.
	pub fn get(&self, page_id: &str) -> Option<&PageNode> {
		self.index.get(page_id).map(|i| &self.nodes[*i])
	}

	/// Returns whether the page exists.
	pub fn contains(&self, page_id: &str) -> bool {
		self.index.contains_key(page_id)
	}

	/// Number of pages.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns whether the tree has no pages.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Iterates over pages in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &PageNode> {
		self.nodes.iter()
	}

	/// Ids from the root down to `page_id`. Empty for an unknown page.
	pub fn chain(&self, page_id: &str) -> Vec<String> {
		let mut chain = Vec::new();
		let mut current = self.get(page_id);

		while let Some(node) = current {
			// A cycle can only come from a hand-built tree that skipped `build`.
			if chain.len() > self.nodes.len() {
				break;
			}
			chain.push(node.id.clone());
			current = node.parent.as_deref().and_then(|p| self.get(p));
		}

		chain.reverse();
		chain
	}

	/// Number of ancestors of `page_id`.
	pub fn depth(&self, page_id: &str) -> usize {
		self.chain(page_id).len().saturating_sub(1)
	}

	/// Direct children of `page_id`.
	pub fn children(&self, page_id: &str) -> Vec<&PageNode> {
		self.nodes
			.iter()
			.filter(|n| n.parent.as_deref() == Some(page_id))
			.collect()
	}

	/// Pages without a parent.
	pub fn roots(&self) -> Vec<&PageNode> {
		self.nodes.iter().filter(|n| n.parent.is_none()).collect()
	}

	/// Ids of every visible page, in declaration order.
	pub fn visible_pages(&self) -> Vec<&str> {
		self.nodes
			.iter()
			.filter(|n| n.visible)
			.map(|n| n.id.as_str())
			.collect()
	}

	/// Returns whether `page_id` is shown.
	pub fn is_visible(&self, page_id: &str) -> bool {
		self.get(page_id).is_some_and(|n| n.visible)
	}

	pub(crate) fn set_visible(&mut self, page_id: &str, visible: bool) {
		if let Some(i) = self.index.get(page_id) {
			self.nodes[*i].visible = visible;
		}
	}

	/// Checks the visibility invariant: every visible page has a visible
	/// parent, and no two siblings (roots included) are visible together.
	pub fn check_invariant(&self) -> bool {
		let mut visible_per_parent: HashMap<Option<&str>, usize> = HashMap::new();

		for node in self.nodes.iter().filter(|n| n.visible) {
			if let Some(parent) = node.parent.as_deref()
				&& !self.is_visible(parent)
			{
				return false;
			}
			let count = visible_per_parent.entry(node.parent.as_deref()).or_default();
			*count += 1;
			if *count > 1 {
				return false;
			}
		}
		true
	}
}

impl PageLookup for PageTree {
	fn contains_page(&self, page_id: &str) -> bool {
		self.contains(page_id)
	}

	fn parent_of(&self, page_id: &str) -> Option<&str> {
		self.get(page_id)?.parent()
	}
}

/// Builds a [`PageTree`] without a DOM.
///
/// ```
/// use arbor_pages::PageTree;
///
/// let tree = PageTree::builder()
/// 	.page("home", "Home")
/// 	.page("settings", "Settings")
/// 	.child("profile", "Profile", "settings")
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!(tree.chain("profile"), vec!["settings", "profile"]);
/// ```
#[derive(Debug, Default)]
pub struct PageTreeBuilder {
	nodes: Vec<PageNode>,
	visible: Vec<String>,
}

impl PageTreeBuilder {
	/// Adds a root page.
	pub fn page(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
		self.nodes.push(PageNode {
			id: id.into(),
			title: title.into(),
			parent: None,
			node: None,
			visible: false,
		});
		self
	}

	/// Adds a page under `parent`. The parent may be declared later.
	pub fn child(
		mut self,
		id: impl Into<String>,
		title: impl Into<String>,
		parent: impl Into<String>,
	) -> Self {
		self.nodes.push(PageNode {
			id: id.into(),
			title: title.into(),
			parent: Some(parent.into()),
			node: None,
			visible: false,
		});
		self
	}

	/// Starts `id` visible.
	pub fn visible(mut self, id: impl Into<String>) -> Self {
		self.visible.push(id.into());
		self
	}

	/// Validates and builds the tree.
	///
	/// # Errors
	///
	/// - [`ConfigError::DuplicatePage`] for a repeated id
	/// - [`ConfigError::MissingElement`] for an undeclared parent or
	///   visible page
	/// - [`ConfigError::CyclicPageTree`] if a page is its own ancestor
	pub fn build(self) -> Result<PageTree, ConfigError> {
		let mut tree = PageTree::default();
		for node in self.nodes {
			tree.insert(node)?;
		}

		for node in &tree.nodes {
			if let Some(parent) = node.parent.as_deref()
				&& !tree.contains(parent)
			{
				return Err(ConfigError::MissingElement(parent.to_string()));
			}
		}

		for node in &tree.nodes {
			let mut seen = HashSet::new();
			let mut current = Some(node.id.as_str());
			while let Some(id) = current {
				if !seen.insert(id) {
					return Err(ConfigError::CyclicPageTree(node.id.clone()));
				}
				current = tree.parent_of(id);
			}
		}

		for id in self.visible {
			if !tree.contains(&id) {
				return Err(ConfigError::MissingElement(id));
			}
			tree.set_visible(&id, true);
		}

		Ok(tree)
	}
}
