//! DOM boundary.
//!
//! The runtime never touches the document directly. Everything it needs
//! goes through the [`Dom`] trait: [`MemoryDom`] backs native builds and
//! tests, `WebDom` wraps the browser document on `wasm32`.

mod memory;
#[cfg(target_arch = "wasm32")]
pub(crate) mod web;

pub use memory::MemoryDom;
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

use crate::error::DomError;

/// Opaque handle to an element owned by a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

impl NodeRef {
	/// Wraps a raw index. Only meaningful to the `Dom` that issued it.
	pub const fn new(index: usize) -> Self {
		Self(index)
	}

	/// Returns the raw index.
	pub const fn index(self) -> usize {
		self.0
	}
}

/// The document operations the runtime relies on.
pub trait Dom {
	/// Elements carrying attribute `name`, in document order.
	fn find_by_attr(&self, name: &str) -> Vec<NodeRef>;

	/// The element with the given id.
	fn find_by_id(&self, id: &str) -> Option<NodeRef>;

	/// Elements with the given tag name, compared case-insensitively, in
	/// document order.
	fn find_by_tag(&self, tag: &str) -> Vec<NodeRef>;

	/// Value of attribute `name`.
	fn attr(&self, node: NodeRef, name: &str) -> Option<String>;

	/// Lowercase tag name.
	fn tag_name(&self, node: NodeRef) -> String;

	/// Parent element.
	fn parent(&self, node: NodeRef) -> Option<NodeRef>;

	/// Whether the element itself is shown.
	fn is_visible(&self, node: NodeRef) -> bool;

	/// Shows or hides the element.
	fn set_visible(&mut self, node: NodeRef, visible: bool) -> Result<(), DomError>;

	/// Inner markup of the element.
	fn inner_html(&self, node: NodeRef) -> Result<String, DomError>;

	/// Appends markup to the end of the element's content.
	fn append_html(&mut self, node: NodeRef, html: &str) -> Result<(), DomError>;

	/// Sets the document title.
	fn set_title(&mut self, title: &str);
}
