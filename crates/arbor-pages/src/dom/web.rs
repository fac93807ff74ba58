use super::{Dom, NodeRef};
use crate::error::DomError;
use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// Message of a thrown JS error, or its debug form for non-`Error` values.
pub(crate) fn js_error_message(value: &JsValue) -> String {
	match value.dyn_ref::<js_sys::Error>() {
		Some(error) => String::from(error.message()),
		None => format!("{:?}", value),
	}
}

/// [`Dom`] over the browser document.
///
/// Elements are interned on first lookup so that a [`NodeRef`] stays
/// stable for the lifetime of the page.
pub struct WebDom {
	document: Document,
	nodes: RefCell<Vec<Element>>,
}

impl WebDom {
	/// Wraps the current window's document.
	///
	/// # Errors
	///
	/// Returns [`DomError::Operation`] outside a browser window.
	pub fn from_window() -> Result<Self, DomError> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| DomError::Operation("no document available".to_string()))?;
		Ok(Self::new(document))
	}

	/// Wraps `document`.
	pub fn new(document: Document) -> Self {
		Self {
			document,
			nodes: RefCell::new(Vec::new()),
		}
	}

	fn intern(&self, element: Element) -> NodeRef {
		let mut nodes = self.nodes.borrow_mut();
		if let Some(index) = nodes.iter().position(|n| n.is_same_node(Some(element.as_ref()))) {
			return NodeRef::new(index);
		}
		nodes.push(element);
		NodeRef::new(nodes.len() - 1)
	}

	fn element(&self, node: NodeRef) -> Result<Element, DomError> {
		self.nodes
			.borrow()
			.get(node.index())
			.cloned()
			.ok_or(DomError::NodeNotFound(node.index()))
	}

	fn query_all(&self, selector: &str) -> Vec<NodeRef> {
		let Ok(list) = self.document.query_selector_all(selector) else {
			return Vec::new();
		};
		(0..list.length())
			.filter_map(|i| list.item(i))
			.filter_map(|n| n.dyn_into::<Element>().ok())
			.map(|e| self.intern(e))
			.collect()
	}
}

impl Dom for WebDom {
	fn find_by_attr(&self, name: &str) -> Vec<NodeRef> {
		self.query_all(&format!("[{}]", name))
	}

	fn find_by_id(&self, id: &str) -> Option<NodeRef> {
		self.document.get_element_by_id(id).map(|e| self.intern(e))
	}

	fn find_by_tag(&self, tag: &str) -> Vec<NodeRef> {
		let collection = self.document.get_elements_by_tag_name(tag);
		(0..collection.length())
			.filter_map(|i| collection.item(i))
			.map(|e| self.intern(e))
			.collect()
	}

	fn attr(&self, node: NodeRef, name: &str) -> Option<String> {
		self.element(node).ok()?.get_attribute(name)
	}

	fn tag_name(&self, node: NodeRef) -> String {
		self.element(node)
			.map(|e| e.tag_name().to_lowercase())
			.unwrap_or_default()
	}

	fn parent(&self, node: NodeRef) -> Option<NodeRef> {
		let parent = self.element(node).ok()?.parent_element()?;
		Some(self.intern(parent))
	}

	fn is_visible(&self, node: NodeRef) -> bool {
		match self.element(node) {
			Ok(element) => match element.dyn_into::<HtmlElement>() {
				Ok(html) => !html.hidden(),
				Err(element) => !element.has_attribute("hidden"),
			},
			Err(_) => false,
		}
	}

	fn set_visible(&mut self, node: NodeRef, visible: bool) -> Result<(), DomError> {
		let element = self.element(node)?;
		match element.dyn_into::<HtmlElement>() {
			Ok(html) => html.set_hidden(!visible),
			Err(element) => {
				let result = if visible {
					element.remove_attribute("hidden")
				} else {
					element.set_attribute("hidden", "")
				};
				result.map_err(|e| DomError::Operation(js_error_message(&e)))?;
			}
		}
		Ok(())
	}

	fn inner_html(&self, node: NodeRef) -> Result<String, DomError> {
		Ok(self.element(node)?.inner_html())
	}

	fn append_html(&mut self, node: NodeRef, html: &str) -> Result<(), DomError> {
		self.element(node)?
			.insert_adjacent_html("beforeend", html)
			.map_err(|e| DomError::Operation(js_error_message(&e)))
	}

	fn set_title(&mut self, title: &str) {
		self.document.set_title(title);
	}
}
