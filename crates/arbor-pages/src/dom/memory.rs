use super::{Dom, NodeRef};
use crate::error::DomError;

#[derive(Debug, Clone)]
struct Element {
	tag: String,
	attrs: Vec<(String, String)>,
	parent: Option<usize>,
	children: Vec<usize>,
	html: String,
	hidden: bool,
}

/// An in-memory element tree.
///
/// Node 0 is the `<body>` root. Elements are appended with
/// [`append`](Self::append), and inner markup is kept as an opaque string.
///
/// ```
/// use arbor_pages::{Dom, MemoryDom};
///
/// let mut dom = MemoryDom::new();
/// let body = dom.root();
/// let home = dom.append(body, "div", &[("data-page", "home"), ("data-title", "Home")]);
///
/// assert_eq!(dom.find_by_attr("data-page"), vec![home]);
/// assert_eq!(dom.attr(home, "data-title").as_deref(), Some("Home"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDom {
	elements: Vec<Element>,
	title: String,
}

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDom {
	/// Creates a document holding only `<body>`.
	pub fn new() -> Self {
		Self {
			elements: vec![Element {
				tag: "body".to_string(),
				attrs: Vec::new(),
				parent: None,
				children: Vec::new(),
				html: String::new(),
				hidden: false,
			}],
			title: String::new(),
		}
	}

	/// The `<body>` element.
	pub fn root(&self) -> NodeRef {
		NodeRef::new(0)
	}

	/// Appends a child element. A `hidden` attribute starts it hidden.
	///
	/// # Panics
	///
	/// Panics if `parent` was not issued by this document.
	pub fn append(&mut self, parent: NodeRef, tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
		let index = self.elements.len();
		let attrs: Vec<(String, String)> = attrs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		let hidden = attrs.iter().any(|(k, _)| k == "hidden");

		self.elements[parent.index()].children.push(index);
		self.elements.push(Element {
			tag: tag.to_ascii_lowercase(),
			attrs,
			parent: Some(parent.index()),
			children: Vec::new(),
			html: String::new(),
			hidden,
		});
		NodeRef::new(index)
	}

	/// Replaces the inner markup of an element.
	pub fn set_inner_html(&mut self, node: NodeRef, html: &str) -> Result<(), DomError> {
		self.element_mut(node)?.html = html.to_string();
		Ok(())
	}

	/// Sets or replaces an attribute.
	pub fn set_attr(&mut self, node: NodeRef, name: &str, value: &str) -> Result<(), DomError> {
		let element = self.element_mut(node)?;
		match element.attrs.iter_mut().find(|(k, _)| k == name) {
			Some((_, v)) => *v = value.to_string(),
			None => element.attrs.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	/// The current document title.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Every visible element carrying attribute `name`, in document order.
	pub fn visible_with_attr(&self, name: &str) -> Vec<String> {
		self.find_by_attr(name)
			.into_iter()
			.filter(|node| self.is_visible(*node))
			.filter_map(|node| self.attr(node, name))
			.collect()
	}

	fn element(&self, node: NodeRef) -> Option<&Element> {
		self.elements.get(node.index())
	}

	fn element_mut(&mut self, node: NodeRef) -> Result<&mut Element, DomError> {
		self.elements
			.get_mut(node.index())
			.ok_or(DomError::NodeNotFound(node.index()))
	}

	fn document_order(&self) -> Vec<usize> {
		let mut order = Vec::with_capacity(self.elements.len());
		let mut stack = vec![0];
		while let Some(index) = stack.pop() {
			order.push(index);
			stack.extend(self.elements[index].children.iter().rev());
		}
		order
	}
}

impl Dom for MemoryDom {
	fn find_by_attr(&self, name: &str) -> Vec<NodeRef> {
		self.document_order()
			.into_iter()
			.filter(|i| self.elements[*i].attrs.iter().any(|(k, _)| k == name))
			.map(NodeRef::new)
			.collect()
	}

	fn find_by_id(&self, id: &str) -> Option<NodeRef> {
		self.document_order()
			.into_iter()
			.find(|i| self.elements[*i].attrs.iter().any(|(k, v)| k == "id" && v == id))
			.map(NodeRef::new)
	}

	fn find_by_tag(&self, tag: &str) -> Vec<NodeRef> {
		self.document_order()
			.into_iter()
			.filter(|i| self.elements[*i].tag.eq_ignore_ascii_case(tag))
			.map(NodeRef::new)
			.collect()
	}

	fn attr(&self, node: NodeRef, name: &str) -> Option<String> {
		self.element(node)?
			.attrs
			.iter()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.clone())
	}

	fn tag_name(&self, node: NodeRef) -> String {
		self.element(node).map(|e| e.tag.clone()).unwrap_or_default()
	}

	fn parent(&self, node: NodeRef) -> Option<NodeRef> {
		self.element(node)?.parent.map(NodeRef::new)
	}

	fn is_visible(&self, node: NodeRef) -> bool {
		self.element(node).is_some_and(|e| !e.hidden)
	}

	fn set_visible(&mut self, node: NodeRef, visible: bool) -> Result<(), DomError> {
		self.element_mut(node)?.hidden = !visible;
		Ok(())
	}

	fn inner_html(&self, node: NodeRef) -> Result<String, DomError> {
		self.element(node)
			.map(|e| e.html.clone())
			.ok_or(DomError::NodeNotFound(node.index()))
	}

	fn append_html(&mut self, node: NodeRef, html: &str) -> Result<(), DomError> {
		self.element_mut(node)?.html.push_str(html);
		Ok(())
	}

	fn set_title(&mut self, title: &str) {
		self.title = title.to_string();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn dom() -> MemoryDom {
		let mut dom = MemoryDom::new();
		let body = dom.root();
		let settings = dom.append(body, "section", &[("data-page", "settings")]);
		dom.append(settings, "div", &[("data-page", "profile"), ("hidden", "")]);
		dom.append(body, "section", &[("data-page", "home"), ("id", "main")]);
		dom
	}

	#[rstest]
	fn test_find_by_attr_in_document_order(dom: MemoryDom) {
		let ids: Vec<_> = dom
			.find_by_attr("data-page")
			.into_iter()
			.filter_map(|n| dom.attr(n, "data-page"))
			.collect();
		assert_eq!(ids, vec!["settings", "profile", "home"]);
	}

	#[rstest]
	fn test_parent_and_tag(dom: MemoryDom) {
		let profile = dom.find_by_attr("data-page")[1];
		let settings = dom.parent(profile).unwrap();
		assert_eq!(dom.attr(settings, "data-page").as_deref(), Some("settings"));
		assert_eq!(dom.tag_name(settings), "section");
		assert_eq!(dom.parent(settings), Some(dom.root()));
		assert_eq!(dom.parent(dom.root()), None);
	}

	#[rstest]
	fn test_hidden_attribute_and_set_visible(mut dom: MemoryDom) {
		let profile = dom.find_by_attr("data-page")[1];
		assert!(!dom.is_visible(profile));

		dom.set_visible(profile, true).unwrap();
		assert!(dom.is_visible(profile));
		assert_eq!(dom.visible_with_attr("data-page"), vec!["settings", "profile", "home"]);
	}

	#[rstest]
	fn test_find_by_id_and_tag(mut dom: MemoryDom) {
		let main = dom.find_by_id("main").unwrap();
		assert_eq!(dom.attr(main, "data-page").as_deref(), Some("home"));
		assert_eq!(dom.find_by_id("missing"), None);

		let body = dom.root();
		dom.append(body, "UserCard", &[]);
		assert_eq!(dom.find_by_tag("usercard").len(), 1);
		assert_eq!(dom.find_by_tag("USERCARD").len(), 1);
	}

	#[rstest]
	fn test_markup_and_title(mut dom: MemoryDom) {
		let main = dom.find_by_id("main").unwrap();
		dom.set_inner_html(main, "<p>a</p>").unwrap();
		dom.append_html(main, "<p>b</p>").unwrap();
		assert_eq!(dom.inner_html(main).unwrap(), "<p>a</p><p>b</p>");

		dom.set_title("Home");
		assert_eq!(dom.title(), "Home");
	}

	#[rstest]
	fn test_unknown_node(mut dom: MemoryDom) {
		let ghost = NodeRef::new(99);
		assert_eq!(dom.set_visible(ghost, true), Err(DomError::NodeNotFound(99)));
		assert!(dom.inner_html(ghost).is_err());
		assert!(!dom.is_visible(ghost));
		assert_eq!(dom.tag_name(ghost), "");
	}
}
