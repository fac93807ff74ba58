//! Minimal show/hide operations between two active pages.

use crate::dom::Dom;
use crate::error_log;
use crate::tree::PageTree;
use std::collections::HashSet;

/// The pages to hide and show for one navigation.
///
/// `hide` is ordered leaf-first and `show` root-first, and each list only
/// holds pages whose state actually changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDelta {
	hide: Vec<String>,
	show: Vec<String>,
}

impl VisibilityDelta {
	/// Computes the delta for activating `next` after `prev`.
	///
	/// The divergent part of the previous chain is hidden first, leaf
	/// upwards. Any other visible page off the next chain goes next,
	/// deepest first; this covers siblings left visible under an ancestor
	/// that is about to be revealed. Finally every hidden page on the next
	/// chain is shown from the root down.
	pub fn compute(tree: &PageTree, prev: Option<&str>, next: &str) -> Self {
		let next_chain = tree.chain(next);
		let keep: HashSet<&str> = next_chain.iter().map(String::as_str).collect();

		let mut hide: Vec<String> = Vec::new();
		if let Some(prev) = prev {
			for id in tree.chain(prev).into_iter().rev() {
				if !keep.contains(id.as_str()) && tree.is_visible(&id) {
					hide.push(id);
				}
			}
		}

		let mut stray: Vec<&str> = tree
			.visible_pages()
			.into_iter()
			.filter(|id| !keep.contains(id) && !hide.iter().any(|h| h == id))
			.collect();
		stray.sort_by_key(|id| std::cmp::Reverse(tree.depth(id)));
		hide.extend(stray.into_iter().map(str::to_string));

		let show = next_chain
			.into_iter()
			.filter(|id| !tree.is_visible(id))
			.collect();

		Self { hide, show }
	}

	/// Pages to hide, leaf-first.
	pub fn hidden(&self) -> &[String] {
		&self.hide
	}

	/// Pages to show, root-first.
	pub fn shown(&self) -> &[String] {
		&self.show
	}

	/// Returns whether nothing changes.
	pub fn is_empty(&self) -> bool {
		self.hide.is_empty() && self.show.is_empty()
	}

	/// Applies the delta to the tree and its elements.
	///
	/// Every operation is attempted. A DOM failure is logged and the tree
	/// still records the new state.
	pub fn apply<D: Dom + ?Sized>(&self, tree: &mut PageTree, dom: &mut D) {
		let ops = self
			.hide
			.iter()
			.map(|id| (id, false))
			.chain(self.show.iter().map(|id| (id, true)));

		for (id, visible) in ops {
			tree.set_visible(id, visible);
			let Some(node) = tree.get(id).and_then(|n| n.node()) else {
				continue;
			};
			if let Err(e) = dom.set_visible(node, visible) {
				error_log!("Failed to set visibility of page {}: {}", id, e);
			}
		}
	}
}
