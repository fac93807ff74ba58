use super::History;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
	title: String,
	path: String,
}

/// An in-memory entry stack.
///
/// [`back`](Self::back) and [`forward`](Self::forward) move through the
/// stack the way the browser buttons do; the host then calls
/// `handle_pop_state` on the navigator.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	entries: Vec<Entry>,
	index: usize,
	redirects: Vec<String>,
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial_path`.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self {
			entries: vec![Entry {
				title: String::new(),
				path: initial_path.into(),
			}],
			index: 0,
			redirects: Vec::new(),
		}
	}

	/// Moves one entry back. Returns `false` at the first entry.
	pub fn back(&mut self) -> bool {
		if self.index == 0 {
			return false;
		}
		self.index -= 1;
		true
	}

	/// Moves one entry forward. Returns `false` at the last entry.
	pub fn forward(&mut self) -> bool {
		if self.index + 1 >= self.entries.len() {
			return false;
		}
		self.index += 1;
		true
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false; a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Paths of every entry, oldest first.
	pub fn paths(&self) -> Vec<&str> {
		self.entries.iter().map(|e| e.path.as_str()).collect()
	}

	/// Title recorded with the current entry.
	pub fn current_title(&self) -> &str {
		&self.entries[self.index].title
	}

	/// URLs passed to [`History::redirect_to`].
	pub fn redirects(&self) -> &[String] {
		&self.redirects
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl History for MemoryHistory {
	fn push_state(&mut self, title: &str, path: &str) {
		self.entries.truncate(self.index + 1);
		self.entries.push(Entry {
			title: title.to_string(),
			path: path.to_string(),
		});
		self.index = self.entries.len() - 1;
	}

	fn replace_state(&mut self, title: &str, path: &str) {
		self.entries[self.index] = Entry {
			title: title.to_string(),
			path: path.to_string(),
		};
	}

	fn current_path(&self) -> String {
		self.entries[self.index].path.clone()
	}

	fn redirect_to(&mut self, url: &str) {
		self.redirects.push(url.to_string());
	}
}
