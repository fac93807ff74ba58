//! History boundary.
//!
//! [`MemoryHistory`] keeps an entry stack for native builds and tests, and
//! `BrowserHistory` drives `window.history` on `wasm32`.

mod memory;
#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHistory, setup_popstate_listener};
pub use memory::MemoryHistory;

/// How a navigation was triggered, which decides the history update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKind {
	/// Link click or programmatic navigation. Pushes an entry.
	Push,
	/// Initial load. Replaces the current entry.
	Replace,
	/// Back or forward. History already moved, so nothing is written.
	Pop,
}

/// The session history operations the navigator relies on.
///
/// Implementations report their own failures; a navigation never rolls
/// back because the address bar could not be updated.
pub trait History {
	/// Adds an entry for `path`.
	fn push_state(&mut self, title: &str, path: &str);

	/// Overwrites the current entry with `path`.
	fn replace_state(&mut self, title: &str, path: &str);

	/// Path of the current entry, query and fragment included.
	fn current_path(&self) -> String;

	/// Leaves the application for `url`.
	fn redirect_to(&mut self, url: &str);
}
