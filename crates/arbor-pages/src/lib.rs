//! Arbor Pages - nested page runtime for single-page applications
//!
//! Pages are elements of the document marked with `data-page`. Pages nest
//! inside other pages, and a nested page is reachable at its parent's route
//! plus `~` and its own segment. Navigating shows exactly the chain of pages
//! leading to the target and hides everything else.
//!
//! ## Architecture
//!
//! - [`tree`]: the page hierarchy discovered from the document
//! - [`visibility`]: minimal show/hide operations between two pages
//! - [`navigator`]: the navigation state machine and history updates
//! - [`handlers`]: per-page view-model producers
//! - [`elements`]: custom element definitions and their instances
//! - [`app`]: the setup surface tying it all together
//!
//! The document, the session history and the binding library are reached
//! through the [`Dom`], [`History`] and [`BindingEngine`] traits. In-memory
//! implementations back native builds and tests; `WebDom` and
//! `BrowserHistory` drive the browser on `wasm32`.
//!
//! ## Example
//!
//! ```
//! use arbor_pages::{MemoryDom, MemoryHistory, PagesSettings, RecordingEngine, SpaApp};
//!
//! let mut dom = MemoryDom::new();
//! let body = dom.root();
//! dom.append(body, "section", &[("data-page", "home")]);
//! let settings = dom.append(body, "section", &[("data-page", "settings"), ("hidden", "")]);
//! dom.append(settings, "div", &[("data-page", "profile"), ("hidden", "")]);
//!
//! let mut app = SpaApp::new(
//! 	PagesSettings::new().with_base_path("/app"),
//! 	dom,
//! 	MemoryHistory::new("/app/home"),
//! 	RecordingEngine::new(),
//! )
//! .unwrap();
//! app.register_pages([("/home", "home"), ("/settings", "settings"), ("profile", "profile")])
//! 	.unwrap();
//! app.start().unwrap();
//!
//! app.navigate("/app/settings~profile").unwrap();
//! assert_eq!(app.navigator().tree().visible_pages(), vec!["settings", "profile"]);
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod binding;
pub mod dom;
pub mod elements;
pub mod error;
pub mod handlers;
pub mod history;
pub mod logging;
pub mod model;
pub mod navigator;
pub mod settings;
pub mod tree;
pub mod visibility;

pub use app::SpaApp;
#[cfg(target_arch = "wasm32")]
pub use binding::MicrotaskScheduler;
pub use binding::{
	BindHandle, BindScheduler, Binding, BindingEngine, PendingBind, RecordingEngine, TaskQueue,
};
pub use dom::{Dom, MemoryDom, NodeRef};
#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
pub use elements::{ElementBinder, ElementTemplate, FORBIDDEN_ATTRIBUTES};
pub use error::{
	BindError, ConfigError, DomError, ElementError, HandlerError, ModelError, NavigationError,
	SettingsError, StartError,
};
pub use handlers::{HandlerRegistry, PageHandler};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, MemoryHistory, NavigationKind};
pub use model::ViewModel;
pub use navigator::{BindStatus, Navigation, Navigator, NavigatorPhase};
pub use settings::PagesSettings;
pub use tree::{PageNode, PageTree, PageTreeBuilder};
pub use visibility::VisibilityDelta;

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
