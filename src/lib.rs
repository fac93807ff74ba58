//! # Arbor
//!
//! A micro runtime for single-page applications built from nested pages.
//!
//! Pages are elements of the document. Navigating to a page shows it and
//! its ancestors, hides everything else, runs the page's handler and binds
//! the resulting view-model. Nested pages get routes like
//! `/settings~profile`, where `~` joins a parent route and a child segment.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - the full runtime from `arbor-pages`
//!
//! Without `pages`, only the route table from `arbor-urls` is available.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "pages")]
//! # {
//! use arbor::pages::{MemoryDom, MemoryHistory, PagesSettings, RecordingEngine, SpaApp};
//!
//! let mut dom = MemoryDom::new();
//! let body = dom.root();
//! dom.append(body, "section", &[("data-page", "home"), ("data-title", "Home")]);
//!
//! let mut app = SpaApp::new(
//! 	PagesSettings::default(),
//! 	dom,
//! 	MemoryHistory::new("/home"),
//! 	RecordingEngine::new(),
//! )
//! .unwrap();
//! app.register_pages([("/home", "home")]).unwrap();
//! app.start().unwrap();
//!
//! assert_eq!(app.navigator().current_title(), "Home");
//! # }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "pages")]
pub mod pages;
pub mod urls;

#[cfg(feature = "pages")]
pub use arbor_pages::{NavigationError, SpaApp, ViewModel};
pub use arbor_urls::{Recognized, RouteError, RouteTable};
