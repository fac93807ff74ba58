//! The navigator.
//!
//! A navigation moves through four phases:
//!
//! 1. `Resolving`: the path is normalized and recognized. One redirect hop
//!    is followed, and a miss falls back to the not-found page if one is
//!    configured.
//! 2. `Applying`: the visibility delta between the previous and the new
//!    page is computed and applied.
//! 3. `Bound`: the current page and document title are updated, the page
//!    handler runs once and its model is bound to the page element.
//! 4. `Idle`: history is pushed or replaced with the requested URL.
//!
//! Resolution errors are returned before anything changes. Once the delta
//! is applied the navigation completes; binding problems are reported in
//! the returned [`Navigation`].

use crate::binding::{BindHandle, BindingEngine};
use crate::dom::Dom;
use crate::error::{BindError, ConfigError, HandlerError, NavigationError};
use crate::handlers::HandlerRegistry;
use crate::history::{History, NavigationKind};
use crate::settings::PagesSettings;
use crate::tree::PageTree;
use crate::visibility::VisibilityDelta;
use crate::{debug_log, error_log, warn_log};
use arbor_urls::{Recognized, RouteTable, full_path, is_under_base, normalize};
use serde::Serialize;
use std::fmt::Display;

/// Where the navigator is in a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigatorPhase {
	/// Waiting for a navigation.
	#[default]
	Idle,
	/// Matching the path to a page.
	Resolving,
	/// Showing and hiding pages.
	Applying,
	/// Running the handler and binding its model.
	Bound,
}

/// Outcome of binding the active page.
#[derive(Debug, Clone, PartialEq)]
pub enum BindStatus {
	/// The model was bound.
	Bound(BindHandle),
	/// The page has no handler.
	NoHandler,
	/// The handler's output did not convert.
	HandlerFailed(HandlerError),
	/// The engine refused the model.
	BindFailed(BindError),
}

impl BindStatus {
	/// Returns whether a model was bound.
	pub fn is_bound(&self) -> bool {
		matches!(self, Self::Bound(_))
	}
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
	/// The page that is now active.
	pub page_id: String,
	/// The app-relative route that matched.
	pub path: String,
	/// The URL written to history.
	pub url: String,
	/// How the navigation was triggered.
	pub kind: NavigationKind,
	/// True when the not-found page stood in for a missing route.
	pub fallback: bool,
	/// The visibility changes that were applied.
	pub delta: VisibilityDelta,
	/// What happened to the page's model.
	pub binding: BindStatus,
}

struct Resolution {
	page_id: String,
	path: String,
	url: String,
	fallback: bool,
}

/// Owns the routes, pages and handlers of one application and moves
/// between pages.
pub struct Navigator<D, H, E> {
	settings: PagesSettings,
	routes: RouteTable,
	tree: PageTree,
	handlers: HandlerRegistry,
	dom: D,
	history: H,
	engine: E,
	current_page: Option<String>,
	current_title: String,
	phase: NavigatorPhase,
}

impl<D: Dom, H: History, E: BindingEngine> Navigator<D, H, E> {
	/// Creates a navigator over an existing page tree.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingElement`] when the configured not-found
	/// page is not in `tree`.
	pub fn new(
		settings: PagesSettings,
		tree: PageTree,
		dom: D,
		history: H,
		engine: E,
	) -> Result<Self, ConfigError> {
		if let Some(page) = settings.not_found_page.as_deref()
			&& !tree.contains(page)
		{
			return Err(ConfigError::MissingElement(page.to_string()));
		}
		let routes = RouteTable::new().separator(settings.nested_separator.clone());
		Ok(Self {
			settings,
			routes,
			tree,
			handlers: HandlerRegistry::new(),
			dom,
			history,
			engine,
			current_page: None,
			current_title: String::new(),
			phase: NavigatorPhase::Idle,
		})
	}

	/// Validates `settings` and discovers the page tree in `dom`.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Settings`] for invalid settings,
	/// [`ConfigError::DuplicatePage`] for repeated page ids and
	/// [`ConfigError::MissingElement`] for an unknown not-found page.
	pub fn from_dom(settings: PagesSettings, dom: D, history: H, engine: E) -> Result<Self, ConfigError> {
		settings.validate()?;
		let tree = PageTree::from_dom(&dom, &settings)?;
		Self::new(settings, tree, dom, history, engine)
	}

	/// Registers a page under its parent's route.
	///
	/// Root pages are routed at `segment`; nested pages at the parent's
	/// route, the nested separator and `segment`. Returns the route.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Route`] when the route cannot be registered.
	pub fn register_page(&mut self, segment: &str, page_id: &str) -> Result<String, ConfigError> {
		Ok(self.routes.register_page(segment, page_id, &self.tree)?)
	}

	/// Registers a page at an exact path, ignoring nesting.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Route`] when the route cannot be registered.
	pub fn register_route(&mut self, path: &str, page_id: &str) -> Result<(), ConfigError> {
		Ok(self.routes.add(path, page_id, &self.tree)?)
	}

	/// Redirects `path` to `target`, both app-relative.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Route`] if `path` is taken.
	pub fn register_redirect(&mut self, path: &str, target: &str) -> Result<(), ConfigError> {
		Ok(self.routes.add_redirect(path, target)?)
	}

	/// Shows `page_id` when no route matches.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingElement`] for an unknown page.
	pub fn set_not_found_page(&mut self, page_id: &str) -> Result<(), ConfigError> {
		if !self.tree.contains(page_id) {
			return Err(ConfigError::MissingElement(page_id.to_string()));
		}
		self.settings.not_found_page = Some(page_id.to_string());
		Ok(())
	}

	/// Registers the model producer of `page_id`.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingElement`] for an unknown page and
	/// [`ConfigError::DuplicateHandler`] if the page already has a producer.
	pub fn register_handler<F, M>(&mut self, page_id: &str, producer: F) -> Result<(), ConfigError>
	where
		F: Fn() -> M + Send + Sync + 'static,
		M: Serialize + 'static,
	{
		if !self.tree.contains(page_id) {
			return Err(ConfigError::MissingElement(page_id.to_string()));
		}
		self.handlers.register(page_id, producer)
	}

	/// Navigates to `path`.
	///
	/// `path` may be a full URL path under the base path or an app-relative
	/// route.
	///
	/// # Errors
	///
	/// - [`NavigationError::PageNotFound`] when nothing matches and no
	///   not-found page is set
	/// - [`NavigationError::NavigationFailed`] for redirect chains and an
	///   unroutable not-found page
	///
	/// On error nothing has changed.
	pub fn navigate(&mut self, path: &str, kind: NavigationKind) -> Result<Navigation, NavigationError> {
		debug_log!("Navigating to {} ({:?})", path, kind);
		self.phase = NavigatorPhase::Resolving;

		let resolution = match self.resolve(path) {
			Ok(resolution) => resolution,
			Err(e) => {
				self.phase = NavigatorPhase::Idle;
				error_log!("Navigation to {} failed: {}", path, e);
				return Err(e);
			}
		};

		self.phase = NavigatorPhase::Applying;
		let delta = VisibilityDelta::compute(
			&self.tree,
			self.current_page.as_deref(),
			&resolution.page_id,
		);
		delta.apply(&mut self.tree, &mut self.dom);

		self.phase = NavigatorPhase::Bound;
		self.current_page = Some(resolution.page_id.clone());
		self.current_title = self
			.tree
			.get(&resolution.page_id)
			.map(|n| n.title().to_string())
			.unwrap_or_default();
		self.dom.set_title(&self.current_title);
		let binding = self.bind_page(&resolution.page_id);

		match kind {
			NavigationKind::Push => self.history.push_state(&self.current_title, &resolution.url),
			NavigationKind::Replace => self.history.replace_state(&self.current_title, &resolution.url),
			NavigationKind::Pop => {}
		}
		self.phase = NavigatorPhase::Idle;

		Ok(Navigation {
			page_id: resolution.page_id,
			path: resolution.path,
			url: resolution.url,
			kind,
			fallback: resolution.fallback,
			delta,
			binding,
		})
	}

	fn resolve(&self, raw: &str) -> Result<Resolution, NavigationError> {
		let base = self.settings.base_path.as_str();
		let path = normalize(raw, base);
		let url = if is_under_base(raw, base) {
			raw.to_string()
		} else {
			full_path(base, &path)
		};

		match self.routes.recognize(&path) {
			Recognized::Page(page_id) => Ok(Resolution {
				page_id,
				path,
				url,
				fallback: false,
			}),
			Recognized::Redirect(target) => {
				let target_path = normalize(&target, base);
				match self.routes.recognize(&target_path) {
					Recognized::Page(page_id) => {
						debug_log!("Redirecting {} to {}", path, target_path);
						Ok(Resolution {
							page_id,
							url: full_path(base, &target_path),
							path: target_path,
							fallback: false,
						})
					}
					Recognized::Redirect(next) => Err(NavigationError::NavigationFailed(format!(
						"redirect from \"{}\" to \"{}\" leads to another redirect to \"{}\"",
						path, target_path, next
					))),
					Recognized::NoMatch => self.fall_back(path, url),
				}
			}
			Recognized::NoMatch => self.fall_back(path, url),
		}
	}

	fn fall_back(&self, path: String, url: String) -> Result<Resolution, NavigationError> {
		let Some(page) = self.settings.not_found_page.as_deref() else {
			return Err(NavigationError::PageNotFound(path));
		};
		let route = self.routes.route_of(page).ok_or_else(|| {
			NavigationError::NavigationFailed(format!("not-found page \"{}\" has no route", page))
		})?;

		match self.routes.recognize(route) {
			Recognized::Page(page_id) => {
				warn_log!("No route matches {}, showing {}", path, page_id);
				Ok(Resolution {
					page_id,
					path: route.to_string(),
					url,
					fallback: true,
				})
			}
			_ => Err(NavigationError::NavigationFailed(format!(
				"route \"{}\" of not-found page \"{}\" does not resolve to a page",
				route, page
			))),
		}
	}

	fn bind_page(&mut self, page_id: &str) -> BindStatus {
		let Some(produced) = self.handlers.produce(page_id) else {
			return BindStatus::NoHandler;
		};
		let model = match produced {
			Ok(model) => model,
			Err(e) => {
				error_log!("{}", e);
				return BindStatus::HandlerFailed(e);
			}
		};
		let Some(scope) = self.tree.get(page_id).and_then(|n| n.node()) else {
			let e = BindError::NoScope(page_id.to_string());
			error_log!("{}", e);
			return BindStatus::BindFailed(e);
		};

		match self.engine.bind(scope, model) {
			Ok(handle) => BindStatus::Bound(handle),
			Err(e) => {
				error_log!("Binding page {} failed: {}", page_id, e);
				BindStatus::BindFailed(e)
			}
		}
	}

	/// Navigates to the current location, replacing its history entry.
	///
	/// # Errors
	///
	/// See [`navigate`](Self::navigate).
	pub fn start(&mut self) -> Result<Navigation, NavigationError> {
		let path = self.history.current_path();
		self.navigate(&path, NavigationKind::Replace)
	}

	/// Follows a back or forward move that already changed the location.
	///
	/// # Errors
	///
	/// See [`navigate`](Self::navigate).
	pub fn handle_pop_state(&mut self) -> Result<Navigation, NavigationError> {
		let path = self.history.current_path();
		self.navigate(&path, NavigationKind::Pop)
	}

	/// Push-navigates to `page_id`'s route.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::NavigationFailed`] if the page has no
	/// route.
	pub fn go_to_page(&mut self, page_id: &str) -> Result<Navigation, NavigationError> {
		let url = self.page_url(page_id).ok_or_else(|| {
			NavigationError::NavigationFailed(format!("page \"{}\" has no route", page_id))
		})?;
		self.navigate(&url, NavigationKind::Push)
	}

	/// Push-navigates to `url` if it is under the base path, otherwise
	/// leaves the application. Returns `None` when the page is left.
	///
	/// # Errors
	///
	/// See [`navigate`](Self::navigate).
	pub fn go_to_url(&mut self, url: &str) -> Result<Option<Navigation>, NavigationError> {
		if is_under_base(url, &self.settings.base_path) {
			return self.navigate(url, NavigationKind::Push).map(Some);
		}
		debug_log!("Leaving the application for {}", url);
		self.history.redirect_to(url);
		Ok(None)
	}

	/// Full URL of a page.
	pub fn page_url(&self, page_id: &str) -> Option<String> {
		self.routes.page_url(&self.settings.base_path, page_id)
	}

	/// The active page.
	pub fn current_page(&self) -> Option<&str> {
		self.current_page.as_deref()
	}

	/// The document title set by the last navigation or
	/// [`format_title`](Self::format_title).
	pub fn current_title(&self) -> &str {
		&self.current_title
	}

	/// Fills the `{}` placeholders of the active page's title with `args`,
	/// in order, and sets the result as the document title.
	///
	/// Placeholders without an argument are kept; extra arguments are
	/// ignored.
	pub fn format_title(&mut self, args: &[&dyn Display]) -> String {
		let template = self
			.current_page
			.as_deref()
			.and_then(|id| self.tree.get(id))
			.map(|n| n.title().to_string())
			.unwrap_or_default();

		let mut title = String::with_capacity(template.len());
		let mut args = args.iter();
		let mut rest = template.as_str();
		while let Some(at) = rest.find("{}") {
			title.push_str(&rest[..at]);
			match args.next() {
				Some(arg) => title.push_str(&arg.to_string()),
				None => title.push_str("{}"),
			}
			rest = &rest[at + 2..];
		}
		title.push_str(rest);

		self.dom.set_title(&title);
		self.current_title = title.clone();
		title
	}

	/// The current phase. Always `Idle` between navigations.
	pub fn phase(&self) -> NavigatorPhase {
		self.phase
	}

	/// The page tree.
	pub fn tree(&self) -> &PageTree {
		&self.tree
	}

	/// The route table.
	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	/// The handler registry.
	pub fn handlers(&self) -> &HandlerRegistry {
		&self.handlers
	}

	/// The settings in effect.
	pub fn settings(&self) -> &PagesSettings {
		&self.settings
	}

	/// The DOM.
	pub fn dom(&self) -> &D {
		&self.dom
	}

	/// The DOM, mutably.
	pub fn dom_mut(&mut self) -> &mut D {
		&mut self.dom
	}

	/// The history.
	pub fn history(&self) -> &H {
		&self.history
	}

	/// The history, mutably.
	pub fn history_mut(&mut self) -> &mut H {
		&mut self.history
	}

	/// The binding engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// The binding engine, mutably.
	pub fn engine_mut(&mut self) -> &mut E {
		&mut self.engine
	}

	pub(crate) fn dom_and_engine(&mut self) -> (&mut D, &mut E) {
		(&mut self.dom, &mut self.engine)
	}
}
