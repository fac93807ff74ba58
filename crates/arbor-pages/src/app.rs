//! Application setup.
//!
//! [`SpaApp`] collects routes, handlers and custom elements during setup,
//! then [`start`](SpaApp::start) expands custom elements and shows the
//! page for the current location.
//!
//! ```
//! use arbor_pages::{MemoryDom, MemoryHistory, PagesSettings, RecordingEngine, SpaApp};
//!
//! let mut dom = MemoryDom::new();
//! let body = dom.root();
//! dom.append(body, "section", &[("data-page", "home")]);
//!
//! let mut app = SpaApp::new(
//! 	PagesSettings::default(),
//! 	dom,
//! 	MemoryHistory::new("/home"),
//! 	RecordingEngine::new(),
//! )
//! .unwrap();
//! app.register_pages([("/home", "home")]).unwrap();
//!
//! let navigation = app.start().unwrap();
//! assert_eq!(navigation.page_id, "home");
//! ```

use crate::binding::{BindScheduler, BindingEngine, TaskQueue};
use crate::dom::Dom;
use crate::elements::ElementBinder;
use crate::error::{ConfigError, NavigationError, StartError};
use crate::history::{History, NavigationKind};
use crate::info_log;
use crate::model::ViewModel;
use crate::navigator::{Navigation, Navigator};
use crate::settings::PagesSettings;
use serde::Serialize;

/// A single-page application.
pub struct SpaApp<D, H, E, S = TaskQueue> {
	navigator: Navigator<D, H, E>,
	elements: ElementBinder,
	scheduler: S,
	started: bool,
}

impl<D: Dom, H: History, E: BindingEngine> SpaApp<D, H, E, TaskQueue> {
	/// Creates an application that runs deferred binds from a [`TaskQueue`]
	/// at the end of [`start`](Self::start).
	///
	/// # Errors
	///
	/// Returns [`ConfigError`] for invalid settings, duplicate page ids or an
	/// unknown not-found page.
	pub fn new(settings: PagesSettings, dom: D, history: H, engine: E) -> Result<Self, ConfigError> {
		Self::with_scheduler(settings, dom, history, engine, TaskQueue::new())
	}
}

impl<D: Dom, H: History, E: BindingEngine, S: BindScheduler> SpaApp<D, H, E, S> {
	/// Creates an application with a custom bind scheduler.
	///
	/// # Errors
	///
	/// Returns [`ConfigError`] for invalid settings, duplicate page ids or an
	/// unknown not-found page.
	pub fn with_scheduler(
		settings: PagesSettings,
		dom: D,
		history: H,
		engine: E,
		scheduler: S,
	) -> Result<Self, ConfigError> {
		let elements = ElementBinder::new(&settings);
		let navigator = Navigator::from_dom(settings, dom, history, engine)?;
		Ok(Self {
			navigator,
			elements,
			scheduler,
			started: false,
		})
	}

	fn ensure_setup(&self) -> Result<(), ConfigError> {
		if self.started {
			return Err(ConfigError::AlreadyStarted);
		}
		Ok(())
	}

	/// Registers pages from `(segment, page_id)` pairs.
	///
	/// Parents are registered before their children whatever the input
	/// order, so a nested page's segment is always appended to a known
	/// route.
	///
	/// # Errors
	///
	/// Stops at the first page that fails to register.
	pub fn register_pages<I, P, K>(&mut self, pages: I) -> Result<(), ConfigError>
	where
		I: IntoIterator<Item = (P, K)>,
		P: AsRef<str>,
		K: AsRef<str>,
	{
		self.ensure_setup()?;
		let mut pages: Vec<(P, K)> = pages.into_iter().collect();
		let tree = self.navigator.tree();
		pages.sort_by_key(|(_, id)| tree.depth(id.as_ref()));

		for (segment, page_id) in &pages {
			self.navigator.register_page(segment.as_ref(), page_id.as_ref())?;
		}
		Ok(())
	}

	/// Redirects `path` to `target`.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Route`] if `path` is taken.
	pub fn register_redirect(&mut self, path: &str, target: &str) -> Result<(), ConfigError> {
		self.ensure_setup()?;
		self.navigator.register_redirect(path, target)
	}

	/// Sets the page shown when no route matches.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingElement`] for an unknown page.
	pub fn set_not_found_page(&mut self, page_id: &str) -> Result<(), ConfigError> {
		self.ensure_setup()?;
		self.navigator.set_not_found_page(page_id)
	}

	/// Registers the model producer of a page.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingElement`] or
	/// [`ConfigError::DuplicateHandler`].
	pub fn register_handler<F, M>(&mut self, page_id: &str, producer: F) -> Result<(), ConfigError>
	where
		F: Fn() -> M + Send + Sync + 'static,
		M: Serialize + 'static,
	{
		self.ensure_setup()?;
		self.navigator.register_handler(page_id, producer)
	}

	/// Registers a custom element definition and its model.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Model`] if `model` does not serialize to an
	/// object, otherwise see [`ElementBinder::register`].
	pub fn register_element<M: Serialize + ?Sized>(&mut self, tag_id: &str, model: &M) -> Result<(), ConfigError> {
		self.ensure_setup()?;
		let model = ViewModel::from_serialize(model)?;
		self.elements.register(self.navigator.dom(), tag_id, model)?;
		Ok(())
	}

	/// Expands custom elements, runs deferred binds and navigates to the
	/// current location.
	///
	/// # Errors
	///
	/// Returns [`StartError::AlreadyStarted`] on a second call,
	/// [`StartError::Element`] if an instance cannot be expanded and
	/// [`StartError::Navigation`] if the initial navigation fails.
	///
	/// The application counts as started from the first call on, even when
	/// that call fails: expanded markup cannot be taken back, so setup and
	/// `start` stay closed. A failed initial navigation leaves the elements
	/// bound and [`navigate`](Self::navigate) still works.
	pub fn start(&mut self) -> Result<Navigation, StartError> {
		if self.started {
			return Err(StartError::AlreadyStarted);
		}
		self.started = true;

		let (dom, engine) = self.navigator.dom_and_engine();
		let instances = self.elements.bind(dom, &mut self.scheduler)?;
		self.scheduler.run_pending(engine);
		info_log!(
			"Starting with {} routes and {} custom element instances",
			self.navigator.routes().len(),
			instances
		);

		Ok(self.navigator.start()?)
	}

	/// Push-navigates to `path`.
	///
	/// # Errors
	///
	/// See [`Navigator::navigate`].
	pub fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
		self.navigator.navigate(path, NavigationKind::Push)
	}

	/// Follows a back or forward move.
	///
	/// # Errors
	///
	/// See [`Navigator::navigate`].
	pub fn handle_pop_state(&mut self) -> Result<Navigation, NavigationError> {
		self.navigator.handle_pop_state()
	}

	/// Returns whether [`start`](Self::start) has run.
	pub fn is_started(&self) -> bool {
		self.started
	}

	/// The navigator.
	pub fn navigator(&self) -> &Navigator<D, H, E> {
		&self.navigator
	}

	/// The navigator, mutably.
	pub fn navigator_mut(&mut self) -> &mut Navigator<D, H, E> {
		&mut self.navigator
	}

	/// The custom element registry.
	pub fn elements(&self) -> &ElementBinder {
		&self.elements
	}
}

#[cfg(target_arch = "wasm32")]
impl<D, H, E, S> SpaApp<D, H, E, S>
where
	D: Dom + 'static,
	H: History + 'static,
	E: BindingEngine + 'static,
	S: BindScheduler + 'static,
{
	/// Routes browser back and forward moves to `app` for the lifetime of
	/// the page.
	///
	/// # Errors
	///
	/// Returns the JS exception if the listener cannot be attached.
	pub fn listen_pop_state(
		app: &std::rc::Rc<std::cell::RefCell<Self>>,
	) -> Result<(), wasm_bindgen::JsValue> {
		let app = std::rc::Rc::clone(app);
		let closure = crate::history::setup_popstate_listener(move || {
			// Navigation errors are already logged by the navigator.
			let _ = app.borrow_mut().handle_pop_state();
		})?;
		closure.forget();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::binding::RecordingEngine;
	use crate::dom::MemoryDom;
	use crate::history::MemoryHistory;
	use rstest::{fixture, rstest};

	type TestApp = SpaApp<MemoryDom, MemoryHistory, RecordingEngine>;

	#[fixture]
	fn app() -> TestApp {
		let mut dom = MemoryDom::new();
		let body = dom.root();
		dom.append(body, "section", &[("data-page", "home")]);
		let settings = dom.append(body, "section", &[("data-page", "settings"), ("hidden", "")]);
		dom.append(settings, "div", &[("data-page", "profile"), ("hidden", "")]);
		let def = dom.append(body, "custom-element", &[("id", "badge"), ("attributes", "Label")]);
		dom.set_inner_html(def, "<b></b>").unwrap();
		dom.append(body, "badge", &[("attr-Label", "new")]);

		SpaApp::new(
			PagesSettings::default(),
			dom,
			MemoryHistory::new("/settings~profile"),
			RecordingEngine::new(),
		)
		.unwrap()
	}

	#[rstest]
	fn test_register_pages_orders_parents_first(mut app: TestApp) {
		app.register_pages([("profile", "profile"), ("/home", "home"), ("/settings", "settings")])
			.unwrap();

		assert_eq!(
			app.navigator().routes().route_of("profile"),
			Some("/settings~profile")
		);
	}

	#[rstest]
	fn test_start_binds_elements_and_navigates(mut app: TestApp) {
		app.register_pages([("/home", "home"), ("/settings", "settings"), ("profile", "profile")])
			.unwrap();
		app.register_element("badge", &serde_json::json!({ "Label": "" }))
			.unwrap();

		let navigation = app.start().unwrap();

		assert_eq!(navigation.page_id, "profile");
		assert_eq!(navigation.kind, NavigationKind::Replace);
		let bindings = app.navigator().engine().bindings();
		assert_eq!(bindings.len(), 1);
		assert_eq!(bindings[0].model.get("Label"), Some(&serde_json::json!("new")));
		assert_eq!(app.navigator().history().len(), 1);
	}

	#[rstest]
	fn test_setup_after_start_fails(mut app: TestApp) {
		app.register_pages([("/home", "home")]).unwrap();
		app.set_not_found_page("home").unwrap();
		app.start().unwrap();

		assert!(app.is_started());
		assert!(matches!(
			app.register_pages([("/settings", "settings")]),
			Err(ConfigError::AlreadyStarted)
		));
		assert!(matches!(
			app.register_redirect("/a", "/home"),
			Err(ConfigError::AlreadyStarted)
		));
		assert!(matches!(app.start(), Err(StartError::AlreadyStarted)));
	}

	#[rstest]
	fn test_start_without_route_fails(mut app: TestApp) {
		app.register_pages([("/home", "home")]).unwrap();

		assert!(matches!(
			app.start(),
			Err(StartError::Navigation(NavigationError::PageNotFound(_)))
		));
	}

	#[rstest]
	fn test_failed_start_still_counts_as_started(mut app: TestApp) {
		app.register_pages([("/home", "home")]).unwrap();
		app.register_element("badge", &serde_json::json!({ "Label": "" }))
			.unwrap();
		assert!(app.start().is_err());

		assert!(app.is_started());
		assert!(matches!(app.start(), Err(StartError::AlreadyStarted)));
		assert!(matches!(
			app.set_not_found_page("home"),
			Err(ConfigError::AlreadyStarted)
		));
		assert_eq!(app.navigator().engine().bindings().len(), 1);

		let navigation = app.navigate("/home").unwrap();
		assert_eq!(navigation.page_id, "home");
	}

	#[rstest]
	fn test_unknown_not_found_page_rejected_at_construction() {
		let mut dom = MemoryDom::new();
		let body = dom.root();
		dom.append(body, "section", &[("data-page", "home")]);

		let result = TestApp::new(
			PagesSettings::new().with_not_found_page("ghost"),
			dom,
			MemoryHistory::default(),
			RecordingEngine::new(),
		);
		assert!(matches!(result, Err(ConfigError::MissingElement(id)) if id == "ghost"));
	}

	#[rstest]
	fn test_invalid_element_model(mut app: TestApp) {
		assert!(matches!(
			app.register_element("badge", &5),
			Err(ConfigError::Model(_))
		));
	}

	#[rstest]
	fn test_invalid_settings() {
		let result = TestApp::new(
			PagesSettings::new().with_nested_separator("/"),
			MemoryDom::new(),
			MemoryHistory::default(),
			RecordingEngine::new(),
		);
		assert!(matches!(result, Err(ConfigError::Settings(_))));
	}
}
