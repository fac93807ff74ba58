//! Facade tests
//!
//! The `arbor` crate only re-exports its members. These tests make sure
//! both are reachable through it and work together.

use arbor::urls::{full_path, normalize};
use arbor::{Recognized, RouteError, RouteTable};
use rstest::rstest;
use serde_json::json;
use std::collections::HashMap;

#[rstest]
fn test_route_table_through_facade() {
	let pages: HashMap<String, Option<String>> = HashMap::from([
		("settings".to_string(), None),
		("profile".to_string(), Some("settings".to_string())),
	]);
	let mut table = RouteTable::new();
	table.register_page("/settings", "settings", &pages).unwrap();
	table.register_page("profile", "profile", &pages).unwrap();

	let path = normalize("/app/settings~profile?tab=1", "/app");
	assert_eq!(table.recognize(&path), Recognized::Page("profile".to_string()));
	assert_eq!(full_path("/app", &path), "/app/settings~profile");
	assert!(matches!(
		table.register_page("profile", "profile", &pages),
		Err(RouteError::DuplicatePage { .. })
	));
}

#[cfg(feature = "pages")]
#[rstest]
fn test_app_through_facade() {
	use arbor::pages::{MemoryDom, MemoryHistory, PagesSettings, RecordingEngine};
	use arbor::{NavigationError, SpaApp};

	let mut dom = MemoryDom::new();
	let body = dom.root();
	let settings = dom.append(body, "section", &[("data-page", "settings"), ("data-title", "Settings")]);
	dom.append(settings, "div", &[("data-page", "profile"), ("data-title", "Profile")]);

	let mut app = SpaApp::new(
		PagesSettings::default().with_base_path("/app"),
		dom,
		MemoryHistory::new("/app/settings"),
		RecordingEngine::new(),
	)
	.unwrap();
	app.register_pages([("/settings", "settings"), ("profile", "profile")])
		.unwrap();
	app.register_handler("profile", || json!({ "name": "Ada" }))
		.unwrap();
	app.start().unwrap();

	let nav = app.navigate("/settings~profile").unwrap();
	assert_eq!(nav.page_id, "profile");
	assert!(nav.binding.is_bound());
	let bound = app.navigator().engine().bindings().last().unwrap();
	assert_eq!(bound.model.get("name"), Some(&json!("Ada")));

	assert!(matches!(
		app.navigate("/missing"),
		Err(NavigationError::PageNotFound(_))
	));
	assert_eq!(app.navigator().current_page(), Some("profile"));
}
