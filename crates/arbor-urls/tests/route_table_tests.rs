//! Integration tests for the route table
//!
//! These tests verify:
//! 1. Every registered page is recognized at its own route
//! 2. Nested routes are deterministic and unique across siblings
//! 3. Normalization and full paths compose

use arbor_urls::{Recognized, RouteError, RouteTable, full_path, normalize};
use proptest::prelude::*;
use rstest::rstest;
use std::collections::{HashMap, HashSet};

fn flat_pages(ids: &[String]) -> HashMap<String, Option<String>> {
	ids.iter().map(|id| (id.clone(), None)).collect()
}

#[rstest]
fn test_scenario_nested_profile_route() {
	let pages: HashMap<String, Option<String>> = HashMap::from([
		("home".to_string(), None),
		("settings".to_string(), None),
		("profile".to_string(), Some("settings".to_string())),
	]);
	let mut table = RouteTable::new();
	table.register_page("/home", "home", &pages).unwrap();
	table.register_page("/settings", "settings", &pages).unwrap();
	table.register_page("profile", "profile", &pages).unwrap();

	let path = normalize("/app/settings~profile", "/app");
	assert_eq!(table.recognize(&path), Recognized::Page("profile".to_string()));
	assert_eq!(full_path("/app", &path), "/app/settings~profile");
}

#[rstest]
fn test_nested_route_is_distinct_from_flat_sibling() {
	let pages: HashMap<String, Option<String>> = HashMap::from([
		("settings".to_string(), None),
		("profile".to_string(), Some("settings".to_string())),
		("flat".to_string(), None),
	]);
	let mut table = RouteTable::new();
	table.register_page("/settings", "settings", &pages).unwrap();
	table.register_page("profile", "profile", &pages).unwrap();
	table.add("/settings/profile", "flat", &pages).unwrap();

	assert_eq!(
		table.recognize("/settings~profile"),
		Recognized::Page("profile".to_string())
	);
	assert_eq!(
		table.recognize("/settings/profile"),
		Recognized::Page("flat".to_string())
	);
}

#[rstest]
fn test_registration_error_leaves_table_untouched() {
	let pages = flat_pages(&["home".to_string()]);
	let mut table = RouteTable::new();
	table.add("/home", "home", &pages).unwrap();

	assert!(matches!(
		table.add("/home", "home", &pages),
		Err(RouteError::DuplicatePage { .. })
	));
	assert_eq!(table.len(), 1);
	assert_eq!(table.route_of("home"), Some("/home"));
}

proptest! {
	/// Property: every page is recognized at the route it was registered with
	#[test]
	fn prop_recognize_registered_route(
		ids in prop::collection::hash_set("[a-z]{1,8}", 1..16)
	) {
		let ids: Vec<String> = ids.into_iter().collect();
		let pages = flat_pages(&ids);
		let mut table = RouteTable::new();

		for id in &ids {
			table.add(&format!("/{}", id), id, &pages).unwrap();
		}

		for id in &ids {
			prop_assert_eq!(
				table.recognize(&format!("/{}", id)),
				Recognized::Page(id.clone())
			);
		}
	}

	/// Property: nested routes are deterministic and unique across siblings
	#[test]
	fn prop_nested_routes_unique_and_deterministic(
		segments in prop::collection::hash_set("[a-z]{1,6}", 1..10)
	) {
		let mut pages: HashMap<String, Option<String>> =
			HashMap::from([("parent".to_string(), None)]);
		for seg in &segments {
			pages.insert(format!("child-{}", seg), Some("parent".to_string()));
		}

		let mut table = RouteTable::new();
		table.register_page("/parent", "parent", &pages).unwrap();

		let mut routes = HashSet::new();
		for seg in &segments {
			let id = format!("child-{}", seg);
			let expected = table.resolve_nested_path(&id, seg, &pages).unwrap();
			let route = table.register_page(seg, &id, &pages).unwrap();
			prop_assert_eq!(&route, &expected);
			prop_assert!(routes.insert(route));
		}
	}

	/// Property: stripping the base and joining it back gives the original path
	#[test]
	fn prop_normalize_full_path_inverse(rel in "(/[a-z~]{1,8}){1,4}") {
		let full = full_path("/app", &rel);
		prop_assert_eq!(normalize(&full, "/app"), rel);
	}
}
