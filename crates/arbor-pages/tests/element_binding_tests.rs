//! Integration tests for custom elements
//!
//! Instances get the definition markup and their own model copy, bound
//! only after the markup is inserted.

use arbor_pages::{
	BindScheduler, ConfigError, Dom, ElementBinder, ElementError, MemoryDom, MemoryHistory,
	PagesSettings, RecordingEngine, SpaApp, StartError, TaskQueue,
};
use rstest::rstest;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Credentials {
	#[serde(rename = "Username")]
	username: String,
	#[serde(rename = "Password")]
	password: String,
}

fn document() -> MemoryDom {
	let mut dom = MemoryDom::new();
	let body = dom.root();
	dom.append(body, "section", &[("data-page", "home")]);
	let def = dom.append(
		body,
		"custom-element",
		&[("id", "userCard"), ("attributes", "Username Password")],
	);
	dom.set_inner_html(def, "<input bind=\"Username\"><input bind=\"Password\">")
		.unwrap();
	dom
}

#[rstest]
fn test_user_card_scenario() {
	let mut dom = document();
	let body = dom.root();
	let alice = dom.append(body, "userCard", &[("attr-Username", "alice")]);
	let anonymous = dom.append(body, "usercard", &[]);

	let mut app = SpaApp::new(
		PagesSettings::default(),
		dom,
		MemoryHistory::new("/"),
		RecordingEngine::new(),
	)
	.unwrap();
	app.register_pages([("/", "home")]).unwrap();
	app.register_element(
		"userCard",
		&Credentials {
			username: String::new(),
			password: String::new(),
		},
	)
	.unwrap();
	app.start().unwrap();

	let engine = app.navigator().engine();
	let alice_model = &engine.last_for(alice).unwrap().model;
	assert_eq!(alice_model.get("Username"), Some(&json!("alice")));
	assert_eq!(alice_model.get("Password"), Some(&json!("")));
	assert_eq!(engine.last_for(anonymous).unwrap().model.get("Username"), Some(&json!("")));

	let template = app.elements().get("userCard").unwrap();
	assert_eq!(template.model().get("Username"), Some(&json!("")));

	let markup = app.navigator().dom().inner_html(alice).unwrap();
	assert!(markup.contains("bind=\"Username\""));
}

#[rstest]
fn test_binds_wait_for_insertion() {
	let mut dom = document();
	let body = dom.root();
	let card = dom.append(body, "usercard", &[]);

	let mut binder = ElementBinder::new(&PagesSettings::default());
	binder
		.register(&dom, "userCard", json!({ "Username": "", "Password": "" }).try_into().unwrap())
		.unwrap();

	let mut queue = TaskQueue::new();
	let mut engine = RecordingEngine::new();
	binder.bind(&mut dom, &mut queue).unwrap();

	assert!(engine.bindings().is_empty());
	assert!(!dom.inner_html(card).unwrap().is_empty());

	queue.run_pending(&mut engine);
	assert_eq!(engine.bindings().len(), 1);
	assert_eq!(engine.bindings()[0].scope, card);
}

#[rstest]
fn test_typed_overrides() {
	let mut dom = MemoryDom::new();
	let body = dom.root();
	dom.append(body, "section", &[("data-page", "home")]);
	dom.append(
		body,
		"custom-element",
		&[("id", "counter"), ("attributes", "start step enabled label")],
	);
	let instance = dom.append(
		body,
		"counter",
		&[
			("attr-start", "-3"),
			("attr-step", "0.5"),
			("attr-enabled", "true"),
			("attr-label", "clicks"),
		],
	);

	let mut app = SpaApp::new(
		PagesSettings::default(),
		dom,
		MemoryHistory::new("/"),
		RecordingEngine::new(),
	)
	.unwrap();
	app.register_pages([("/", "home")]).unwrap();
	app.register_element(
		"counter",
		&json!({ "start": 0, "step": 1.0, "enabled": false, "label": "" }),
	)
	.unwrap();
	app.start().unwrap();

	let model = &app.navigator().engine().last_for(instance).unwrap().model;
	assert_eq!(model.get("start"), Some(&json!(-3)));
	assert_eq!(model.get("step"), Some(&json!(0.5)));
	assert_eq!(model.get("enabled"), Some(&json!(true)));
	assert_eq!(model.get("label"), Some(&json!("clicks")));
}

#[rstest]
fn test_bad_override_fails_start() {
	let mut dom = document();
	let body = dom.root();
	dom.append(body, "section", &[("data-page", "other")]);
	dom.append(
		body,
		"custom-element",
		&[("id", "stepper"), ("attributes", "count")],
	);
	dom.append(body, "stepper", &[("attr-count", "many")]);

	let mut app = SpaApp::new(
		PagesSettings::default(),
		dom,
		MemoryHistory::new("/"),
		RecordingEngine::new(),
	)
	.unwrap();
	app.register_pages([("/", "home")]).unwrap();
	app.register_element("stepper", &json!({ "count": 0 })).unwrap();

	assert!(matches!(
		app.start(),
		Err(StartError::Element(ElementError::InvalidAttributeValue { .. }))
	));
}

#[rstest]
fn test_registration_errors() {
	let mut app = SpaApp::new(
		PagesSettings::default(),
		document(),
		MemoryHistory::new("/"),
		RecordingEngine::new(),
	)
	.unwrap();

	assert!(matches!(
		app.register_element("nope", &json!({})),
		Err(ConfigError::UnknownElement(_))
	));
	assert!(matches!(
		app.register_element("userCard", &json!({ "Username": "" })),
		Err(ConfigError::AttributeNotInModel { attribute, .. }) if attribute == "Password"
	));
}

#[rstest]
fn test_custom_marker_and_prefix() {
	let mut dom = MemoryDom::new();
	let body = dom.root();
	dom.append(body, "section", &[("data-page", "home")]);
	dom.append(body, "template", &[("id", "chip"), ("attributes", "text")]);
	let chip = dom.append(body, "chip", &[("data-text", "hi")]);

	let settings = PagesSettings::new()
		.with_element_marker("template")
		.with_override_prefix("data-");
	let mut app = SpaApp::new(settings, dom, MemoryHistory::new("/"), RecordingEngine::new()).unwrap();
	app.register_pages([("/", "home")]).unwrap();
	app.register_element("chip", &json!({ "text": "" })).unwrap();
	app.start().unwrap();

	let model = &app.navigator().engine().last_for(chip).unwrap().model;
	assert_eq!(model.get("text"), Some(&json!("hi")));
}
