use super::History;
use crate::dom::web::js_error_message;
use crate::error_log;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::Event;

/// [`History`] over `window.history` and `window.location`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

impl BrowserHistory {
	/// Creates a handle. The browser owns the actual state.
	pub fn new() -> Self {
		Self
	}
}

impl History for BrowserHistory {
	fn push_state(&mut self, title: &str, path: &str) {
		let result = web_sys::window()
			.ok_or_else(|| JsValue::from_str("no window"))
			.and_then(|w| w.history())
			.and_then(|h| h.push_state_with_url(&JsValue::NULL, title, Some(path)));
		if let Err(e) = result {
			error_log!("pushState for {} failed: {}", path, js_error_message(&e));
		}
	}

	fn replace_state(&mut self, title: &str, path: &str) {
		let result = web_sys::window()
			.ok_or_else(|| JsValue::from_str("no window"))
			.and_then(|w| w.history())
			.and_then(|h| h.replace_state_with_url(&JsValue::NULL, title, Some(path)));
		if let Err(e) = result {
			error_log!("replaceState for {} failed: {}", path, js_error_message(&e));
		}
	}

	fn current_path(&self) -> String {
		let Some(location) = web_sys::window().map(|w| w.location()) else {
			return "/".to_string();
		};
		let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
		let search = location.search().unwrap_or_default();
		let hash = location.hash().unwrap_or_default();
		format!("{}{}{}", pathname, search, hash)
	}

	fn redirect_to(&mut self, url: &str) {
		let result = web_sys::window()
			.ok_or_else(|| JsValue::from_str("no window"))
			.and_then(|w| w.location().set_href(url));
		if let Err(e) = result {
			error_log!("redirect to {} failed: {}", url, js_error_message(&e));
		}
	}
}

/// Calls `on_pop` on every `popstate` event.
///
/// The returned closure must be kept alive, usually with
/// [`Closure::forget`], for the listener to keep firing.
///
/// # Errors
///
/// Returns the JS exception if there is no window or the listener cannot
/// be attached.
pub fn setup_popstate_listener<F>(mut on_pop: F) -> Result<Closure<dyn FnMut(Event)>, JsValue>
where
	F: FnMut() + 'static,
{
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let closure = Closure::wrap(Box::new(move |_event: Event| on_pop()) as Box<dyn FnMut(Event)>);
	window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
	Ok(closure)
}
