//! Logging macros shared by the navigator and the element binder.
//!
//! The macros work on both WASM and native targets.
//!
//! | Macro | WASM | Native |
//! |-------|------|--------|
//! | `debug_log!` | `console.debug` (debug builds) | `tracing::debug!` |
//! | `info_log!` | `console.info` (debug builds) | `tracing::info!` |
//! | `warn_log!` | `console.warn` (debug builds) | `tracing::warn!` |
//! | `error_log!` | `console.error` | `tracing::error!` |
//!
//! Native events are emitted under the `arbor_pages` target, so a host
//! can filter them with any `tracing` subscriber.
//!
//! ## Example
//!
//! ```ignore
//! use arbor_pages::{debug_log, warn_log};
//!
//! debug_log!("navigating to {}", path);
//! warn_log!("no route for {}, falling back to {}", path, page_id);
//! ```

/// Logs a debug message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!(target: "arbor_pages", $($arg)*);
	}};
}

/// No-op debug_log for WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!(target: "arbor_pages", $($arg)*);
	}};
}

/// No-op info_log for WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!(target: "arbor_pages", $($arg)*);
	}};
}

/// No-op warn_log for WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message.
///
/// Errors reach the browser console in release builds too.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!(target: "arbor_pages", $($arg)*);
	}};
}
