//! Page handlers.
//!
//! A handler produces the view-model of its page each time the page
//! becomes the target of a navigation. Each page has at most one handler.

use crate::error::{ConfigError, HandlerError, ModelError};
use crate::model::ViewModel;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces a page's view-model.
pub trait PageHandler: Send + Sync {
	/// Builds a fresh model.
	///
	/// # Errors
	///
	/// Returns a [`ModelError`] if the output does not convert.
	fn produce(&self) -> Result<ViewModel, ModelError>;
}

/// Wraps a `Fn() -> impl Serialize` closure.
pub(crate) struct ProducerHandler<F> {
	producer: F,
}

impl<F, M> PageHandler for ProducerHandler<F>
where
	F: Fn() -> M + Send + Sync,
	M: Serialize,
{
	fn produce(&self) -> Result<ViewModel, ModelError> {
		ViewModel::from_serialize(&(self.producer)())
	}
}

/// Page id to handler map.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
	handlers: HashMap<String, Arc<dyn PageHandler>>,
}

impl std::fmt::Debug for HandlerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut pages: Vec<_> = self.handlers.keys().collect();
		pages.sort();
		f.debug_struct("HandlerRegistry").field("pages", &pages).finish()
	}
}

impl HandlerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a closure whose output serializes to an object.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::DuplicateHandler`] if the page already has one.
	pub fn register<F, M>(&mut self, page_id: impl Into<String>, producer: F) -> Result<(), ConfigError>
	where
		F: Fn() -> M + Send + Sync + 'static,
		M: Serialize + 'static,
	{
		self.register_handler(page_id, Arc::new(ProducerHandler { producer }))
	}

	/// Registers a handler object.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::DuplicateHandler`] if the page already has one.
	pub fn register_handler(
		&mut self,
		page_id: impl Into<String>,
		handler: Arc<dyn PageHandler>,
	) -> Result<(), ConfigError> {
		let page_id = page_id.into();
		if self.handlers.contains_key(&page_id) {
			return Err(ConfigError::DuplicateHandler(page_id));
		}
		self.handlers.insert(page_id, handler);
		Ok(())
	}

	/// Runs the page's handler. `None` if the page has no handler.
	pub fn produce(&self, page_id: &str) -> Option<Result<ViewModel, HandlerError>> {
		let handler = self.handlers.get(page_id)?;
		Some(handler.produce().map_err(|source| HandlerError::Serialize {
			page_id: page_id.to_string(),
			source,
		}))
	}

	/// Returns whether the page has a handler.
	pub fn contains(&self, page_id: &str) -> bool {
		self.handlers.contains_key(page_id)
	}

	/// Number of handlers.
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	/// Returns whether no handler is registered.
	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}
