//! Binding engine boundary and deferred binds.
//!
//! A [`BindingEngine`] attaches a [`ViewModel`] to a DOM scope. Custom
//! element instances are bound only after their markup has been inserted,
//! so the binder hands them to a [`BindScheduler`] instead of binding
//! inline. [`TaskQueue`] runs them when the host signals that insertion is
//! complete; on `wasm32`, `MicrotaskScheduler` queues them as microtasks.

use crate::dom::NodeRef;
use crate::error::BindError;
use crate::error_log;
use crate::model::ViewModel;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifies a live binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindHandle(u64);

impl BindHandle {
	/// Wraps an engine-specific id.
	pub const fn new(id: u64) -> Self {
		Self(id)
	}

	/// Returns the engine-specific id.
	pub const fn id(self) -> u64 {
		self.0
	}
}

/// Attaches view-models to DOM scopes.
pub trait BindingEngine {
	/// Binds `model` to the subtree rooted at `scope`.
	fn bind(&mut self, scope: NodeRef, model: ViewModel) -> Result<BindHandle, BindError>;
}

impl<E: BindingEngine + ?Sized> BindingEngine for Rc<RefCell<E>> {
	fn bind(&mut self, scope: NodeRef, model: ViewModel) -> Result<BindHandle, BindError> {
		self.try_borrow_mut()
			.map_err(|_| BindError::Engine("engine is already in use".to_string()))?
			.bind(scope, model)
	}
}

/// A binding recorded by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	/// Handle returned to the caller.
	pub handle: BindHandle,
	/// Scope the model was bound to.
	pub scope: NodeRef,
	/// The bound model.
	pub model: ViewModel,
}

/// Engine that records every binding instead of rendering.
#[derive(Debug, Default, Clone)]
pub struct RecordingEngine {
	bindings: Vec<Binding>,
	failing: Vec<NodeRef>,
	next_id: u64,
}

impl RecordingEngine {
	/// Creates an empty engine.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every later bind to `scope` fail.
	pub fn fail_on(&mut self, scope: NodeRef) {
		self.failing.push(scope);
	}

	/// Every successful binding, oldest first.
	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}

	/// Most recent binding to `scope`.
	pub fn last_for(&self, scope: NodeRef) -> Option<&Binding> {
		self.bindings.iter().rev().find(|b| b.scope == scope)
	}
}

impl BindingEngine for RecordingEngine {
	fn bind(&mut self, scope: NodeRef, model: ViewModel) -> Result<BindHandle, BindError> {
		if self.failing.contains(&scope) {
			return Err(BindError::Engine(format!("scope {} rejected", scope.index())));
		}
		self.next_id += 1;
		let handle = BindHandle::new(self.next_id);
		self.bindings.push(Binding {
			handle,
			scope,
			model,
		});
		Ok(handle)
	}
}

/// A bind waiting for its markup to be in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBind {
	/// Custom element the instance belongs to.
	pub tag_id: String,
	/// The instance element.
	pub scope: NodeRef,
	/// The instance's own model.
	pub model: ViewModel,
}

/// Defers binds until after markup insertion.
pub trait BindScheduler {
	/// Queues `bind`. Called right after the instance's markup was inserted.
	fn schedule(&mut self, bind: PendingBind);

	/// Signals that every scheduled instance is in the document. Schedulers
	/// that hold work until this point bind it now and return the results.
	fn run_pending(&mut self, engine: &mut dyn BindingEngine) -> Vec<Result<BindHandle, BindError>>;
}

/// FIFO of pending binds, drained by [`run_pending`](BindScheduler::run_pending).
#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
	pending: VecDeque<PendingBind>,
}

impl TaskQueue {
	/// Creates an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of queued binds.
	pub fn len(&self) -> usize {
		self.pending.len()
	}

	/// Returns whether nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}
}

impl BindScheduler for TaskQueue {
	fn schedule(&mut self, bind: PendingBind) {
		self.pending.push_back(bind);
	}

	fn run_pending(&mut self, engine: &mut dyn BindingEngine) -> Vec<Result<BindHandle, BindError>> {
		self.pending
			.drain(..)
			.map(|pending| {
				let result = engine.bind(pending.scope, pending.model);
				if let Err(e) = &result {
					error_log!("Deferred bind of <{}> failed: {}", pending.tag_id, e);
				}
				result
			})
			.collect()
	}
}

/// Runs each bind as a microtask once the current task yields.
#[cfg(target_arch = "wasm32")]
pub struct MicrotaskScheduler<E: BindingEngine + 'static> {
	engine: Rc<RefCell<E>>,
}

#[cfg(target_arch = "wasm32")]
impl<E: BindingEngine + 'static> MicrotaskScheduler<E> {
	/// Binds through `engine`, which the navigator usually shares.
	pub fn new(engine: Rc<RefCell<E>>) -> Self {
		Self { engine }
	}
}

#[cfg(target_arch = "wasm32")]
impl<E: BindingEngine + 'static> BindScheduler for MicrotaskScheduler<E> {
	fn schedule(&mut self, bind: PendingBind) {
		let mut engine = Rc::clone(&self.engine);
		wasm_bindgen_futures::spawn_local(async move {
			let result = engine.bind(bind.scope, bind.model);
			if let Err(e) = result {
				error_log!("Deferred bind of <{}> failed: {}", bind.tag_id, e);
			}
		});
	}

	fn run_pending(&mut self, _engine: &mut dyn BindingEngine) -> Vec<Result<BindHandle, BindError>> {
		Vec::new()
	}
}
