//! Error types for arbor-pages.
//!
//! Two channels are kept apart. [`ConfigError`] covers mistakes made while
//! wiring the application together and is raised synchronously by the setup
//! calls. [`NavigationError`] is the only error a running application sees,
//! and a route miss with a configured not-found page is not an error at all.

use arbor_urls::RouteError;

/// Errors raised during application setup.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Route table registration failed.
	#[error(transparent)]
	Route(#[from] RouteError),

	/// Two page elements carry the same page id.
	#[error("Page \"{0}\" is declared more than once")]
	DuplicatePage(String),

	/// No page node with this id exists.
	#[error("No page element with id \"{0}\" exists")]
	MissingElement(String),

	/// The page is its own ancestor.
	#[error("Page \"{0}\" is its own ancestor")]
	CyclicPageTree(String),

	/// No element with this id exists for a custom element registration.
	#[error("No element with id \"{0}\" exists")]
	UnknownElement(String),

	/// The element exists but is not a custom element definition.
	#[error("Element \"{tag_id}\" is a <{found}>, not a <{marker}> definition")]
	NotACustomElement {
		/// The id that was registered.
		tag_id: String,
		/// Tag name of the element found under that id.
		found: String,
		/// Expected definition tag.
		marker: String,
	},

	/// A public attribute is missing from the element's model.
	#[error("Attribute \"{attribute}\" of element \"{tag_id}\" has no field in the model")]
	AttributeNotInModel {
		/// The custom element.
		tag_id: String,
		/// The public attribute.
		attribute: String,
	},

	/// A public attribute collides with a reserved HTML attribute.
	#[error("Attribute \"{attribute}\" of element \"{tag_id}\" is reserved")]
	ForbiddenAttribute {
		/// The custom element.
		tag_id: String,
		/// The public attribute.
		attribute: String,
	},

	/// A custom element with this id is already registered.
	#[error("Custom element \"{0}\" is already registered")]
	DuplicateElement(String),

	/// A producer is already registered for this page.
	#[error("A handler is already registered for page \"{0}\"")]
	DuplicateHandler(String),

	/// The element model could not be converted.
	#[error("Invalid model: {0}")]
	Model(#[from] ModelError),

	/// The DOM refused an operation during setup.
	#[error(transparent)]
	Dom(#[from] DomError),

	/// Settings failed to parse or validate.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// Setup was attempted after the application started.
	#[error("The application has already started")]
	AlreadyStarted,
}

/// Errors returned by a navigation.
///
/// Both variants are returned before any visibility change, so the
/// previously active page stays visible.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
	/// Nothing matched the path and no not-found page is configured.
	#[error("404 page not found: no route matches \"{0}\"")]
	PageNotFound(String),

	/// Resolution failed for a reason other than a plain route miss.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
}

/// Errors raised by [`SpaApp::start`](crate::SpaApp::start).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StartError {
	/// Custom element instances could not be expanded.
	#[error(transparent)]
	Element(#[from] ElementError),

	/// The initial navigation failed.
	#[error(transparent)]
	Navigation(#[from] NavigationError),

	/// `start` was already called.
	#[error("The application has already started")]
	AlreadyStarted,
}

/// Errors raised while expanding custom element instances.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
	/// An override attribute could not be converted to the field's type.
	#[error("Invalid value \"{value}\" for attribute \"{attribute}\" of <{tag_id}>: {reason}")]
	InvalidAttributeValue {
		/// The custom element.
		tag_id: String,
		/// The public attribute.
		attribute: String,
		/// The raw attribute value.
		value: String,
		/// Why conversion failed.
		reason: String,
	},

	/// The DOM refused an operation.
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Errors reported by a [`BindingEngine`](crate::BindingEngine).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
	/// The page or element has no DOM scope to bind against.
	#[error("Page \"{0}\" has no element to bind to")]
	NoScope(String),

	/// The engine rejected the binding.
	#[error("Binding failed: {0}")]
	Engine(String),
}

/// Errors produced by page handlers.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
	/// The producer's output could not be turned into a view-model.
	#[error("Handler for page \"{page_id}\" returned an invalid model: {source}")]
	Serialize {
		/// The page whose handler failed.
		page_id: String,
		/// Conversion error.
		source: ModelError,
	},
}

/// Errors converting a value into a [`ViewModel`](crate::ViewModel).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	/// The value did not serialize to a JSON object.
	#[error("expected an object, found {0}")]
	NotAnObject(&'static str),

	/// Serialization itself failed.
	#[error("serialization failed: {0}")]
	Serialize(String),
}

/// Errors raised by a [`Dom`](crate::Dom) implementation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The node handle does not refer to a live node.
	#[error("Node {0} does not exist")]
	NodeNotFound(usize),

	/// The underlying DOM call failed.
	#[error("DOM operation failed: {0}")]
	Operation(String),
}

/// Errors loading [`PagesSettings`](crate::PagesSettings).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The TOML source is malformed.
	#[error("Failed to parse settings: {0}")]
	Toml(#[from] toml::de::Error),

	/// A setting has an unusable value.
	#[error("Invalid setting \"{key}\": {reason}")]
	Invalid {
		/// The offending key.
		key: &'static str,
		/// What is wrong with it.
		reason: String,
	},
}
