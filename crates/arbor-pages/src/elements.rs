//! Custom elements.
//!
//! A definition is a marker element with an id, a list of public
//! attributes and inner markup:
//!
//! ```html
//! <custom-element id="userCard" attributes="Username Password">
//!   <span bind="Username"></span>
//! </custom-element>
//!
//! <usercard attr-Username="alice"></usercard>
//! ```
//!
//! Every element whose tag matches the definition id gets a copy of the
//! definition's markup and its own copy of the registered model, with
//! public attributes overridden from the instance's `attr-*` attributes.

use crate::binding::{BindScheduler, PendingBind};
use crate::dom::{Dom, NodeRef};
use crate::error::{ConfigError, ElementError};
use crate::model::{ViewModel, convert_like};
use crate::settings::PagesSettings;

/// Attributes a custom element may not declare as public.
pub const FORBIDDEN_ATTRIBUTES: [&str; 4] = ["id", "class", "style", "title"];

/// A registered custom element definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTemplate {
	tag_id: String,
	attributes: Vec<String>,
	model: ViewModel,
	markup: String,
}

impl ElementTemplate {
	/// Definition id, which is also the instance tag name.
	pub fn tag_id(&self) -> &str {
		&self.tag_id
	}

	/// Public attributes in declaration order.
	pub fn attributes(&self) -> &[String] {
		&self.attributes
	}

	/// The registered model. Instances never modify it.
	pub fn model(&self) -> &ViewModel {
		&self.model
	}

	/// Markup copied into every instance.
	pub fn markup(&self) -> &str {
		&self.markup
	}

	/// Builds an instance's model from the template and the instance's
	/// override attributes.
	///
	/// # Errors
	///
	/// Returns [`ElementError::InvalidAttributeValue`] when an override does
	/// not parse as the field's type.
	pub fn instance_model<D: Dom + ?Sized>(
		&self,
		dom: &D,
		instance: NodeRef,
		override_prefix: &str,
	) -> Result<ViewModel, ElementError> {
		let mut model = self.model.clone();

		for attribute in &self.attributes {
			let Some(raw) = dom.attr(instance, &format!("{}{}", override_prefix, attribute)) else {
				continue;
			};
			let template = self.model.get(attribute).cloned().unwrap_or_default();
			let value = convert_like(&template, &raw).map_err(|reason| {
				ElementError::InvalidAttributeValue {
					tag_id: self.tag_id.clone(),
					attribute: attribute.clone(),
					value: raw.clone(),
					reason,
				}
			})?;
			model.set(attribute.clone(), value);
		}

		Ok(model)
	}
}

/// Registry of custom element definitions.
#[derive(Debug, Clone)]
pub struct ElementBinder {
	templates: Vec<ElementTemplate>,
	marker: String,
	attributes_attr: String,
	override_prefix: String,
}

impl ElementBinder {
	/// Creates a binder using the marker and prefix from `settings`.
	pub fn new(settings: &PagesSettings) -> Self {
		Self {
			templates: Vec::new(),
			marker: settings.element_marker.clone(),
			attributes_attr: settings.element_attributes_attr.clone(),
			override_prefix: settings.override_prefix.clone(),
		}
	}

	/// Registers the definition with id `tag_id`.
	///
	/// # Errors
	///
	/// - [`ConfigError::UnknownElement`] if no element has that id
	/// - [`ConfigError::NotACustomElement`] if it is not a definition
	/// - [`ConfigError::ForbiddenAttribute`] for a reserved public attribute
	/// - [`ConfigError::AttributeNotInModel`] for a public attribute the
	///   model lacks
	/// - [`ConfigError::DuplicateElement`] if `tag_id` is already registered
	pub fn register<D: Dom + ?Sized>(
		&mut self,
		dom: &D,
		tag_id: &str,
		model: ViewModel,
	) -> Result<&ElementTemplate, ConfigError> {
		if self.get(tag_id).is_some() {
			return Err(ConfigError::DuplicateElement(tag_id.to_string()));
		}

		let node = dom
			.find_by_id(tag_id)
			.ok_or_else(|| ConfigError::UnknownElement(tag_id.to_string()))?;

		let found = dom.tag_name(node);
		if !found.eq_ignore_ascii_case(&self.marker) {
			return Err(ConfigError::NotACustomElement {
				tag_id: tag_id.to_string(),
				found,
				marker: self.marker.clone(),
			});
		}

		let attributes: Vec<String> = dom
			.attr(node, &self.attributes_attr)
			.unwrap_or_default()
			.split_whitespace()
			.map(str::to_string)
			.collect();

		for attribute in &attributes {
			if FORBIDDEN_ATTRIBUTES
				.iter()
				.any(|f| f.eq_ignore_ascii_case(attribute))
			{
				return Err(ConfigError::ForbiddenAttribute {
					tag_id: tag_id.to_string(),
					attribute: attribute.clone(),
				});
			}
			if !model.contains(attribute) {
				return Err(ConfigError::AttributeNotInModel {
					tag_id: tag_id.to_string(),
					attribute: attribute.clone(),
				});
			}
		}

		let markup = dom.inner_html(node)?;
		self.templates.push(ElementTemplate {
			tag_id: tag_id.to_string(),
			attributes,
			model,
			markup,
		});
		Ok(&self.templates[self.templates.len() - 1])
	}

	/// Looks up a definition, ignoring case.
	pub fn get(&self, tag_id: &str) -> Option<&ElementTemplate> {
		self.templates
			.iter()
			.find(|t| t.tag_id.eq_ignore_ascii_case(tag_id))
	}

	/// Number of definitions.
	pub fn len(&self) -> usize {
		self.templates.len()
	}

	/// Returns whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.templates.is_empty()
	}

	/// Expands every instance in `dom`.
	///
	/// Each instance receives the definition markup, then its model is
	/// handed to `scheduler` so it binds only after insertion. Returns the
	/// number of instances expanded.
	///
	/// # Errors
	///
	/// Stops at the first instance whose overrides do not convert or whose
	/// markup cannot be inserted. Instances expanded before it stay
	/// scheduled.
	pub fn bind<D, S>(&self, dom: &mut D, scheduler: &mut S) -> Result<usize, ElementError>
	where
		D: Dom + ?Sized,
		S: BindScheduler + ?Sized,
	{
		let mut count = 0;

		for template in &self.templates {
			for instance in dom.find_by_tag(&template.tag_id) {
				let model = template.instance_model(&*dom, instance, &self.override_prefix)?;
				dom.append_html(instance, &template.markup)?;
				scheduler.schedule(PendingBind {
					tag_id: template.tag_id.clone(),
					scope: instance,
					model,
				});
				count += 1;
			}
		}

		Ok(count)
	}
}
