//! Runtime settings.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! base_path = "/app"
//! not_found_page = "home"
//! nested_separator = "~"
//! ```

use crate::error::SettingsError;
use arbor_urls::NESTED_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Settings for a single application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSettings {
	/// Prefix under which the application is served.
	pub base_path: String,
	/// Page shown when no route matches.
	pub not_found_page: Option<String>,
	/// Joins a parent route and a child segment.
	pub nested_separator: String,
	/// Attribute that marks an element as a page.
	pub page_attr: String,
	/// Attribute holding a page's title.
	pub title_attr: String,
	/// Tag of custom element definitions.
	pub element_marker: String,
	/// Attribute listing a definition's public attributes.
	pub element_attributes_attr: String,
	/// Prefix of per-instance attribute overrides.
	pub override_prefix: String,
}

impl Default for PagesSettings {
	fn default() -> Self {
		Self {
			base_path: "/".to_string(),
			not_found_page: None,
			nested_separator: NESTED_SEPARATOR.to_string(),
			page_attr: "data-page".to_string(),
			title_attr: "data-title".to_string(),
			element_marker: "custom-element".to_string(),
			element_attributes_attr: "attributes".to_string(),
			override_prefix: "attr-".to_string(),
		}
	}
}

impl PagesSettings {
	/// Creates settings with every default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses and validates settings from TOML.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Toml`] for malformed input and
	/// [`SettingsError::Invalid`] when a value fails [`validate`](Self::validate).
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Sets the base path.
	pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
		self.base_path = base_path.into();
		self
	}

	/// Sets the not-found page.
	pub fn with_not_found_page(mut self, page_id: impl Into<String>) -> Self {
		self.not_found_page = Some(page_id.into());
		self
	}

	/// Sets the nested route separator.
	pub fn with_nested_separator(mut self, separator: impl Into<String>) -> Self {
		self.nested_separator = separator.into();
		self
	}

	/// Sets the page marker attribute.
	pub fn with_page_attr(mut self, attr: impl Into<String>) -> Self {
		self.page_attr = attr.into();
		self
	}

	/// Sets the custom element definition tag.
	pub fn with_element_marker(mut self, marker: impl Into<String>) -> Self {
		self.element_marker = marker.into();
		self
	}

	/// Sets the attribute override prefix.
	pub fn with_override_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.override_prefix = prefix.into();
		self
	}

	/// Checks that the settings are usable.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Invalid`] if the base path does not start
	/// with `/`, the separator is empty or contains `/`, or any marker
	/// attribute is empty.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.base_path.starts_with('/') {
			return Err(SettingsError::Invalid {
				key: "base_path",
				reason: format!("\"{}\" must start with '/'", self.base_path),
			});
		}
		if self.nested_separator.is_empty() || self.nested_separator.contains('/') {
			return Err(SettingsError::Invalid {
				key: "nested_separator",
				reason: format!(
					"\"{}\" must be non-empty and must not contain '/'",
					self.nested_separator
				),
			});
		}

		for (key, value) in [
			("page_attr", &self.page_attr),
			("title_attr", &self.title_attr),
			("element_marker", &self.element_marker),
			("element_attributes_attr", &self.element_attributes_attr),
		] {
			if value.is_empty() {
				return Err(SettingsError::Invalid {
					key,
					reason: "must not be empty".to_string(),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = PagesSettings::default();
		assert_eq!(settings.base_path, "/");
		assert_eq!(settings.nested_separator, "~");
		assert_eq!(settings.page_attr, "data-page");
		assert_eq!(settings.element_marker, "custom-element");
		assert_eq!(settings.override_prefix, "attr-");
		assert!(settings.not_found_page.is_none());
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_empty_toml_is_default() {
		assert_eq!(PagesSettings::from_toml_str("").unwrap(), PagesSettings::default());
	}

	#[rstest]
	fn test_partial_toml() {
		let settings = PagesSettings::from_toml_str(
			r#"
			base_path = "/app"
			not_found_page = "home"
			"#,
		)
		.unwrap();

		assert_eq!(settings.base_path, "/app");
		assert_eq!(settings.not_found_page.as_deref(), Some("home"));
		assert_eq!(settings.nested_separator, "~");
	}

	#[rstest]
	fn test_malformed_toml() {
		assert!(matches!(
			PagesSettings::from_toml_str("base_path = [1, 2"),
			Err(SettingsError::Toml(_))
		));
	}

	#[rstest]
	#[case(PagesSettings::new().with_base_path("app"), "base_path")]
	#[case(PagesSettings::new().with_nested_separator(""), "nested_separator")]
	#[case(PagesSettings::new().with_nested_separator("/"), "nested_separator")]
	#[case(PagesSettings::new().with_page_attr(""), "page_attr")]
	#[case(PagesSettings::new().with_element_marker(""), "element_marker")]
	fn test_validate_rejects(#[case] settings: PagesSettings, #[case] expected_key: &str) {
		match settings.validate() {
			Err(SettingsError::Invalid { key, .. }) => assert_eq!(key, expected_key),
			other => panic!("expected Invalid, got {:?}", other),
		}
	}

	#[rstest]
	fn test_invalid_toml_value_fails_validation() {
		assert!(matches!(
			PagesSettings::from_toml_str("nested_separator = \"a/b\""),
			Err(SettingsError::Invalid { key: "nested_separator", .. })
		));
	}
}
