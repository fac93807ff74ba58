//! View-models handed to the binding engine.
//!
//! A [`ViewModel`] is a plain value: a map from field name to JSON value.
//! Cloning copies every nested value, so a custom element instance never
//! shares state with its template or with other instances.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name to value map bound to a DOM scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewModel(Map<String, Value>);

impl ViewModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Converts any serializable value that serializes to an object.
	///
	/// # Errors
	///
	/// Returns [`ModelError::NotAnObject`] for values that serialize to
	/// anything but a JSON object, and [`ModelError::Serialize`] if
	/// serialization itself fails.
	///
	/// ```
	/// use arbor_pages::ViewModel;
	///
	/// #[derive(serde::Serialize)]
	/// struct User {
	/// 	name: String,
	/// }
	///
	/// let model = ViewModel::from_serialize(&User { name: "alice".into() }).unwrap();
	/// assert_eq!(model.get("name"), Some(&serde_json::json!("alice")));
	/// ```
	pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ModelError> {
		let value = serde_json::to_value(value).map_err(|e| ModelError::Serialize(e.to_string()))?;
		Self::try_from(value)
	}

	/// Returns a field.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Sets a field, returning the previous value.
	pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(field.into(), value.into())
	}

	/// Builder-style [`set`](Self::set).
	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(field, value);
		self
	}

	/// Returns whether the model has `field`.
	pub fn contains(&self, field: &str) -> bool {
		self.0.contains_key(field)
	}

	/// Iterates over field names.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether the model has no fields.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the model as a JSON object value.
	pub fn to_value(&self) -> Value {
		Value::Object(self.0.clone())
	}
}

impl TryFrom<Value> for ViewModel {
	type Error = ModelError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(ModelError::NotAnObject(kind_of(&other))),
		}
	}
}

impl From<Map<String, Value>> for ViewModel {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

/// Converts a raw attribute string to the JSON type of `template`.
///
/// Strings pass through, numbers and booleans are parsed, `null` fields
/// accept the raw string. Arrays and objects cannot be set from an
/// attribute.
pub(crate) fn convert_like(template: &Value, raw: &str) -> Result<Value, String> {
	match template {
		Value::String(_) | Value::Null => Ok(Value::String(raw.to_string())),
		Value::Bool(_) => raw
			.trim()
			.parse::<bool>()
			.map(Value::Bool)
			.map_err(|_| "expected true or false".to_string()),
		Value::Number(n) if n.is_i64() => raw
			.trim()
			.parse::<i64>()
			.map(Value::from)
			.map_err(|e| format!("expected an integer: {}", e)),
		Value::Number(n) if n.is_u64() => raw
			.trim()
			.parse::<u64>()
			.map(Value::from)
			.map_err(|e| format!("expected an unsigned integer: {}", e)),
		Value::Number(_) => {
			let parsed = raw
				.trim()
				.parse::<f64>()
				.map_err(|e| format!("expected a number: {}", e))?;
			serde_json::Number::from_f64(parsed)
				.map(Value::Number)
				.ok_or_else(|| "expected a finite number".to_string())
		}
		other => Err(format!("{} fields cannot be set from an attribute", kind_of(other))),
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Serialize)]
	struct Credentials {
		username: String,
		password: String,
	}

	#[rstest]
	fn test_from_serialize_struct() {
		let model = ViewModel::from_serialize(&Credentials {
			username: "bob".to_string(),
			password: String::new(),
		})
		.unwrap();

		assert_eq!(model.len(), 2);
		assert_eq!(model.get("username"), Some(&json!("bob")));
		assert!(model.contains("password"));
	}

	#[rstest]
	#[case(json!(1), "a number")]
	#[case(json!("x"), "a string")]
	#[case(json!([1, 2]), "an array")]
	fn test_non_object_rejected(#[case] value: Value, #[case] kind: &'static str) {
		assert_eq!(ViewModel::try_from(value), Err(ModelError::NotAnObject(kind)));
	}

	#[rstest]
	fn test_clone_is_independent() {
		let template = ViewModel::new().with("tags", json!(["a"]));
		let mut copy = template.clone();
		copy.set("tags", json!(["a", "b"]));

		assert_eq!(template.get("tags"), Some(&json!(["a"])));
		assert_eq!(copy.get("tags"), Some(&json!(["a", "b"])));
	}

	#[rstest]
	#[case(json!(""), "alice", json!("alice"))]
	#[case(json!(0), "-7", json!(-7))]
	#[case(json!(0u64), "42", json!(42))]
	#[case(json!(0.5), "2.25", json!(2.25))]
	#[case(json!(false), "true", json!(true))]
	#[case(Value::Null, "raw", json!("raw"))]
	fn test_convert_like(#[case] template: Value, #[case] raw: &str, #[case] expected: Value) {
		assert_eq!(convert_like(&template, raw), Ok(expected));
	}

	#[rstest]
	#[case(json!(0), "ten")]
	#[case(json!(false), "yes")]
	#[case(json!(1.5), "NaN")]
	#[case(json!({"a": 1}), "x")]
	#[case(json!([]), "x")]
	fn test_convert_like_rejects(#[case] template: Value, #[case] raw: &str) {
		assert!(convert_like(&template, raw).is_err());
	}
}
