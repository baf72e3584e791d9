use crate::js::{ConversionError, Decode, Encode, Object, Value};

#[cfg(test)]
mod tests;

/// Object key marking a W3C WebDriver element reference.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Object key used by the legacy JSON wire protocol. Accepted when decoding only.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Opaque handle to an element owned by the remote session.
///
/// Two handles are equal when their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
	id: String,
}

impl ElementRef {
	/// Wrap a session-scoped element identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}

	/// Session-scoped identifier.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Consume the handle, returning the identifier.
	pub fn into_id(self) -> String {
		self.id
	}
}

/// Identifier of an object in the reserved element-reference form.
///
/// Every key must be a reserved key holding a string, and both keys must
/// agree when a remote end sends both.
pub(crate) fn element_id(object: &Object) -> Option<&str> {
	if object.is_empty() || object.len() > 2 {
		return None;
	}

	let mut found: Option<&str> = None;
	for (key, value) in object {
		if key != ELEMENT_KEY && key != LEGACY_ELEMENT_KEY {
			return None;
		}
		let id = value.as_str()?;
		match found {
			Some(previous) if previous != id => return None,
			_ => found = Some(id),
		}
	}
	found
}

impl Encode for ElementRef {
	fn encode(&self) -> Value {
		let mut object = Object::with_capacity(1);
		object.insert(ELEMENT_KEY.to_owned(), Value::String(self.id.clone()));
		Value::Object(object)
	}
}

impl Decode for ElementRef {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		value
			.as_object()
			.and_then(element_id)
			.map(ElementRef::new)
			.ok_or_else(|| ConversionError::mismatch("element reference", value))
	}
}
