use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::js::element::element_id;
use crate::js::{ConversionError, Decode, FieldPath, PathStep};


/// Insertion-ordered string-keyed object.
pub type Object = IndexMap<String, Value>;

/// JSON-shaped value exchanged with the remote script environment.
///
/// Integers and fractional numbers stay distinct so that `21` and `21.0`
/// reach the remote side with the `typeof` the caller intended.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// Explicit null.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer.
	I64(i64),
	/// Unsigned integer above `i64::MAX`.
	U64(u64),
	/// Fractional or explicitly floating number.
	F64(f64),
	/// UTF-8 string.
	String(String),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// String-keyed object in insertion order.
	Object(Object),
}

/// Coarse classification of a value, used in conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	/// `null`.
	Null,
	/// `true` or `false`.
	Bool,
	/// Integral number.
	Integer,
	/// Fractional number.
	Float,
	/// String.
	String,
	/// Array.
	Array,
	/// Plain object.
	Object,
	/// Object in the reserved element-reference form.
	Element,
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Null => "null",
			Self::Bool => "boolean",
			Self::Integer => "integer",
			Self::Float => "float",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
			Self::Element => "element reference",
		})
	}
}

impl Value {
	/// Parse JSON text into a value.
	pub fn parse(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	/// Classify the value. Element references are recognised before plain objects.
	pub fn shape(&self) -> Shape {
		match self {
			Self::Null => Shape::Null,
			Self::Bool(_) => Shape::Bool,
			Self::I64(_) | Self::U64(_) => Shape::Integer,
			Self::F64(_) => Shape::Float,
			Self::String(_) => Shape::String,
			Self::Array(_) => Shape::Array,
			Self::Object(object) if element_id(object).is_some() => Shape::Element,
			Self::Object(_) => Shape::Object,
		}
	}

	/// Whether the value is `null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow the array payload.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow the object payload.
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Look up an object field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_object().and_then(|object| object.get(key))
	}

	/// Walk `path` from this value.
	pub fn select(&self, path: &FieldPath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Field(name) => current.get(name)?,
				PathStep::Index(index) => current.as_array()?.get(*index)?,
			};
		}
		Some(current)
	}

	/// Decode into a native type.
	pub fn decode<T: Decode>(&self) -> Result<T, ConversionError> {
		T::decode(self)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(signed) => Self::I64(signed),
			Err(_) => Self::U64(value),
		}
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Self::Object(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
		f.write_str(&text)
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::I64(v) => serializer.serialize_i64(*v),
			Self::U64(v) => serializer.serialize_u64(*v),
			Self::F64(v) => serializer.serialize_f64(*v),
			Self::String(v) => serializer.serialize_str(v),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Object(object) => {
				let mut map = serializer.serialize_map(Some(object.len()))?;
				for (key, item) in object {
					map.serialize_entry(key, item)?;
				}
				map.end()
			}
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("any JSON value")
	}

	fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
		Ok(Value::I64(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
		Ok(Value::from(v))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
		Ok(Value::F64(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
		Ok(Value::String(v.to_owned()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
		Ok(Value::String(v))
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::Array(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
		let mut object = Object::with_capacity(map.size_hint().unwrap_or(0));
		while let Some((key, item)) = map.next_entry::<String, Value>()? {
			object.insert(key, item);
		}
		Ok(Value::Object(object))
	}
}
