use std::collections::{BTreeMap, BTreeSet, HashMap, LinkedList, VecDeque};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::js::element::element_id;
use crate::js::{ConversionError, Object, Value};


/// Conversion from the wire value model into a native type.
///
/// Implement this for a user-defined type to request it as a script result.
/// A shape the type cannot accept must be reported as a [`ConversionError`],
/// never as a panic or a default value. [`Fields`] covers the common case of
/// reading an object field by field.
pub trait Decode: Sized {
	/// Convert `value`, failing with the mismatch location on error.
	fn decode(value: &Value) -> Result<Self, ConversionError>;
}

/// Decode `value` into `T`.
pub fn decode<T: Decode>(value: &Value) -> Result<T, ConversionError> {
	T::decode(value)
}

/// Field reader over a plain object, for use inside [`Decode`] impls.
///
/// Errors from nested decodes are prefixed with the field name so the final
/// message points at the offending location.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
	object: &'a Object,
}

impl<'a> Fields<'a> {
	/// Require `value` to be a plain object. `type_name` appears in the error.
	pub fn new(value: &'a Value, type_name: &'static str) -> Result<Self, ConversionError> {
		plain_object(value, type_name).map(|object| Self { object })
	}

	/// Decode a required field.
	pub fn get<T: Decode>(&self, key: &str) -> Result<T, ConversionError> {
		let item = self.object.get(key).ok_or_else(|| ConversionError::missing_field(key))?;
		T::decode(item).map_err(|err| err.at_field(key))
	}

	/// Decode an optional field. Absent and `null` both yield `None`.
	pub fn get_opt<T: Decode>(&self, key: &str) -> Result<Option<T>, ConversionError> {
		match self.object.get(key) {
			None | Some(Value::Null) => Ok(None),
			Some(item) => T::decode(item).map(Some).map_err(|err| err.at_field(key)),
		}
	}

	/// Borrow a field without decoding it.
	pub fn raw(&self, key: &str) -> Option<&'a Value> {
		self.object.get(key)
	}

	/// Field names in wire order.
	pub fn keys(self) -> impl Iterator<Item = &'a str> {
		self.object.keys().map(String::as_str)
	}
}

fn plain_object<'a>(value: &'a Value, expected: &'static str) -> Result<&'a Object, ConversionError> {
	match value {
		Value::Object(object) if element_id(object).is_none() => Ok(object),
		_ => Err(ConversionError::mismatch(expected, value)),
	}
}

impl Decode for Value {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		Ok(value.clone())
	}
}

impl Decode for bool {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		match value {
			Value::Bool(v) => Ok(*v),
			_ => Err(ConversionError::mismatch("boolean", value)),
		}
	}
}

macro_rules! decode_int {
	($($ty:ty),*) => {$(
		impl Decode for $ty {
			fn decode(value: &Value) -> Result<Self, ConversionError> {
				let name = stringify!($ty);
				let fitted = match value {
					Value::I64(v) => <$ty>::try_from(*v).ok(),
					Value::U64(v) => <$ty>::try_from(*v).ok(),
					// JSON has one number type; accept floats without a fractional part.
					Value::F64(v) if v.fract() == 0.0 => <$ty>::try_from(*v as i128).ok(),
					_ => return Err(ConversionError::mismatch(name, value)),
				};
				fitted.ok_or_else(|| ConversionError::out_of_range(name, value))
			}
		}
	)*};
}

decode_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decode for f64 {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		match value {
			Value::I64(v) => Ok(*v as f64),
			Value::U64(v) => Ok(*v as f64),
			Value::F64(v) => Ok(*v),
			_ => Err(ConversionError::mismatch("f64", value)),
		}
	}
}

impl Decode for f32 {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		let wide = f64::decode(value).map_err(|_| ConversionError::mismatch("f32", value))?;
		if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
			return Err(ConversionError::out_of_range("f32", value));
		}
		Ok(wide as f32)
	}
}

impl Decode for String {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		match value {
			Value::String(v) => Ok(v.clone()),
			_ => Err(ConversionError::mismatch("string", value)),
		}
	}
}

impl Decode for char {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		let mut chars = value.as_str().map(str::chars).ok_or_else(|| ConversionError::mismatch("char", value))?;
		match (chars.next(), chars.next()) {
			(Some(ch), None) => Ok(ch),
			_ => Err(ConversionError::mismatch("single-character string", value)),
		}
	}
}

impl Decode for () {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		match value {
			Value::Null => Ok(()),
			_ => Err(ConversionError::mismatch("null", value)),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		match value {
			Value::Null => Ok(None),
			_ => T::decode(value).map(Some),
		}
	}
}

impl<T: Decode> Decode for Box<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		T::decode(value).map(Box::new)
	}
}

fn decode_items<T, C>(value: &Value) -> Result<C, ConversionError>
where
	T: Decode,
	C: FromIterator<T>,
{
	let items = value.as_array().ok_or_else(|| ConversionError::mismatch("array", value))?;
	items
		.iter()
		.enumerate()
		.map(|(index, item)| T::decode(item).map_err(|err| err.at_index(index)))
		.collect()
}

impl<T: Decode> Decode for Vec<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_items(value)
	}
}

impl<T: Decode> Decode for VecDeque<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_items(value)
	}
}

impl<T: Decode> Decode for LinkedList<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_items(value)
	}
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_items(value)
	}
}

impl<T: Decode, const N: usize> Decode for [T; N] {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		let len = value.as_array().map(<[Value]>::len).ok_or_else(|| ConversionError::mismatch("array", value))?;
		if len != N {
			return Err(ConversionError::length(N, len));
		}
		let items: Vec<T> = decode_items(value)?;
		items.try_into().map_err(|items: Vec<T>| ConversionError::length(N, items.len()))
	}
}

fn decode_entries<T, C>(value: &Value) -> Result<C, ConversionError>
where
	T: Decode,
	C: FromIterator<(String, T)>,
{
	plain_object(value, "object")?
		.iter()
		.map(|(key, item)| match T::decode(item) {
			Ok(decoded) => Ok((key.clone(), decoded)),
			Err(err) => Err(err.at_field(key.as_str())),
		})
		.collect()
}

impl<T: Decode> Decode for BTreeMap<String, T> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_entries(value)
	}
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_entries(value)
	}
}

impl<T: Decode, S: BuildHasher + Default> Decode for IndexMap<String, T, S> {
	fn decode(value: &Value) -> Result<Self, ConversionError> {
		decode_entries(value)
	}
}

macro_rules! decode_tuple {
	($len:literal => $($name:ident $idx:tt),+) => {
		impl<$($name: Decode),+> Decode for ($($name,)+) {
			fn decode(value: &Value) -> Result<Self, ConversionError> {
				let items = value.as_array().ok_or_else(|| ConversionError::mismatch("array", value))?;
				if items.len() != $len {
					return Err(ConversionError::length($len, items.len()));
				}
				Ok(($($name::decode(&items[$idx]).map_err(|err| err.at_index($idx))?,)+))
			}
		}
	};
}

decode_tuple!(1 => A 0);
decode_tuple!(2 => A 0, B 1);
decode_tuple!(3 => A 0, B 1, C 2);
decode_tuple!(4 => A 0, B 1, C 2, D 3);
decode_tuple!(5 => A 0, B 1, C 2, D 3, E 4);
decode_tuple!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
