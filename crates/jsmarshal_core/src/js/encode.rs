use std::collections::{BTreeMap, BTreeSet, HashMap, LinkedList, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::js::{Object, Value};


/// Conversion of a native value into the wire value model.
///
/// Implement this for a user-defined type to pass it as a script argument.
/// Encoding is total: an implementation that cannot produce a value has a bug.
///
/// Implementations must not emit [`ELEMENT_KEY`](crate::js::ELEMENT_KEY) or
/// [`LEGACY_ELEMENT_KEY`](crate::js::LEGACY_ELEMENT_KEY) as the only keys of
/// an object; the remote side would read it as an element reference.
pub trait Encode {
	/// Produce the wire value.
	fn encode(&self) -> Value;
}

/// Encode every item of an iterator into an array.
pub fn encode_iter<I>(items: I) -> Value
where
	I: IntoIterator,
	I::Item: Encode,
{
	Value::Array(items.into_iter().map(|item| item.encode()).collect())
}

/// Fluent builder for object values in user encoders.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
	object: Object,
}

impl ObjectBuilder {
	/// Start an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set `key` to the encoded `value`, replacing any earlier value in place.
	pub fn with(mut self, key: impl Into<String>, value: impl Encode) -> Self {
		self.object.insert(key.into(), value.encode());
		self
	}

	/// Finish into an object value.
	pub fn build(self) -> Value {
		Value::Object(self.object)
	}
}

impl Encode for Value {
	fn encode(&self) -> Value {
		self.clone()
	}
}

impl Encode for bool {
	fn encode(&self) -> Value {
		Value::Bool(*self)
	}
}

macro_rules! encode_signed {
	($($ty:ty),*) => {$(
		impl Encode for $ty {
			fn encode(&self) -> Value {
				Value::I64(i64::from(*self))
			}
		}
	)*};
}

macro_rules! encode_unsigned {
	($($ty:ty),*) => {$(
		impl Encode for $ty {
			fn encode(&self) -> Value {
				Value::from(u64::from(*self))
			}
		}
	)*};
}

encode_signed!(i8, i16, i32, i64);
encode_unsigned!(u8, u16, u32, u64);

impl Encode for isize {
	fn encode(&self) -> Value {
		// isize is at most 64 bits on every supported target.
		Value::I64(*self as i64)
	}
}

impl Encode for usize {
	fn encode(&self) -> Value {
		Value::from(*self as u64)
	}
}

impl Encode for f32 {
	fn encode(&self) -> Value {
		Value::F64(f64::from(*self))
	}
}

impl Encode for f64 {
	fn encode(&self) -> Value {
		Value::F64(*self)
	}
}

impl Encode for char {
	fn encode(&self) -> Value {
		Value::String(self.to_string())
	}
}

impl Encode for str {
	fn encode(&self) -> Value {
		Value::String(self.to_owned())
	}
}

impl Encode for String {
	fn encode(&self) -> Value {
		Value::String(self.clone())
	}
}

impl Encode for () {
	fn encode(&self) -> Value {
		Value::Null
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self) -> Value {
		match self {
			Some(item) => item.encode(),
			None => Value::Null,
		}
	}
}

impl<T: Encode + ?Sized> Encode for &T {
	fn encode(&self) -> Value {
		(**self).encode()
	}
}

impl<T: Encode + ?Sized> Encode for &mut T {
	fn encode(&self) -> Value {
		(**self).encode()
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	fn encode(&self) -> Value {
		(**self).encode()
	}
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
	fn encode(&self) -> Value {
		(**self).encode()
	}
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
	fn encode(&self) -> Value {
		(**self).encode()
	}
}

impl<T: Encode> Encode for [T] {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

impl<T: Encode, const N: usize> Encode for [T; N] {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

impl<T: Encode> Encode for Vec<T> {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

impl<T: Encode> Encode for VecDeque<T> {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

impl<T: Encode> Encode for LinkedList<T> {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

impl<T: Encode> Encode for BTreeSet<T> {
	fn encode(&self) -> Value {
		encode_iter(self)
	}
}

fn encode_entries<'a, K, V, I>(entries: I) -> Value
where
	K: AsRef<str> + 'a,
	V: Encode + 'a,
	I: IntoIterator<Item = (&'a K, &'a V)>,
{
	let object: Object = entries.into_iter().map(|(key, item)| (key.as_ref().to_owned(), item.encode())).collect();
	Value::Object(object)
}

impl<K: AsRef<str>, V: Encode> Encode for BTreeMap<K, V> {
	fn encode(&self) -> Value {
		encode_entries(self)
	}
}

impl<K: AsRef<str>, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
	fn encode(&self) -> Value {
		encode_entries(self)
	}
}

impl<K: AsRef<str>, V: Encode, S: BuildHasher> Encode for IndexMap<K, V, S> {
	fn encode(&self) -> Value {
		encode_entries(self)
	}
}

macro_rules! encode_tuple {
	($($name:ident),+) => {
		impl<$($name: Encode),+> Encode for ($($name,)+) {
			#[allow(non_snake_case)]
			fn encode(&self) -> Value {
				let ($($name,)+) = self;
				Value::Array(vec![$($name.encode()),+])
			}
		}
	};
}

encode_tuple!(A);
encode_tuple!(A, B);
encode_tuple!(A, B, C);
encode_tuple!(A, B, C, D);
encode_tuple!(A, B, C, D, E);
encode_tuple!(A, B, C, D, E, F);
