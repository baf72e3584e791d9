use std::fmt;

use crate::js::{Encode, Value};


/// Ordered, heterogeneous script arguments.
///
/// Values are held by their [`Encode`] impl and encoded when the list is
/// built, so borrowed arguments are cheap to add. Position `i` becomes
/// `arguments[i]` on the remote side.
#[derive(Default)]
pub struct Args<'a> {
	items: Vec<Box<dyn Encode + 'a>>,
}

impl<'a> Args<'a> {
	/// Empty argument list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append `value`, builder style.
	pub fn arg<T: Encode + 'a>(mut self, value: T) -> Self {
		self.items.push(Box::new(value));
		self
	}

	/// Append `value` in place.
	pub fn push<T: Encode + 'a>(&mut self, value: T) -> &mut Self {
		self.items.push(Box::new(value));
		self
	}

	/// Number of arguments.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether no argument was added.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Encode every argument in append order.
	pub fn build(&self) -> Vec<Value> {
		self.items.iter().map(|item| item.encode()).collect()
	}
}

impl<'a, T: Encode + 'a> Extend<T> for Args<'a> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}

impl fmt::Debug for Args<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.build()).finish()
	}
}

/// Build an [`Args`] list from a comma-separated sequence of encodable values.
///
/// ```
/// use jsmarshal::args;
///
/// let name = String::from("abc");
/// let args = args![&name, 21, true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
	() => {
		$crate::js::Args::new()
	};
	($($value:expr),+ $(,)?) => {
		$crate::js::Args::new()$(.arg($value))+
	};
}
