use std::fmt;

use crate::js::{JsError, Result};


/// One step of a path into a value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named object field.
	Field(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Location inside a value tree, rendered as `$.field[0].other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps, outermost first.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Path pointing at the value itself.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether the path has no steps.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Append a step at the innermost end.
	pub fn push(&mut self, step: PathStep) {
		self.steps.push(step);
	}

	/// Insert a step at the outermost end.
	pub fn prepend(&mut self, step: PathStep) {
		self.steps.insert(0, step);
	}

	/// Parse `$`-rooted or bare dotted syntax with optional `[index]` selectors.
	///
	/// Accepts `$`, `$.a.b[2]`, `a.b[2]`, `[0].name`, `$["a.b"]`. Bare field
	/// names are ASCII alphanumerics, `_` and `-`; any other name is written
	/// as a JSON string inside brackets.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || JsError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();
		let mut expect_field = true;

		if bytes[0] == b'$' {
			idx = 1;
			expect_field = false;
		}

		while idx < bytes.len() {
			match bytes[idx] {
				b'[' if (!expect_field || steps.is_empty()) && bytes.get(idx + 1) == Some(&b'"') => {
					let start = idx + 1;
					let mut end = start + 1;
					while end < bytes.len() && bytes[end] != b'"' {
						end += if bytes[end] == b'\\' { 2 } else { 1 };
					}
					if end + 1 >= bytes.len() || bytes[end + 1] != b']' {
						return Err(invalid());
					}
					let name: String = serde_json::from_str(&input[start..=end]).map_err(|_| invalid())?;
					steps.push(PathStep::Field(name));
					idx = end + 2;
					expect_field = false;
				}
				b'[' if !expect_field || steps.is_empty() => {
					idx += 1;
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
						return Err(invalid());
					}
					let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					steps.push(PathStep::Index(number));
					idx += 1;
					expect_field = false;
				}
				b'.' if !expect_field => {
					idx += 1;
					expect_field = true;
					if idx >= bytes.len() {
						return Err(invalid());
					}
				}
				_ if expect_field => {
					let start = idx;
					while idx < bytes.len() && is_name_byte(bytes[idx]) {
						idx += 1;
					}
					if idx == start {
						return Err(invalid());
					}
					steps.push(PathStep::Field(input[start..idx].to_owned()));
					expect_field = false;
				}
				_ => return Err(invalid()),
			}
		}

		Ok(Self { steps })
	}
}

fn is_name_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

fn is_bare_name(name: &str) -> bool {
	!name.is_empty() && name.bytes().all(is_name_byte)
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Field(name) if is_bare_name(name) => write!(f, ".{name}")?,
				PathStep::Field(name) => {
					let quoted = serde_json::to_string(name).map_err(|_| fmt::Error)?;
					write!(f, "[{quoted}]")?
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
