use thiserror::Error;

use crate::js::{FieldPath, PathStep, Shape, Value};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, JsError>;

/// Errors surfaced to callers of script execution and evaluation.
#[derive(Debug, Error)]
pub enum JsError {
	/// Transport or session failure, forwarded unchanged.
	#[error("invocation failed: {0}")]
	Invocation(#[from] InvocationError),
	/// Returned value did not match the requested native type.
	#[error("conversion failed: {0}")]
	Conversion(#[from] ConversionError),
	/// Transport configuration was rejected before any request was made.
	#[error("invalid config {field}: {reason}")]
	InvalidConfig {
		/// Offending configuration field.
		field: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
	/// CLI argument text could not be turned into a value.
	#[error("invalid argument {value:?}: {reason}")]
	InvalidArgument {
		/// User-provided argument text.
		value: String,
		/// Parser message.
		reason: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// User-provided path string.
		path: String,
	},
	/// Filesystem failure while loading a script.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
}

/// Failure reported by a transport while running a remote command.
#[derive(Debug, Error)]
pub enum InvocationError {
	/// The remote end could not be reached or the connection dropped.
	#[error("connection failed: {0}")]
	Connection(String),
	/// The request did not complete within the transport timeout.
	#[error("request timed out")]
	Timeout,
	/// The remote end answered with a WebDriver error.
	#[error("remote error {error}: {message}")]
	Remote {
		/// WebDriver error code, e.g. `javascript error`.
		error: String,
		/// Human readable message from the remote end.
		message: String,
	},
	/// Non-success HTTP status with a body that is not a WebDriver error.
	#[error("HTTP {status}: {body}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Response did not follow the wire protocol.
	#[error("protocol violation: {0}")]
	Protocol(String),
	/// Failure from a custom transport.
	#[error(transparent)]
	Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Why a value could not be converted into the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionKind {
	/// Value shape is incompatible with the target type.
	#[error("expected {expected}, got {actual}")]
	Mismatch {
		/// Target type or shape name.
		expected: &'static str,
		/// Shape actually found.
		actual: Shape,
	},
	/// Required object field is absent.
	#[error("missing field {field:?}")]
	MissingField {
		/// Field name.
		field: String,
	},
	/// Number does not fit the target type.
	#[error("{value} is out of range for {expected}")]
	OutOfRange {
		/// Target type name.
		expected: &'static str,
		/// Rendered offending number.
		value: String,
	},
	/// Fixed-size array or tuple has the wrong number of elements.
	#[error("expected {expected} elements, got {actual}")]
	Length {
		/// Required element count.
		expected: usize,
		/// Element count found.
		actual: usize,
	},
}

/// Decode failure with the location inside the value tree where it occurred.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {path}")]
pub struct ConversionError {
	/// What went wrong.
	pub kind: ConversionKind,
	/// Where it went wrong, relative to the decoded root.
	pub path: FieldPath,
}

impl ConversionError {
	/// Error at the root for a value of the wrong shape.
	pub fn mismatch(expected: &'static str, value: &Value) -> Self {
		ConversionKind::Mismatch {
			expected,
			actual: value.shape(),
		}
		.into()
	}

	/// Error at the root for an absent required field.
	pub fn missing_field(field: impl Into<String>) -> Self {
		ConversionKind::MissingField { field: field.into() }.into()
	}

	/// Error at the root for a number that does not fit `expected`.
	pub fn out_of_range(expected: &'static str, value: &Value) -> Self {
		ConversionKind::OutOfRange {
			expected,
			value: value.to_string(),
		}
		.into()
	}

	/// Error at the root for a fixed-size sequence of the wrong length.
	pub fn length(expected: usize, actual: usize) -> Self {
		ConversionKind::Length { expected, actual }.into()
	}

	/// Prefix the path with an object field step.
	pub fn at_field(mut self, name: impl Into<String>) -> Self {
		self.path.prepend(PathStep::Field(name.into()));
		self
	}

	/// Prefix the path with an array index step.
	pub fn at_index(mut self, index: usize) -> Self {
		self.path.prepend(PathStep::Index(index));
		self
	}
}

impl From<ConversionKind> for ConversionError {
	fn from(kind: ConversionKind) -> Self {
		Self { kind, path: FieldPath::root() }
	}
}
