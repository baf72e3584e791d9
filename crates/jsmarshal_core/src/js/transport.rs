//! Boundary to the component that actually talks to the remote session.

use std::fmt;
use std::sync::Arc;

use crate::js::{InvocationError, Value};

/// Which remote execution endpoint a script targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
	/// The script's `return` value completes the call.
	Execute,
	/// The script completes by invoking the callback appended as its last argument.
	ExecuteAsync,
}

impl fmt::Display for CommandKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Execute => "execute",
			Self::ExecuteAsync => "execute-async",
		})
	}
}

/// Issues one script command and returns the raw result.
///
/// Implementations own retries, timeouts, and the async callback protocol.
/// Calls from several threads are only safe when the implementation is.
pub trait Transport {
	/// Run `script` with already-encoded `args` and return its result value.
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError>;
}

impl<T: Transport + ?Sized> Transport for &T {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError> {
		(**self).invoke(kind, script, args)
	}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError> {
		(**self).invoke(kind, script, args)
	}
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError> {
		(**self).invoke(kind, script, args)
	}
}
