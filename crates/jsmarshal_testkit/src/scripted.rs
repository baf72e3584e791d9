use std::collections::HashMap;
use std::sync::Mutex;

use jsmarshal::js::{CommandKind, InvocationError, Transport, Value};

type Handler = dyn Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync;

/// One call observed by a [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
	/// Endpoint the call targeted.
	pub kind: CommandKind,
	/// Script source as sent.
	pub script: String,
	/// Encoded arguments as sent.
	pub args: Vec<Value>,
}

/// Transport answering each `(kind, script)` pair from a registered handler.
///
/// Every call is recorded, including calls that fail. Scripts with no
/// handler go to the fallback, or fail with `unknown command` when none is set.
#[derive(Default)]
pub struct ScriptedTransport {
	handlers: HashMap<(CommandKind, String), Box<Handler>>,
	fallback: Option<Box<Handler>>,
	calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
	/// Transport with no handlers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Transport whose fallback returns the first argument, or `null`.
	pub fn echo() -> Self {
		Self::new().otherwise(|args| Ok(args.first().cloned().unwrap_or_default()))
	}

	/// Answer `script` sent to `kind` with `handler`.
	pub fn on<F>(mut self, kind: CommandKind, script: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		self.handlers.insert((kind, script.into()), Box::new(handler));
		self
	}

	/// Answer `script` sent to `kind` with a fixed value.
	pub fn returning(self, kind: CommandKind, script: impl Into<String>, value: Value) -> Self {
		self.on(kind, script, move |_| Ok(value.clone()))
	}

	/// Answer every unmatched call with `handler`.
	pub fn otherwise<F>(mut self, handler: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		self.fallback = Some(Box::new(handler));
		self
	}

	/// Snapshot of the calls seen so far.
	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().expect("call log lock").clone()
	}

	/// Most recent call.
	pub fn last_call(&self) -> Option<RecordedCall> {
		self.calls.lock().expect("call log lock").last().cloned()
	}
}

impl Transport for ScriptedTransport {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError> {
		self.calls.lock().expect("call log lock").push(RecordedCall {
			kind,
			script: script.to_owned(),
			args: args.to_vec(),
		});

		let handler = self.handlers.get(&(kind, script.to_owned())).or(self.fallback.as_ref());
		match handler {
			Some(handler) => handler(args),
			None => Err(InvocationError::Remote {
				error: "unknown command".to_owned(),
				message: format!("no handler for {kind} script {script:?}"),
			}),
		}
	}
}
