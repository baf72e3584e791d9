use crate::js::{Args, CommandKind, Decode, ElementRef, Result, Transport, Value};

#[cfg(test)]
mod tests;

/// Runs scripts in the remote session and converts their results.
///
/// Synchronous variants complete when the script returns. Async variants
/// complete when the script calls the callback the transport appends as its
/// final argument; the calling thread blocks until then either way.
#[derive(Debug, Clone)]
pub struct JsExecutor<T> {
	transport: T,
}

impl<T: Transport> JsExecutor<T> {
	/// Wrap a transport.
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// Borrow the transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Unwrap the transport.
	pub fn into_inner(self) -> T {
		self.transport
	}

	/// Run `script` for its side effects and discard the result.
	pub fn execute(&self, script: &str, args: &Args<'_>) -> Result<()> {
		self.invoke(CommandKind::Execute, script, args)?;
		Ok(())
	}

	/// Run `script` and decode its `return` value as `R`.
	pub fn eval<R: Decode>(&self, script: &str, args: &Args<'_>) -> Result<R> {
		let value = self.invoke(CommandKind::Execute, script, args)?;
		decode_result(&value)
	}

	/// Run a callback-completing `script` for its side effects.
	pub fn execute_async(&self, script: &str, args: &Args<'_>) -> Result<()> {
		self.invoke(CommandKind::ExecuteAsync, script, args)?;
		Ok(())
	}

	/// Run a callback-completing `script` and decode the value passed to the callback.
	pub fn eval_async<R: Decode>(&self, script: &str, args: &Args<'_>) -> Result<R> {
		let value = self.invoke(CommandKind::ExecuteAsync, script, args)?;
		decode_result(&value)
	}

	/// Evaluate `script` to an element handle.
	pub fn eval_element(&self, script: &str, args: &Args<'_>) -> Result<ElementRef> {
		self.eval(script, args)
	}

	/// Evaluate a callback-completing `script` to an element handle.
	pub fn eval_element_async(&self, script: &str, args: &Args<'_>) -> Result<ElementRef> {
		self.eval_async(script, args)
	}

	fn invoke(&self, kind: CommandKind, script: &str, args: &Args<'_>) -> Result<Value> {
		let encoded = args.build();
		tracing::debug!("{} script ({} bytes, {} args)", kind, script.len(), encoded.len());

		match self.transport.invoke(kind, script, &encoded) {
			Ok(value) => {
				tracing::trace!("{} returned {}", kind, value.shape());
				Ok(value)
			}
			Err(err) => {
				tracing::debug!("{} failed: {}", kind, err);
				Err(err.into())
			}
		}
	}
}

fn decode_result<R: Decode>(value: &Value) -> Result<R> {
	R::decode(value).map_err(|err| {
		tracing::debug!("result conversion failed: {}", err);
		err.into()
	})
}
