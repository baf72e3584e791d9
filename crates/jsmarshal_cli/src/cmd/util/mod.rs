use std::path::PathBuf;
use std::time::Duration;

use jsmarshal::js::{Args as ScriptArgs, JsError, JsExecutor, Protocol, Result, Value, WebDriverConfig, WebDriverTransport};

#[cfg(test)]
mod tests;

/// Where the session lives.
#[derive(clap::Args)]
pub struct Connection {
	/// WebDriver server root, e.g. http://localhost:4444.
	#[arg(long, default_value = "http://localhost:4444")]
	pub url: String,
	/// Existing session id.
	#[arg(long)]
	pub session: String,
	/// Speak the legacy JSON wire protocol.
	#[arg(long)]
	pub legacy: bool,
	/// Per-request timeout in milliseconds.
	#[arg(long = "timeout-ms")]
	pub timeout_ms: Option<u64>,
}

/// What to run and with which arguments.
#[derive(clap::Args)]
#[group(id = "source", required = true, multiple = false)]
pub struct ScriptSource {
	/// Inline script body.
	#[arg(long)]
	pub script: Option<String>,
	/// Read the script body from a file.
	#[arg(long)]
	pub file: Option<PathBuf>,
}

/// Build a validated transport config from CLI options.
pub(crate) fn webdriver_config(connection: &Connection) -> WebDriverConfig {
	WebDriverConfig {
		protocol: if connection.legacy { Protocol::Legacy } else { Protocol::W3c },
		timeout: connection.timeout_ms.map(Duration::from_millis),
		..WebDriverConfig::new(connection.url.clone(), connection.session.clone())
	}
}

/// Connect an executor to the configured session.
pub(crate) fn executor(connection: &Connection) -> Result<JsExecutor<WebDriverTransport>> {
	let transport = WebDriverTransport::new(webdriver_config(connection))?;
	Ok(JsExecutor::new(transport))
}

/// Inline script text, or the contents of `--file`.
pub(crate) fn load_script(source: ScriptSource) -> Result<String> {
	match (source.script, source.file) {
		(Some(script), _) => Ok(script),
		(None, Some(path)) => {
			tracing::debug!("reading script from {}", path.display());
			Ok(std::fs::read_to_string(path)?)
		}
		(None, None) => Err(JsError::InvalidArgument {
			value: String::new(),
			reason: "one of --script or --file is required".to_owned(),
		}),
	}
}

/// Parse one `--arg` value as JSON.
pub(crate) fn parse_arg(text: &str) -> Result<Value> {
	Value::parse(text).map_err(|err| JsError::InvalidArgument {
		value: text.to_owned(),
		reason: err.to_string(),
	})
}

/// Parse every `--arg` into a script argument list, preserving order.
pub(crate) fn parse_args(texts: &[String]) -> Result<ScriptArgs<'static>> {
	let mut args = ScriptArgs::new();
	for text in texts {
		args.push(parse_arg(text)?);
	}
	Ok(args)
}

/// Print `value` as compact JSON on stdout.
pub(crate) fn emit_json(value: &Value) {
	println!("{value}");
}
