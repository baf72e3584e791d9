//! WebDriver HTTP transport.
//!
//! Posts `{"script": ..., "args": [...]}` to the session's execute endpoints
//! and unwraps the `value` member of the reply. Both the W3C protocol and the
//! legacy JSON wire protocol are understood.

use std::borrow::Cow;
use std::io::Read;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::js::element::element_id;
use crate::js::{CommandKind, InvocationError, JsError, LEGACY_ELEMENT_KEY, Result, Transport, Value};


/// Wire dialect spoken by the remote end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
	/// W3C WebDriver: `/execute/sync` and `/execute/async`.
	#[default]
	W3c,
	/// Legacy JSON wire protocol: `/execute` and `/execute_async`.
	Legacy,
}

/// Where and how to reach an existing WebDriver session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebDriverConfig {
	/// Server root, e.g. `http://localhost:4444` or `http://host:4444/wd/hub`.
	pub base_url: String,
	/// Identifier of an already-created session.
	pub session_id: String,
	/// Wire dialect.
	pub protocol: Protocol,
	/// Per-request timeout. `None` waits indefinitely.
	pub timeout: Option<Duration>,
}

impl WebDriverConfig {
	/// W3C config with no timeout.
	pub fn new(base_url: impl Into<String>, session_id: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			session_id: session_id.into(),
			protocol: Protocol::default(),
			timeout: None,
		}
	}

	/// Check the config before any request is made.
	pub fn validate(&self) -> Result<()> {
		if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
			return Err(JsError::InvalidConfig {
				field: "base_url",
				reason: format!("expected an http(s) URL, got {:?}", self.base_url),
			});
		}
		if self.session_id.is_empty() || self.session_id.contains('/') {
			return Err(JsError::InvalidConfig {
				field: "session_id",
				reason: format!("not a session id: {:?}", self.session_id),
			});
		}
		Ok(())
	}

	/// Full URL of the endpoint serving `kind`.
	pub fn endpoint(&self, kind: CommandKind) -> String {
		let suffix = match (self.protocol, kind) {
			(Protocol::W3c, CommandKind::Execute) => "execute/sync",
			(Protocol::W3c, CommandKind::ExecuteAsync) => "execute/async",
			(Protocol::Legacy, CommandKind::Execute) => "execute",
			(Protocol::Legacy, CommandKind::ExecuteAsync) => "execute_async",
		};
		format!("{}/session/{}/{suffix}", self.base_url.trim_end_matches('/'), self.session_id)
	}
}

/// [`Transport`] that issues blocking HTTP requests to a WebDriver server.
#[derive(Debug, Clone)]
pub struct WebDriverTransport {
	config: WebDriverConfig,
}

impl WebDriverTransport {
	/// Validate `config` and build the transport.
	pub fn new(config: WebDriverConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { config })
	}

	/// Active configuration.
	pub fn config(&self) -> &WebDriverConfig {
		&self.config
	}
}

#[derive(Serialize)]
struct ScriptRequest<'a> {
	script: &'a str,
	args: &'a [Value],
}

#[derive(Deserialize)]
struct ScriptResponse {
	#[serde(default)]
	status: Option<i64>,
	#[serde(default)]
	value: Value,
}

impl Transport for WebDriverTransport {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> std::result::Result<Value, InvocationError> {
		let url = self.config.endpoint(kind);
		let args: Cow<'_, [Value]> = match self.config.protocol {
			Protocol::W3c => Cow::Borrowed(args),
			Protocol::Legacy => Cow::Owned(args.iter().map(with_legacy_element_keys).collect()),
		};
		let body = serde_json::to_vec(&ScriptRequest { script, args: &args })
			.map_err(|err| InvocationError::Protocol(format!("encode request: {err}")))?;

		tracing::debug!("POST {} ({} bytes)", url, body.len());
		let resp = ureq::post(url.as_str())
			.config()
			.http_status_as_error(false)
			.timeout_global(self.config.timeout)
			.build()
			.header("Content-Type", "application/json; charset=utf-8")
			.send(&body[..])
			.map_err(map_ureq_error)?;

		let status: u16 = resp.status().into();
		let mut reader = resp.into_body().into_reader();
		let mut buf = Vec::new();
		reader
			.read_to_end(&mut buf)
			.map_err(|err| InvocationError::Connection(format!("read response: {err}")))?;

		let result = parse_response(self.config.protocol, status, &buf);
		if let Err(err) = &result {
			tracing::warn!("{} {} failed: {}", kind, url, err);
		}
		result
	}
}

/// JSON wire servers only resolve elements by `ELEMENT`; add it next to the W3C key.
pub(crate) fn with_legacy_element_keys(value: &Value) -> Value {
	match value {
		Value::Array(items) => Value::Array(items.iter().map(with_legacy_element_keys).collect()),
		Value::Object(object) => match element_id(object) {
			Some(id) => {
				let mut object = object.clone();
				object.insert(LEGACY_ELEMENT_KEY.to_owned(), Value::String(id.to_owned()));
				Value::Object(object)
			}
			None => Value::Object(
				object
					.iter()
					.map(|(key, item)| (key.clone(), with_legacy_element_keys(item)))
					.collect(),
			),
		},
		other => other.clone(),
	}
}

fn map_ureq_error(err: ureq::Error) -> InvocationError {
	match err {
		ureq::Error::Timeout(_) => InvocationError::Timeout,
		other => InvocationError::Connection(other.to_string()),
	}
}

/// Unwrap a WebDriver reply body into the script result.
pub(crate) fn parse_response(protocol: Protocol, status: u16, body: &[u8]) -> std::result::Result<Value, InvocationError> {
	let parsed: ScriptResponse = match serde_json::from_slice(body) {
		Ok(parsed) => parsed,
		Err(_) if status >= 400 => return Err(http_error(status, body)),
		Err(err) => return Err(InvocationError::Protocol(format!("malformed response body: {err}"))),
	};

	if protocol == Protocol::Legacy
		&& let Some(code) = parsed.status.filter(|code| *code != 0)
	{
		return Err(remote_error(&parsed.value, legacy_status_name(code)));
	}

	if status >= 400 {
		if parsed.value.get("error").and_then(Value::as_str).is_some() {
			return Err(remote_error(&parsed.value, "unknown error"));
		}
		return Err(http_error(status, body));
	}

	Ok(parsed.value)
}

fn http_error(status: u16, body: &[u8]) -> InvocationError {
	InvocationError::Http {
		status,
		body: String::from_utf8_lossy(body).into_owned(),
	}
}

fn remote_error(value: &Value, fallback: &str) -> InvocationError {
	let error = value.get("error").and_then(Value::as_str).unwrap_or(fallback);
	let message = value.get("message").and_then(Value::as_str).unwrap_or_default();
	InvocationError::Remote {
		error: error.to_owned(),
		message: message.to_owned(),
	}
}

/// W3C error code for a legacy JSON wire status number.
fn legacy_status_name(code: i64) -> &'static str {
	match code {
		6 => "invalid session id",
		7 => "no such element",
		8 => "no such frame",
		9 => "unknown command",
		10 => "stale element reference",
		11 => "element not visible",
		12 => "invalid element state",
		15 => "element not selectable",
		17 => "javascript error",
		19 => "invalid selector",
		21 => "timeout",
		23 => "no such window",
		24 => "invalid cookie domain",
		25 => "unable to set cookie",
		26 => "unexpected alert open",
		27 => "no such alert",
		28 => "script timeout",
		29 => "invalid element coordinates",
		32 => "invalid selector",
		33 => "session not created",
		34 => "move target out of bounds",
		_ => "unknown error",
	}
}
