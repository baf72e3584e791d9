#![allow(missing_docs)]

use std::time::Duration;

use jsmarshal::args;
use jsmarshal::js::{
	Args, ElementRef, InvocationError, JsError, JsExecutor, Protocol, WebDriverConfig, WebDriverTransport,
};
use jsmarshal_testkit::FakeWebDriver;

fn executor(server: &FakeWebDriver, protocol: Protocol) -> JsExecutor<WebDriverTransport> {
	let config = WebDriverConfig {
		protocol,
		timeout: Some(Duration::from_secs(5)),
		..WebDriverConfig::new(server.url(), "sess-1")
	};
	JsExecutor::new(WebDriverTransport::new(config).expect("valid config"))
}

#[test]
fn w3c_eval_posts_script_and_args() {
	let server = FakeWebDriver::start("200 OK", r#"{"value":42}"#);
	let js = executor(&server, Protocol::W3c);

	let answer: i32 = js
		.eval("return arguments[0] + arguments[1]", &args![21, 21.0, "x"])
		.expect("eval succeeds");
	assert_eq!(answer, 42);

	let request = server.finish();
	assert_eq!(request.method, "POST");
	assert_eq!(request.path, "/session/sess-1/execute/sync");
	assert_eq!(
		String::from_utf8(request.body).expect("utf8 body"),
		r#"{"script":"return arguments[0] + arguments[1]","args":[21,21.0,"x"]}"#
	);
}

#[test]
fn w3c_async_targets_async_endpoint() {
	let element = ElementRef::new("abc-1");
	let server = FakeWebDriver::start("200 OK", r#"{"value":{"element-6066-11e4-a52e-4f735466cecf":"abc-1"}}"#);
	let js = executor(&server, Protocol::W3c);

	let found = js.eval_element_async("arguments[0](document.body)", &Args::new()).expect("element");
	assert_eq!(found, element);

	let request = server.finish();
	assert_eq!(request.path, "/session/sess-1/execute/async");
	assert_eq!(request.json()["args"], serde_json::json!([]));
}

#[test]
fn legacy_endpoints_and_status() {
	let server = FakeWebDriver::start("200 OK", r#"{"sessionId":"sess-1","status":0,"value":{"ELEMENT":"7"}}"#);
	let js = executor(&server, Protocol::Legacy);

	let found = js.eval_element("return document.body", &Args::new()).expect("element");
	assert_eq!(found.id(), "7");
	assert_eq!(server.finish().path, "/session/sess-1/execute");
}

#[test]
fn legacy_async_endpoint() {
	let server = FakeWebDriver::start("200 OK", r#"{"status":0,"value":null}"#);
	executor(&server, Protocol::Legacy)
		.execute_async("arguments[0]()", &Args::new())
		.expect("async execute");
	assert_eq!(server.finish().path, "/session/sess-1/execute_async");
}

#[test]
fn script_error_is_remote_invocation_error() {
	let server = FakeWebDriver::start(
		"500 Internal Server Error",
		r#"{"value":{"error":"javascript error","message":"x is not defined","stacktrace":""}}"#,
	);
	let err = executor(&server, Protocol::W3c)
		.execute("x()", &Args::new())
		.expect_err("script throws");
	server.finish();

	match err {
		JsError::Invocation(InvocationError::Remote { error, message }) => {
			assert_eq!(error, "javascript error");
			assert_eq!(message, "x is not defined");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn non_json_failure_keeps_status_and_body() {
	let server = FakeWebDriver::start_with_content_type("502 Bad Gateway", "text/plain", "upstream down");
	let err = executor(&server, Protocol::W3c)
		.execute("return 1", &Args::new())
		.expect_err("gateway failure");
	server.finish();

	assert!(matches!(
		err,
		JsError::Invocation(InvocationError::Http { status: 502, ref body }) if body == "upstream down"
	));
}

#[test]
fn unreachable_server_is_connection_error() {
	let port = {
		let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind");
		listener.local_addr().expect("local_addr").port()
	};
	let config = WebDriverConfig::new(format!("http://127.0.0.1:{port}"), "sess-1");
	let err = JsExecutor::new(WebDriverTransport::new(config).expect("valid config"))
		.execute("return 1", &Args::new())
		.expect_err("nothing listens");

	assert!(matches!(err, JsError::Invocation(InvocationError::Connection(_))));
}

#[test]
fn legacy_element_arguments_carry_element_key() {
	let server = FakeWebDriver::start("200 OK", r#"{"status":0,"value":null}"#);
	let input = ElementRef::new("e-1");
	executor(&server, Protocol::Legacy)
		.execute("arguments[0].value = arguments[1]", &args![&input, "abc"])
		.expect("execute");

	let request = server.finish();
	assert_eq!(request.path, "/session/sess-1/execute");
	assert_eq!(
		String::from_utf8(request.body).expect("utf8 body"),
		r#"{"script":"arguments[0].value = arguments[1]","args":[{"element-6066-11e4-a52e-4f735466cecf":"e-1","ELEMENT":"e-1"},"abc"]}"#
	);
}

#[test]
fn w3c_element_arguments_use_w3c_key_only() {
	let server = FakeWebDriver::start("200 OK", r#"{"value":null}"#);
	executor(&server, Protocol::W3c)
		.execute("arguments[0].click()", &args![ElementRef::new("e-1")])
		.expect("execute");

	let request = server.finish();
	assert_eq!(
		request.json()["args"],
		serde_json::json!([{"element-6066-11e4-a52e-4f735466cecf": "e-1"}])
	);
}
