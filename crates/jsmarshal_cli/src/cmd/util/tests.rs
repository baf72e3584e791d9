use std::time::Duration;

use jsmarshal::js::{JsError, Protocol, Value};

use super::{Connection, ScriptSource, load_script, parse_arg, parse_args, webdriver_config};

fn connection() -> Connection {
	Connection {
		url: "http://localhost:4444".to_owned(),
		session: "abc".to_owned(),
		legacy: false,
		timeout_ms: None,
	}
}

#[test]
fn arg_json_keeps_number_kind() {
	assert_eq!(parse_arg("21").expect("int"), Value::I64(21));
	assert_eq!(parse_arg("21.0").expect("float"), Value::F64(21.0));
	assert_eq!(parse_arg(r#""abc""#).expect("string"), Value::from("abc"));
}

#[test]
fn bare_words_are_rejected() {
	let err = parse_arg("abc").expect_err("not json");
	assert!(matches!(err, JsError::InvalidArgument { ref value, .. } if value == "abc"));
}

#[test]
fn args_preserve_order() {
	let args = parse_args(&["1".to_owned(), "true".to_owned(), "[2]".to_owned()]).expect("args");
	assert_eq!(
		args.build(),
		vec![Value::I64(1), Value::Bool(true), Value::Array(vec![Value::I64(2)])]
	);
}

#[test]
fn config_follows_flags() {
	let mut options = connection();
	assert_eq!(webdriver_config(&options).protocol, Protocol::W3c);

	options.legacy = true;
	options.timeout_ms = Some(1500);
	let config = webdriver_config(&options);
	assert_eq!(config.protocol, Protocol::Legacy);
	assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
	assert_eq!(config.session_id, "abc");
}

#[test]
fn script_loads_inline_or_from_file() {
	let inline = ScriptSource {
		script: Some("return 1".to_owned()),
		file: None,
	};
	assert_eq!(load_script(inline).expect("inline"), "return 1");

	let path = std::env::temp_dir().join(format!("jsmarshal-script-{}.js", std::process::id()));
	std::fs::write(&path, "return 2").expect("write script");
	let from_file = ScriptSource {
		script: None,
		file: Some(path.clone()),
	};
	assert_eq!(load_script(from_file).expect("file"), "return 2");
	let _ = std::fs::remove_file(path);
}

#[test]
fn missing_file_is_io_error() {
	let source = ScriptSource {
		script: None,
		file: Some("/nonexistent/jsmarshal/script.js".into()),
	};
	assert!(matches!(load_script(source), Err(JsError::Io(_))));
}
