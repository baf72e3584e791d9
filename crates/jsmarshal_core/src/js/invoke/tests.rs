use std::cell::RefCell;

use crate::js::{
	Args, CommandKind, ConversionKind, ElementRef, Encode, InvocationError, JsError, JsExecutor, Shape, Transport, Value,
};

/// Records every call and answers with a fixed result.
struct Recorder {
	reply: Value,
	calls: RefCell<Vec<(CommandKind, String, Vec<Value>)>>,
}

impl Recorder {
	fn replying(reply: Value) -> Self {
		Self {
			reply,
			calls: RefCell::new(Vec::new()),
		}
	}
}

impl Transport for Recorder {
	fn invoke(&self, kind: CommandKind, script: &str, args: &[Value]) -> Result<Value, InvocationError> {
		self.calls.borrow_mut().push((kind, script.to_owned(), args.to_vec()));
		Ok(self.reply.clone())
	}
}

struct Failing;

impl Transport for Failing {
	fn invoke(&self, _kind: CommandKind, _script: &str, _args: &[Value]) -> Result<Value, InvocationError> {
		Err(InvocationError::Remote {
			error: "no such window".into(),
			message: "window was closed".into(),
		})
	}
}

#[test]
fn execute_targets_sync_endpoint_and_discards_result() {
	let executor = JsExecutor::new(Recorder::replying(Value::from("ignored")));
	executor
		.execute("document.title = arguments[0]", &Args::new().arg("abc"))
		.expect("execute succeeds");

	let calls = executor.transport().calls.borrow();
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].0, CommandKind::Execute);
	assert_eq!(calls[0].1, "document.title = arguments[0]");
	assert_eq!(calls[0].2, vec![Value::from("abc")]);
}

#[test]
fn eval_decodes_requested_type() {
	let executor = JsExecutor::new(Recorder::replying(Value::from("abc")));
	let title: String = executor.eval("return 'abc'", &Args::new()).expect("eval succeeds");
	assert_eq!(title, "abc");

	let executor = JsExecutor::new(Recorder::replying(vec![123_i32, 456].encode()));
	let numbers: Vec<i32> = executor.eval("return [123, 456]", &Args::new()).expect("eval succeeds");
	assert_eq!(numbers, vec![123, 456]);
}

#[test]
fn async_variants_select_async_endpoint_and_decode_alike() {
	let executor = JsExecutor::new(Recorder::replying(Value::I64(123)));

	let value: i32 = executor.eval_async("callback(123)", &Args::new()).expect("async eval succeeds");
	executor.execute_async("callback()", &Args::new()).expect("async execute succeeds");

	assert_eq!(value, 123);
	let kinds: Vec<CommandKind> = executor.transport().calls.borrow().iter().map(|call| call.0).collect();
	assert_eq!(kinds, vec![CommandKind::ExecuteAsync, CommandKind::ExecuteAsync]);
}

#[test]
fn eval_element_returns_handle() {
	let element = ElementRef::new("e-42");
	let executor = JsExecutor::new(Recorder::replying(element.encode()));

	assert_eq!(executor.eval_element("return el", &Args::new()).expect("element"), element);
	assert_eq!(executor.eval_element_async("cb(el)", &Args::new()).expect("element"), element);
}

#[test]
fn shape_mismatch_surfaces_as_conversion_error() {
	let executor = JsExecutor::new(Recorder::replying(Value::Array(vec![])));
	let err = executor.eval::<i32>("return []", &Args::new()).expect_err("array is not an i32");

	match err {
		JsError::Conversion(err) => assert_eq!(
			err.kind,
			ConversionKind::Mismatch {
				expected: "i32",
				actual: Shape::Array,
			}
		),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn transport_failure_is_forwarded_unchanged() {
	let executor = JsExecutor::new(Failing);
	let err = executor.execute("return 1", &Args::new()).expect_err("transport fails");

	assert!(matches!(
		err,
		JsError::Invocation(InvocationError::Remote { ref error, .. }) if error == "no such window"
	));
}

#[test]
fn borrowed_transport_works() {
	let recorder = Recorder::replying(Value::Bool(true));
	let executor = JsExecutor::new(&recorder);

	assert!(executor.eval::<bool>("return true", &Args::new()).expect("eval succeeds"));
	assert_eq!(recorder.calls.borrow().len(), 1);
}
