use clap::ValueEnum;
use jsmarshal::js::{ConversionError, ConversionKind, ElementRef, Encode, FieldPath, JsExecutor, Result, Transport, Value};

use crate::cmd::util::{Connection, ScriptSource, emit_json, executor, load_script, parse_args};


/// Native type the result must decode into before it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpectKind {
	Any,
	String,
	Integer,
	Number,
	Bool,
	Element,
	Array,
}

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub connection: Connection,
	#[command(flatten)]
	pub source: ScriptSource,
	/// Script argument as JSON; repeat for more.
	#[arg(long = "arg")]
	pub args: Vec<String>,
	/// Complete through the callback appended as the last argument.
	#[arg(long = "async")]
	pub is_async: bool,
	/// Decode the result as this type and fail on mismatch.
	#[arg(long, value_enum, default_value_t = ExpectKind::Any)]
	pub expect: ExpectKind,
	/// Print only the sub-value at this path, e.g. `$.rows[0].id`.
	#[arg(long)]
	pub select: Option<String>,
}

/// Evaluate a script and print its result as compact JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		connection,
		source,
		args,
		is_async,
		expect,
		select,
	} = args;

	let select = select.as_deref().map(FieldPath::parse).transpose()?;
	let script = load_script(source)?;
	let script_args = parse_args(&args)?;
	let js = executor(&connection)?;

	let result = evaluate(&js, &script, &script_args, is_async)?;
	let output = shape_output(&result, select.as_ref(), expect)?;
	emit_json(&output);
	Ok(())
}

fn evaluate<T: Transport>(js: &JsExecutor<T>, script: &str, args: &jsmarshal::js::Args<'_>, is_async: bool) -> Result<Value> {
	if is_async { js.eval_async(script, args) } else { js.eval(script, args) }
}

/// Apply `--select` and then `--expect` to a raw result.
pub(crate) fn shape_output(result: &Value, select: Option<&FieldPath>, expect: ExpectKind) -> Result<Value> {
	let selected = match select {
		Some(path) => result.select(path).ok_or_else(|| ConversionError::from(ConversionKind::MissingField { field: path.to_string() }))?,
		None => result,
	};
	Ok(coerce(selected, expect)?)
}

fn coerce(value: &Value, expect: ExpectKind) -> std::result::Result<Value, ConversionError> {
	Ok(match expect {
		ExpectKind::Any => value.clone(),
		ExpectKind::String => value.decode::<String>()?.encode(),
		ExpectKind::Integer => value.decode::<i64>()?.encode(),
		ExpectKind::Number => value.decode::<f64>()?.encode(),
		ExpectKind::Bool => value.decode::<bool>()?.encode(),
		ExpectKind::Element => value.decode::<ElementRef>()?.encode(),
		ExpectKind::Array => Value::Array(value.decode::<Vec<Value>>()?),
	})
}
