use jsmarshal::js::Result;

use crate::cmd::util::{Connection, ScriptSource, executor, load_script, parse_args};


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
}

/// Run a script and discard its result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		connection,
		source,
		args,
		is_async,
	} = args;

	let script = load_script(source)?;
	let script_args = parse_args(&args)?;
	let js = executor(&connection)?;

	if is_async {
		js.execute_async(&script, &script_args)
	} else {
		js.execute(&script, &script_args)
	}
}
