#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;

#[derive(Parser)]
#[command(name = "jsmarshal", version, about = "Run JavaScript in an existing WebDriver session")]
struct Cli {
	/// Log filter when RUST_LOG is unset (trace, debug, info, warn, error).
	#[arg(long, global = true, default_value = "warn")]
	log_level: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Run a script for its side effects.
	Exec(cmd::exec::Args),
	/// Run a script and print its result as JSON.
	Eval(cmd::eval::Args),
}

fn main() {
	let cli = Cli::parse();
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(filter)
		.init();

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> jsmarshal::js::Result<()> {
	match command {
		Commands::Exec(args) => cmd::exec::run(args),
		Commands::Eval(args) => cmd::eval::run(args),
	}
}
