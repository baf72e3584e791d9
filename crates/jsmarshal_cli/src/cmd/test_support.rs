use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use jsmarshal_testkit::target_dir as workspace_target_dir;

static JSMARSHAL_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_jsmarshal(args: &[&str]) -> Output {
	Command::new(jsmarshal_bin())
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("jsmarshal command executes")
}

pub(crate) fn run_jsmarshal_json(args: &[&str]) -> serde_json::Value {
	let output = run_jsmarshal(args);
	assert!(
		output.status.success(),
		"jsmarshal command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn jsmarshal_bin() -> &'static PathBuf {
	JSMARSHAL_BIN.get_or_init(resolve_jsmarshal_bin)
}

fn resolve_jsmarshal_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_jsmarshal") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "jsmarshal.exe" } else { "jsmarshal" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "jsmarshal"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build jsmarshal binary at {}", bin.display());

	bin
}
