//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

mod scripted;
mod server;

/// In-memory transport answering from per-script handlers.
pub use scripted::{RecordedCall, ScriptedTransport};
/// One-shot HTTP server standing in for a WebDriver remote end.
pub use server::{CapturedRequest, FakeWebDriver};

/// Wrap a synchronous script body so it completes through the async callback.
///
/// The body runs with the caller's arguments (callback removed) on a later
/// tick; its return value is handed to the callback.
pub fn async_script(body: &str) -> String {
	format!(
		"var args = Array.prototype.slice.call(arguments, 0);\
		 var callback = args.pop();\
		 setTimeout(function(){{\
		 var result = (function(){{{body}}}).apply(this, args);\
		 callback(result)\
		 }}, 0);"
	)
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}
