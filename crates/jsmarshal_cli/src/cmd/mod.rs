/// Run a script and print its decoded result.
pub mod eval;
/// Run a script for its side effects.
pub mod exec;

#[cfg(test)]
mod test_support;
pub(crate) mod util;
