//! Public library API for marshalling values into and out of remote WebDriver scripts.

/// Value model, encoding, decoding, argument lists, and script invocation.
pub mod js;
