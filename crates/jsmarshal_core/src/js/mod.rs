mod args;
mod decode;
mod element;
mod encode;
mod error;
mod invoke;
mod path;
mod transport;
mod value;
mod webdriver;

/// Argument list builder.
pub use args::Args;
/// Decoding trait, object field reader, and entry point.
pub use decode::{Decode, Fields, decode};
/// Remote element handle and its reserved wire keys.
pub use element::{ELEMENT_KEY, ElementRef, LEGACY_ELEMENT_KEY};
/// Encoding trait, object builder, and iterator helper.
pub use encode::{Encode, ObjectBuilder, encode_iter};
/// Error and result aliases.
pub use error::{ConversionError, ConversionKind, InvocationError, JsError, Result};
/// Remote script invoker.
pub use invoke::JsExecutor;
/// Field path types.
pub use path::{FieldPath, PathStep};
/// Transport boundary.
pub use transport::{CommandKind, Transport};
/// Wire value model.
pub use value::{Object, Shape, Value};
/// WebDriver HTTP transport and configuration.
pub use webdriver::{Protocol, WebDriverConfig, WebDriverTransport};
