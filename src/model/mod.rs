//! Domain model of translation files.
//!
//! A [`Translation`] is created once per source file and only changes when
//! message interpolations are resolved.

mod directives;
mod message;
mod parameters;
mod translation;
mod type_hint;
mod user_code;

pub use directives::{Directive, DirectiveCollection};
pub use message::{FORMATTER_ACCESSOR, Message, MessagePart, ParameterFormat, Visibility, normalize};
pub use parameters::{MessageParameter, MessageParameterSet};
pub use translation::Translation;
pub use type_hint::TypeHint;
pub use user_code::UserCode;
