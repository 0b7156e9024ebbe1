//! Parsers for translation source files.
//!
//! - `tm`: the `.tm` message format (comments, header, directives, messages)

pub mod tm;
