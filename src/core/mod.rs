//! Loading of translation files.
//!
//! - `context`: settings of one run (CLI > config file > defaults)
//! - `parsers`: the `.tm` file format
//! - `extract`: from parsed files to domain translations

pub mod context;
pub mod extract;
pub mod parsers;
