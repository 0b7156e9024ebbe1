//! Elzii tools - compiler for `.tm` translation files
//!
//! Reads one `.tm` file per locale, checks that the locales agree with each
//! other, then generates TypeScript modules for the elzii runtime.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (args, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Run context, `.tm` parser and extraction of translations
//! - `model`: Domain types (translations, messages, parameters)
//! - `checks`: Cross-locale checks and the reports code generation reads
//! - `codegen`: TypeScript syntax tree, printer and output targets
//! - `pipeline`: load, check, gate and compile
//! - `issues`: Issue type definitions and reporting
//! - `error`: Domain error kinds and error accumulation
//! - `utils`: Shared utility functions

pub mod checks;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod model;
pub mod pipeline;
pub mod utils;
