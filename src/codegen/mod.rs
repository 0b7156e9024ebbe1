//! Code generation: syntax tree, printer and output targets.

pub mod ast;
pub mod output_dir;
pub mod placeholders;
pub mod printer;
pub mod target;

pub use target::{EmittedFile, OutputTarget, Target, TargetOptions, Targets};
