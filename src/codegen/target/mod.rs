//! Output targets: one per emitted format.
//!
//! Every enabled target goes through the same lifecycle: `init` once with
//! the check reports, `compile` once per translation (possibly from
//! several threads at once), then `finish` once after every compilation.

mod common;
mod dts;
mod ts;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use enum_dispatch::enum_dispatch;
use rayon::prelude::*;

pub use common::{generated_notice, translation_interface};
pub use dts::DtsTarget;
pub use ts::TsTarget;

use crate::checks::AllReports;
use crate::core::extract::SourcedTranslation;
use crate::error::{ErrorKind, TmError};
use crate::model::Translation;

/// Settings shared by every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOptions {
    pub ts_dir: Option<PathBuf>,
    pub dts_dir: Option<PathBuf>,
    pub interface_name: String,
    pub elz_instance_name: String,
    pub static_default: bool,
    /// Name and version written in the generated notice.
    pub tool: String,
}

/// A file written by a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub target: &'static str,
    pub name: String,
    /// Keys without a translation in this file.
    pub missing: usize,
    pub total: usize,
}

#[enum_dispatch]
pub trait OutputTarget {
    fn label(&self) -> &'static str;

    fn init(&mut self, reports: Arc<AllReports>) -> Result<()>;

    /// Compiles one translation. `source` is the path of its file, as
    /// shown in generated code.
    fn compile(&self, translation: &Translation, source: &str) -> Result<Option<EmittedFile>>;

    fn finish(&mut self) -> Result<Vec<EmittedFile>>;
}

#[enum_dispatch(OutputTarget)]
#[derive(Debug)]
pub enum Target {
    TsTarget,
    DtsTarget,
}

pub(crate) fn require_reports(reports: &Option<Arc<AllReports>>) -> Result<Arc<AllReports>> {
    match reports {
        Some(reports) => Ok(Arc::clone(reports)),
        None => Err(TmError::internal("Reports were unavailable during compilation").into()),
    }
}

/// The enabled targets, in a fixed order.
#[derive(Debug)]
pub struct Targets {
    targets: Vec<Target>,
}

impl Targets {
    /// Builds every enabled target. Fails if none is enabled.
    pub fn from_options(options: &TargetOptions) -> Result<Self> {
        let builders: [fn(&TargetOptions) -> Option<Target>; 2] = [
            |options| TsTarget::build(options).map(Target::from),
            |options| DtsTarget::build(options).map(Target::from),
        ];
        let targets: Vec<Target> = builders.iter().filter_map(|build| build(options)).collect();

        if targets.is_empty() {
            bail!(TmError::new(
                ErrorKind::Config,
                "No output format is enabled. Set 'output.ts' or 'output.dts' in .elziirc.json."
            ));
        }
        Ok(Self { targets })
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.targets.iter().map(OutputTarget::label).collect()
    }

    pub fn init(&mut self, reports: &Arc<AllReports>) -> Result<()> {
        for target in &mut self.targets {
            target.init(Arc::clone(reports))?;
        }
        Ok(())
    }

    /// Compiles every translation with every target, in parallel.
    ///
    /// Returned files are ordered by translation, then by target.
    pub fn compile_all(
        &self,
        translations: &[(SourcedTranslation, String)],
    ) -> Result<Vec<EmittedFile>> {
        let compiled: Vec<Vec<EmittedFile>> = translations
            .par_iter()
            .map(|(sourced, source)| -> Result<Vec<EmittedFile>> {
                let mut files = Vec::new();
                for target in &self.targets {
                    if let Some(file) = target.compile(&sourced.translation, source)? {
                        files.push(file);
                    }
                }
                Ok(files)
            })
            .collect::<Result<_>>()?;
        Ok(compiled.into_iter().flatten().collect())
    }

    pub fn finish(&mut self) -> Result<Vec<EmittedFile>> {
        let mut files = Vec::new();
        for target in &mut self.targets {
            files.extend(target.finish()?);
        }
        Ok(files)
    }
}
