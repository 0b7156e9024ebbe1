//! A standalone declaration file holding the locale interface.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;

use super::common::{generated_notice, translation_interface};
use super::{EmittedFile, OutputTarget, TargetOptions, require_reports};
use crate::checks::AllReports;
use crate::codegen::ast::{Program, Statement};
use crate::codegen::output_dir::{DTS_EXTENSION, GeneratedKind, OutputDirectory};
use crate::codegen::printer::print_program;
use crate::model::Translation;

#[derive(Debug)]
pub struct DtsTarget {
    output: OutputDirectory,
    interface_name: String,
    tool: String,
    reports: Option<Arc<AllReports>>,
    sources: Mutex<Vec<String>>,
}

impl DtsTarget {
    /// Returns `None` when the declaration output is disabled.
    pub fn build(options: &TargetOptions) -> Option<Self> {
        let dir = options.dts_dir.as_ref()?;
        Some(Self {
            output: OutputDirectory::new(dir, GeneratedKind::Declaration),
            interface_name: options.interface_name.clone(),
            tool: options.tool.clone(),
            reports: None,
            sources: Mutex::new(Vec::new()),
        })
    }
}

impl OutputTarget for DtsTarget {
    fn label(&self) -> &'static str {
        "DTS"
    }

    fn init(&mut self, reports: Arc<AllReports>) -> Result<()> {
        self.reports = Some(reports);
        self.output.resolve()
    }

    /// Only records the source. The interface is the same for every
    /// translation.
    fn compile(&self, _translation: &Translation, source: &str) -> Result<Option<EmittedFile>> {
        self.sources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source.to_string());
        Ok(None)
    }

    fn finish(&mut self) -> Result<Vec<EmittedFile>> {
        let reports = require_reports(&self.reports)?;
        let sources = self.sources.get_mut().unwrap_or_else(PoisonError::into_inner);
        sources.sort();

        let program = Program {
            comments: vec![generated_notice(&self.tool, sources)],
            body: vec![Statement::ExportNamed(translation_interface(
                &self.interface_name,
                &reports,
            ))],
        };
        let file_name = format!("{}{}", self.interface_name, DTS_EXTENSION);
        self.output.write_file(&file_name, &print_program(&program))?;
        self.output.clean_up(&BTreeSet::from([file_name.clone()]))?;

        Ok(vec![EmittedFile {
            target: self.label(),
            name: file_name,
            missing: 0,
            total: reports.missing.all_keys_count(),
        }])
    }
}
