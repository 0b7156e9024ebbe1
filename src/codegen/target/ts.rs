//! One TypeScript module per translation, plus an index module.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;

use super::common::{
    ClassBuilder, FORMATTER_CLASS, LOCALE_SELECTOR_CLASS, MAKE_PROXY_METHOD, RUNTIME_MODULE,
    generated_notice, translation_interface,
};
use super::{EmittedFile, OutputTarget, TargetOptions, require_reports};
use crate::checks::AllReports;
use crate::codegen::ast::*;
use crate::codegen::output_dir::{GeneratedKind, OutputDirectory, TS_EXTENSION};
use crate::codegen::placeholders::{CacheKeyGenerator, UserCodeInsertion};
use crate::codegen::printer::print_program;
use crate::model::Translation;
use crate::utils::to_identifier;

const INDEX_MODULE: &str = "index";

#[derive(Debug, Clone)]
struct CompiledLocale {
    id: String,
    class_name: String,
    file_name: String,
    is_reference: bool,
}

#[derive(Debug, Default)]
struct CompileState {
    sources: Vec<String>,
    locales: Vec<CompiledLocale>,
}

#[derive(Debug)]
pub struct TsTarget {
    output: OutputDirectory,
    interface_name: String,
    elz_instance_name: String,
    static_default: bool,
    tool: String,
    reports: Option<Arc<AllReports>>,
    cache_keys: Mutex<CacheKeyGenerator>,
    state: Mutex<CompileState>,
}

impl TsTarget {
    /// Returns `None` when the TS output is disabled.
    pub fn build(options: &TargetOptions) -> Option<Self> {
        let dir = options.ts_dir.as_ref()?;
        Some(Self {
            output: OutputDirectory::new(dir, GeneratedKind::TypeScript),
            interface_name: options.interface_name.clone(),
            elz_instance_name: options.elz_instance_name.clone(),
            static_default: options.static_default,
            tool: options.tool.clone(),
            reports: None,
            cache_keys: Mutex::new(CacheKeyGenerator::new()),
            state: Mutex::new(CompileState::default()),
        })
    }

    fn class_name(&self, translation_id: &str) -> String {
        to_identifier(&format!("{}_{}", translation_id, self.interface_name))
    }

    fn translation_module(&self, translation: &Translation, source: &str) -> Result<String> {
        let reports = require_reports(&self.reports)?;
        let mut insertion = UserCodeInsertion::new();
        let mut builder = ClassBuilder {
            reports: &reports,
            insertion: &mut insertion,
            cache_keys: &self.cache_keys,
        };

        let mut body = vec![
            import(RUNTIME_MODULE, &[FORMATTER_CLASS]),
            import(".", &[self.interface_name.as_str()]),
        ];
        if let Some(header) = &translation.header {
            body.push(Statement::Expression(builder.placeholder(header.clone())));
        }
        let class_name = self.class_name(&translation.id);
        body.push(Statement::ExportDefault(Exported::Declaration(
            builder.translation_class(translation, &class_name, &self.interface_name),
        )));

        let program = Program {
            comments: vec![generated_notice(&self.tool, &[source.to_string()])],
            body,
        };
        Ok(insertion.process(&print_program(&program)))
    }

    fn index_module(&self, state: &CompileState, reports: &AllReports) -> String {
        let mut body = vec![import(RUNTIME_MODULE, &[LOCALE_SELECTOR_CLASS])];

        let mut locales = Vec::new();
        for locale in &state.locales {
            let path = format!("./{}", locale.class_name);
            let messages = if locale.is_reference && self.static_default {
                body.push(import_default(path, locale.class_name.as_str()));
                object(vec![("static", identifier(locale.class_name.as_str()))])
            } else {
                arrow(vec![], Expression::DynamicImport(path))
            };
            locales.push(object(vec![
                ("id", literal(locale.id.as_str())),
                ("messages", messages),
            ]));
        }

        body.push(Statement::ExportNamed(translation_interface(
            &self.interface_name,
            reports,
        )));

        let mut selector_config = vec![("locales", Expression::Array(locales))];
        if let Some(reference) = reports.missing.reference() {
            selector_config.push(("default", literal(reference)));
        }
        body.push(Statement::ExportNamed(Declaration::Const {
            name: self.elz_instance_name.clone(),
            value: Expression::New {
                callee: LOCALE_SELECTOR_CLASS.to_string(),
                type_arguments: vec![type_reference(self.interface_name.as_str())],
                arguments: vec![object(selector_config)],
            },
        }));
        body.push(Statement::ExportDefault(Exported::Expression(call(
            member(identifier(self.elz_instance_name.as_str()), MAKE_PROXY_METHOD),
            vec![],
        ))));

        print_program(&Program {
            comments: vec![generated_notice(&self.tool, &state.sources)],
            body,
        })
    }
}

impl OutputTarget for TsTarget {
    fn label(&self) -> &'static str {
        "TS"
    }

    fn init(&mut self, reports: Arc<AllReports>) -> Result<()> {
        self.reports = Some(reports);
        self.output.resolve()
    }

    fn compile(&self, translation: &Translation, source: &str) -> Result<Option<EmittedFile>> {
        let code = self.translation_module(translation, source)?;
        let class_name = self.class_name(&translation.id);
        let file_name = format!("{}{}", class_name, TS_EXTENSION);
        self.output.write_file(&file_name, &code)?;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.sources.push(source.to_string());
        state.locales.push(CompiledLocale {
            id: translation.id.clone(),
            class_name,
            file_name: file_name.clone(),
            is_reference: translation.is_reference(),
        });

        let reports = require_reports(&self.reports)?;
        let missing = &reports.missing;
        Ok(Some(EmittedFile {
            target: self.label(),
            name: file_name,
            missing: missing.missing_keys_count_in(&translation.id),
            total: missing.all_keys_count(),
        }))
    }

    fn finish(&mut self) -> Result<Vec<EmittedFile>> {
        let reports = require_reports(&self.reports)?;
        let mut state = std::mem::take(
            self.state
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        // Compilation order is not deterministic
        state.sources.sort();
        state.locales.sort_by(|a, b| a.id.cmp(&b.id));

        let file_name = format!("{}{}", INDEX_MODULE, TS_EXTENSION);
        let code = self.index_module(&state, &reports);
        self.output.write_file(&file_name, &code)?;

        let mut keep: BTreeSet<String> = state
            .locales
            .into_iter()
            .map(|locale| locale.file_name)
            .collect();
        keep.insert(file_name.clone());
        self.output.clean_up(&keep)?;

        Ok(vec![EmittedFile {
            target: self.label(),
            name: file_name,
            missing: 0,
            total: 0,
        }])
    }
}
