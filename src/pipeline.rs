//! The compile pipeline shared by `check` and `release`.
//!
//! load (parallel) -> checks (sequential, path order) -> gate -> compile
//! (parallel) -> finish.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;

use crate::checks::{AllReports, run_checks};
use crate::codegen::{EmittedFile, TargetOptions, Targets};
use crate::core::context::ProjectContext;
use crate::core::extract::{SourcedTranslation, extract_translations};
use crate::issues::{Issue, LocaleCollisionIssue};
use crate::utils::to_identifier;

/// Result of loading and checking every translation.
#[derive(Debug)]
pub struct CheckRun {
    pub issues: Vec<Issue>,
    pub translations: Vec<SourcedTranslation>,
    /// Only present when code can be generated.
    pub reports: Option<Arc<AllReports>>,
    pub files_found: usize,
}

impl CheckRun {
    pub fn can_generate(&self) -> bool {
        self.reports.is_some()
    }
}

#[derive(Debug)]
pub struct ReleaseRun {
    pub check: CheckRun,
    /// Targets that were enabled, in generation order.
    pub targets: Vec<&'static str>,
    /// Empty when the checks blocked generation.
    pub emitted: Vec<EmittedFile>,
}

/// Loads and checks the translations of the project.
pub fn check(ctx: &ProjectContext) -> Result<CheckRun> {
    let extraction = extract_translations(&ctx.translations_dir, &ctx.ignores)?;
    let files_found = extraction.files_found();

    if ctx.verbose {
        eprintln!(
            "Loaded {} translation file(s), {} excluded",
            files_found,
            extraction.excluded.len()
        );
    }

    let mut issues: Vec<Issue> = extraction
        .problems
        .into_iter()
        .map(|mut problem| {
            problem.path = ctx.display_path(&problem.path).into();
            Issue::from(problem)
        })
        .collect();

    let translations = drop_colliding_locales(ctx, extraction.translations, &mut issues);

    // A file with a parse error takes no part in the checks
    let outcome = run_checks(translations.iter().map(|s| &s.translation));
    issues.extend(outcome.issues);

    Ok(CheckRun {
        issues,
        translations,
        reports: outcome.reports,
        files_found,
    })
}

/// Keeps the first translation (in path order) for each generated name.
fn drop_colliding_locales(
    ctx: &ProjectContext,
    translations: Vec<SourcedTranslation>,
    issues: &mut Vec<Issue>,
) -> Vec<SourcedTranslation> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut kept = Vec::with_capacity(translations.len());

    for sourced in translations {
        let identifier = to_identifier(&sourced.translation.id);
        match seen.get(&identifier) {
            Some(first) => issues.push(Issue::LocaleCollision(LocaleCollisionIssue {
                file_path: ctx.display_path(&sourced.source),
                locale: sourced.translation.id.clone(),
                kept: first.clone(),
                identifier,
            })),
            None => {
                seen.insert(identifier, sourced.translation.id.clone());
                kept.push(sourced);
            }
        }
    }
    kept
}

/// Checks the project, then writes every enabled output.
///
/// Nothing is written when the checks fail.
pub fn release(ctx: &ProjectContext, options: &TargetOptions) -> Result<ReleaseRun> {
    // Configuration problems come before any file is read
    let mut targets = Targets::from_options(options)?;
    let labels = targets.labels();
    let check = check(ctx)?;

    let Some(reports) = check.reports.clone() else {
        if ctx.verbose {
            eprintln!("Checks failed, no file was generated");
        }
        return Ok(ReleaseRun {
            check,
            targets: labels,
            emitted: Vec::new(),
        });
    };

    if ctx.verbose {
        eprintln!(
            "Compiling {} translation(s) for {}",
            check.translations.len(),
            labels.join(", ")
        );
    }

    let sources: Vec<(SourcedTranslation, String)> = check
        .translations
        .iter()
        .map(|sourced| (sourced.clone(), ctx.display_path(&sourced.source)))
        .collect();

    targets.init(&reports)?;
    let mut emitted = targets.compile_all(&sources)?;
    emitted.extend(targets.finish()?);

    Ok(ReleaseRun {
        check,
        targets: labels,
        emitted,
    })
}
