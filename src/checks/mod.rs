//! Semantic checks run over the whole set of translations.
//!
//! Checks are stateful folds: translations are validated one by one in a
//! fixed order, then each check is finalized once and frozen into a report
//! that code generation reads.

pub mod missing;
pub mod parameters;

use std::sync::Arc;

use crate::issues::Issue;
use crate::model::Translation;

pub use missing::{MissingTranslationsCheck, MissingTranslationsReport};
pub use parameters::{MessageParametersCheck, MessageParametersReport, Signature};

pub trait TranslationCheck {
    type Report;

    /// Validates the next translation. Returns false if it breaks the check.
    fn validate(&mut self, translation: &Translation, issues: &mut Vec<Issue>) -> bool;

    /// Called once after every translation was validated.
    fn finalize(&mut self, issues: &mut Vec<Issue>) -> bool;

    fn into_report(self) -> Self::Report;
}

/// Everything code generation needs to know from the checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllReports {
    pub missing: MissingTranslationsReport,
    pub parameters: MessageParametersReport,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    /// Only present when the translations are valid as a whole.
    pub reports: Option<Arc<AllReports>>,
}

/// Runs every check over `translations`, in the given order.
pub fn run_checks<'a>(translations: impl IntoIterator<Item = &'a Translation>) -> CheckOutcome {
    let mut missing = MissingTranslationsCheck::new();
    let mut parameters = MessageParametersCheck::new();
    let mut issues = Vec::new();
    let mut valid = true;

    for translation in translations {
        valid &= missing.validate(translation, &mut issues);
        valid &= parameters.validate(translation, &mut issues);
    }

    valid &= missing.finalize(&mut issues);
    valid &= parameters.finalize(&mut issues);

    let reports = valid.then(|| {
        Arc::new(AllReports {
            missing: missing.into_report(),
            parameters: parameters.into_report(),
        })
    });

    CheckOutcome { issues, reports }
}
