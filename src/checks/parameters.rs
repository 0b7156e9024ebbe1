//! Agreement of message parameters across locales.
//!
//! Every locale contributes one [`Signature`] per public message. Signatures
//! that describe compatible parameter sets are merged; incompatible ones are
//! kept side by side and fail the check.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::TranslationCheck;
use crate::issues::{Issue, ParameterMismatchIssue};
use crate::model::{MessageParameter, Translation, TypeHint};

/// The parameter shape of a message, and the translations that agree on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<MessageParameter>,
    pub used_in: BTreeSet<String>,
}

impl Signature {
    pub fn new(
        parameters: impl IntoIterator<Item = MessageParameter>,
        used_in: impl Into<String>,
    ) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
            used_in: BTreeSet::from([used_in.into()]),
        }
    }

    /// Merges `other` into `self` if one parameter set contains the other.
    ///
    /// The smaller side keeps its order (`self` on a tie) and the extra
    /// parameters of the larger side are appended. Returns false and leaves
    /// both sides untouched when each has parameters the other lacks.
    pub fn try_to_merge_with(&mut self, other: &Signature) -> bool {
        let only_in_self: Vec<&MessageParameter> = self
            .parameters
            .iter()
            .filter(|p| other.find(&p.name).is_none())
            .collect();
        let only_in_other: Vec<&MessageParameter> = other
            .parameters
            .iter()
            .filter(|p| self.find(&p.name).is_none())
            .collect();

        let (base, counterpart, extras) = match (only_in_self.is_empty(), only_in_other.is_empty())
        {
            (false, false) => return false,
            (true, _) => (&*self, other, only_in_other),
            (false, true) => (other, &*self, only_in_self),
        };

        let parameters: Vec<MessageParameter> = base
            .parameters
            .iter()
            .map(|p| {
                let hint = counterpart
                    .find(&p.name)
                    .map_or(TypeHint::None, |c| c.type_hint);
                MessageParameter::new(p.name.clone(), p.type_hint.merge(hint))
            })
            .chain(extras.into_iter().cloned())
            .collect();

        self.parameters = parameters;
        self.used_in.extend(other.used_in.iter().cloned());
        true
    }

    fn find(&self, name: &str) -> Option<&MessageParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// `(x, y: number) used in en, fr`
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match p.type_hint {
                TypeHint::None => p.name.clone(),
                hint => format!("{}: {}", p.name, hint),
            })
            .collect();
        let used_in: Vec<&str> = self.used_in.iter().map(String::as_str).collect();
        write!(
            f,
            "({}) used in {}",
            parameters.join(", "),
            used_in.join(", ")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParametersReport {
    signatures: BTreeMap<String, Signature>,
}

impl MessageParametersReport {
    pub fn signature_of(&self, key: &str) -> Option<&Signature> {
        self.signatures.get(key)
    }
}

#[derive(Debug, Default)]
pub struct MessageParametersCheck {
    buckets: BTreeMap<String, Vec<Signature>>,
}

impl MessageParametersCheck {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranslationCheck for MessageParametersCheck {
    type Report = MessageParametersReport;

    fn validate(&mut self, translation: &Translation, _issues: &mut Vec<Issue>) -> bool {
        let mut valid = true;

        for (key, message) in translation.public_messages() {
            let signature = Signature::new(message.parameters.iter().cloned(), &translation.id);
            let bucket = self.buckets.entry(key.clone()).or_default();

            if !bucket.iter_mut().any(|s| s.try_to_merge_with(&signature)) {
                valid &= bucket.is_empty();
                bucket.push(signature);
            }
        }

        valid
    }

    fn finalize(&mut self, issues: &mut Vec<Issue>) -> bool {
        let mut valid = true;
        for (key, bucket) in &self.buckets {
            if bucket.len() > 1 {
                valid = false;
                issues.push(Issue::ParameterMismatch(ParameterMismatchIssue {
                    key: key.clone(),
                    signatures: bucket.iter().map(Signature::to_string).collect(),
                }));
            }
        }
        valid
    }

    /// Keeps the first signature of every key. Only meaningful once
    /// `finalize` succeeded.
    fn into_report(self) -> MessageParametersReport {
        MessageParametersReport {
            signatures: self
                .buckets
                .into_iter()
                .filter_map(|(key, bucket)| Some((key, bucket.into_iter().next()?)))
                .collect(),
        }
    }
}
