//! Completeness of translations across locales.
//!
//! Translations are folded in order: a key first seen in translation N is
//! missing from translations 0..N, and every known key a translation lacks
//! is missing from it. At finalization the reference locale decides which
//! keys are obsolete.

use std::collections::{BTreeMap, BTreeSet};

use super::TranslationCheck;
use crate::issues::{
    DuplicateDefaultIssue, Issue, MissingTranslationIssue, ObsoleteTranslationIssue,
};
use crate::model::Translation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingTranslationsReport {
    all_keys: BTreeSet<String>,
    missing: BTreeMap<String, BTreeSet<String>>,
    reference: Option<String>,
}

impl MissingTranslationsReport {
    /// Every public key that is generated, sorted.
    pub fn all_keys(&self) -> impl Iterator<Item = &String> {
        self.all_keys.iter()
    }

    pub fn all_keys_count(&self) -> usize {
        self.all_keys.len()
    }

    pub fn missing_keys_in(&self, id: &str) -> impl Iterator<Item = &String> {
        self.missing.get(id).into_iter().flatten()
    }

    pub fn missing_keys_count_in(&self, id: &str) -> usize {
        self.missing.get(id).map_or(0, BTreeSet::len)
    }

    /// The translation marked `@default`, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct MissingTranslationsCheck {
    all_keys: BTreeSet<String>,
    /// Missing keys per translation id, in discovery order.
    missing: BTreeMap<String, Vec<String>>,
    /// Ids of the translations validated so far, in order.
    known_translations: Vec<String>,
    defined_in: BTreeMap<String, Vec<String>>,
    reference: Option<String>,
}

impl MissingTranslationsCheck {
    pub fn new() -> Self {
        Self::default()
    }

    fn found_missing_key(&mut self, id: &str, key: &str) {
        self.missing
            .entry(id.to_string())
            .or_default()
            .push(key.to_string());
    }
}

impl TranslationCheck for MissingTranslationsCheck {
    type Report = MissingTranslationsReport;

    fn validate(&mut self, translation: &Translation, issues: &mut Vec<Issue>) -> bool {
        let mut not_found = self.all_keys.clone();

        for (key, _) in translation.public_messages() {
            self.defined_in
                .entry(key.clone())
                .or_default()
                .push(translation.id.clone());

            if !not_found.remove(key) {
                // new key: missing from every translation seen before
                for id in self.known_translations.clone() {
                    self.found_missing_key(&id, key);
                }
                self.all_keys.insert(key.clone());
            }
        }

        for key in not_found {
            self.found_missing_key(&translation.id, &key);
        }
        self.known_translations.push(translation.id.clone());

        if translation.is_reference() {
            match &self.reference {
                None => self.reference = Some(translation.id.clone()),
                Some(kept) => issues.push(Issue::DuplicateDefault(DuplicateDefaultIssue {
                    locale: translation.id.clone(),
                    kept: kept.clone(),
                })),
            }
        }

        true // warnings only
    }

    fn finalize(&mut self, issues: &mut Vec<Issue>) -> bool {
        if let Some(reference) = &self.reference {
            let obsolete = self.missing.remove(reference).unwrap_or_default();
            for key in obsolete {
                self.all_keys.remove(&key);
                for keys in self.missing.values_mut() {
                    keys.retain(|k| *k != key);
                }
                issues.push(Issue::ObsoleteTranslation(ObsoleteTranslationIssue {
                    defined_in: self.defined_in.get(&key).cloned().unwrap_or_default(),
                    reference: reference.clone(),
                    key,
                }));
            }
        }

        for key in &self.all_keys {
            let missing_in: Vec<String> = self
                .known_translations
                .iter()
                .filter(|id| {
                    self.missing
                        .get(*id)
                        .is_some_and(|keys| keys.contains(key))
                })
                .cloned()
                .collect();
            if !missing_in.is_empty() {
                issues.push(Issue::MissingTranslation(MissingTranslationIssue {
                    key: key.clone(),
                    missing_in,
                }));
            }
        }

        true
    }

    fn into_report(self) -> MissingTranslationsReport {
        MissingTranslationsReport {
            all_keys: self.all_keys,
            missing: self
                .missing
                .into_iter()
                .map(|(id, keys)| (id, keys.into_iter().collect()))
                .collect(),
            reference: self.reference,
        }
    }
}
