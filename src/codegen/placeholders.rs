//! Late insertion of user code into printed output.
//!
//! User code is never parsed, so it cannot live in the syntax tree. A
//! unique identifier stands in for it while the tree is built and printed,
//! then every identifier is swapped for its code in one textual pass.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::UserCode;
use crate::utils::random_hex;

pub const USER_CODE_PLACEHOLDER_PREFIX: &str = "__usr_";

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{}[0-9a-f]{{8}}",
        regex::escape(USER_CODE_PLACEHOLDER_PREFIX)
    ))
    .unwrap()
});

#[derive(Debug, Default)]
pub struct UserCodeInsertion {
    code_to_insert: BTreeMap<String, UserCode>,
}

impl UserCodeInsertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `code` and returns the placeholder to print in its place.
    pub fn add_user_code(&mut self, code: UserCode) -> String {
        let placeholder = loop {
            let candidate = format!("{}{}", USER_CODE_PLACEHOLDER_PREFIX, random_hex());
            if !self.code_to_insert.contains_key(&candidate) {
                break candidate;
            }
        };
        self.code_to_insert.insert(placeholder.clone(), code);
        placeholder
    }

    pub fn len(&self) -> usize {
        self.code_to_insert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_insert.is_empty()
    }

    /// Replaces every known placeholder of `code`. Unknown ones are left
    /// untouched.
    pub fn process(&self, code: &str) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(code, |captures: &Captures| {
                let key = &captures[0];
                self.code_to_insert
                    .get(key)
                    .map_or_else(|| key.to_string(), |code| code.print().to_string())
            })
            .into_owned()
    }
}

/// Hands out random cache keys that are unique for its lifetime.
#[derive(Debug, Default)]
pub struct CacheKeyGenerator {
    existing: HashSet<String>,
}

impl CacheKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self, prefix: &str) -> String {
        loop {
            let key = format!("{}{}", prefix, random_hex());
            if self.existing.insert(key.clone()) {
                return key;
            }
        }
    }
}
