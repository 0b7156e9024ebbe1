use std::collections::BTreeMap;

use super::{Directive, DirectiveCollection, Message, UserCode};

/// All messages of one locale, as read from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Locale name, taken from the file stem.
    pub id: String,
    pub messages: BTreeMap<String, Message>,
    pub header: Option<UserCode>,
    pub directives: DirectiveCollection,
}

impl Translation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: BTreeMap::new(),
            header: None,
            directives: DirectiveCollection::new(),
        }
    }

    pub fn is_reference(&self) -> bool {
        self.directives.has(Directive::Default)
    }

    /// Messages that are generated and checked across locales.
    pub fn public_messages(&self) -> impl Iterator<Item = (&String, &Message)> {
        self.messages.iter().filter(|(_, message)| message.is_public())
    }

    pub fn public_message(&self, key: &str) -> Option<&Message> {
        self.messages.get(key).filter(|message| message.is_public())
    }
}
