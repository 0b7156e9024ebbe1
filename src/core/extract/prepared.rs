//! Resolution of message interpolations (`{@other}`).
//!
//! Messages are baked lazily: the first request resolves every reference
//! recursively and memoizes the result. Cycles are detected by marking a
//! message while it is being baked.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorReport, TmError};
use crate::model::{Message, MessageParameterSet, MessagePart, Visibility, normalize};

#[derive(Debug, Clone)]
enum BakeState {
    Pending {
        content: Vec<MessagePart>,
        parameters: MessageParameterSet,
    },
    Baking,
    Baked(Message),
}

#[derive(Debug, Clone)]
pub struct PreparedMessage {
    visibility: Visibility,
    state: BakeState,
}

impl PreparedMessage {
    pub fn new(
        visibility: Visibility,
        content: Vec<MessagePart>,
        parameters: MessageParameterSet,
    ) -> Self {
        Self {
            visibility,
            state: BakeState::Pending {
                content,
                parameters,
            },
        }
    }
}

enum BakeFailure {
    Unknown,
    SelfReference,
}

/// The prepared messages of one translation, keyed by name.
#[derive(Debug, Default)]
pub struct MessageResolver {
    messages: BTreeMap<String, PreparedMessage>,
    /// Messages whose cycle was already reported.
    cycles: BTreeSet<String>,
}

impl MessageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message. Returns false if the name was already taken.
    pub fn insert(&mut self, name: impl Into<String>, message: PreparedMessage) -> bool {
        match self.messages.entry(name.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(message);
                true
            }
        }
    }

    /// Bakes every registered message.
    pub fn bake_all(mut self, errors: &mut ErrorReport) -> BTreeMap<String, Message> {
        let names: Vec<String> = self.messages.keys().cloned().collect();
        names
            .into_iter()
            .filter_map(|name| {
                let message = self.bake(&name, errors)?;
                Some((name, message))
            })
            .collect()
    }

    /// Returns the message `name` with all its interpolations resolved.
    ///
    /// Problems are pushed to `errors`. The offending interpolation is
    /// dropped and the rest of the content is kept.
    pub fn bake(&mut self, name: &str, errors: &mut ErrorReport) -> Option<Message> {
        match self.try_bake(name, errors) {
            Ok(message) => Some(message),
            Err(BakeFailure::Unknown) => {
                errors.push(TmError::checks(format!("Unknown message \"{}\"", name)));
                None
            }
            Err(BakeFailure::SelfReference) => {
                if self.cycles.insert(name.to_string()) {
                    errors.push(TmError::checks(format!(
                        "Message \"{}\" references itself",
                        name
                    )));
                }
                None
            }
        }
    }

    fn try_bake(&mut self, name: &str, errors: &mut ErrorReport) -> Result<Message, BakeFailure> {
        let prepared = self.messages.get_mut(name).ok_or(BakeFailure::Unknown)?;
        let visibility = prepared.visibility;

        let (content, mut parameters) =
            match std::mem::replace(&mut prepared.state, BakeState::Baking) {
                BakeState::Pending {
                    content,
                    parameters,
                } => (content, parameters),
                BakeState::Baked(message) => {
                    prepared.state = BakeState::Baked(message.clone());
                    return Ok(message);
                }
                BakeState::Baking => return Err(BakeFailure::SelfReference),
            };

        let mut baked = Vec::with_capacity(content.len());
        for part in content {
            match part {
                MessagePart::Interpolation(other) => {
                    if let Some(resolved) = self.bake(&other, errors) {
                        baked.extend(resolved.content);
                        parameters.union(&resolved.parameters);
                    }
                }
                part => baked.push(part),
            }
        }

        let message = Message {
            visibility,
            content: normalize(baked),
            parameters,
        };
        if let Some(prepared) = self.messages.get_mut(name) {
            prepared.state = BakeState::Baked(message.clone());
        }
        Ok(message)
    }
}
