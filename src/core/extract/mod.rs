//! Extraction of domain translations from `.tm` files.
//!
//! - `directory`: finds, reads and parses the files of a translations directory
//! - `prepared`: resolves `{@message}` interpolations

pub mod directory;
pub mod prepared;

use crate::core::parsers::tm::TmDocument;
use crate::error::{Built, ErrorReport, TmError};
use crate::model::Translation;

pub use directory::{ExtractionResult, FileProblem, SourcedTranslation, extract_translations};
pub use prepared::{MessageResolver, PreparedMessage};

/// Turns a parsed document into a translation, baking its interpolations.
pub fn build_translation(id: &str, document: TmDocument) -> Built<Translation> {
    let mut errors = ErrorReport::new();
    let mut resolver = MessageResolver::new();

    for definition in document.messages {
        let prepared = PreparedMessage::new(
            definition.visibility,
            definition.content,
            definition.parameters,
        );
        if !resolver.insert(definition.key.clone(), prepared) {
            errors.push(
                TmError::checks(format!(
                    "Duplicate message \"{}\", only the first definition is used",
                    definition.key
                ))
                .at(definition.position),
            );
        }
    }

    let mut translation = Translation::new(id);
    translation.header = document.header;
    translation.directives = document.directives;
    translation.messages = resolver.bake_all(&mut errors);

    Built::new(translation, errors)
}
