use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::build_translation;
use crate::core::parsers::tm::{TmDocument, parse_tm};
use crate::error::{Built, ErrorKind, ErrorReport, TmError};
use crate::model::Translation;

pub const TRANSLATION_EXTENSION: &str = "tm";

/// A translation together with the file it was read from.
#[derive(Debug, Clone)]
pub struct SourcedTranslation {
    pub translation: Translation,
    pub source: PathBuf,
}

/// An error found while loading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProblem {
    pub path: PathBuf,
    pub error: TmError,
    /// The offending source line, when the error has a position.
    pub source_line: Option<String>,
}

impl FileProblem {
    fn new(path: &Path, error: TmError, content: Option<&str>) -> Self {
        let source_line = error.position.and_then(|position| {
            content
                .and_then(|content| content.lines().nth(position.line.saturating_sub(1)))
                .map(String::from)
        });
        Self {
            path: path.to_path_buf(),
            error,
            source_line,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// Loaded translations, sorted by source path.
    pub translations: Vec<SourcedTranslation>,
    pub problems: Vec<FileProblem>,
    /// Files that had fatal problems and were left out.
    pub excluded: Vec<PathBuf>,
}

impl ExtractionResult {
    pub fn files_found(&self) -> usize {
        self.translations.len() + self.excluded.len()
    }
}

/// Extracts the locale name from a translation file path.
///
/// Examples:
/// - "en.tm" -> Some("en")
/// - "/path/to/translations/zh-CN.tm" -> Some("zh-CN")
pub fn locale_id(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Lists the `.tm` files directly inside `dir`, sorted by path.
pub fn find_translation_files(dir: &Path, ignores: &[Pattern]) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!(
            "Translations directory '{}' does not exist.\n\
             Hint: Check your .elziirc.json 'translations' setting.",
            dir.display()
        );
    }
    if !dir.is_dir() {
        bail!("'{}' is not a directory.", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(TRANSLATION_EXTENSION)
        {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if ignores.iter().any(|pattern| pattern.matches(&name)) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// Loads every translation of `dir`.
///
/// Files are read and parsed in parallel. One bad file never stops the
/// others: its problems are recorded and it is left out of the result.
pub fn extract_translations(dir: &Path, ignores: &[Pattern]) -> Result<ExtractionResult> {
    let files = find_translation_files(dir, ignores)?;

    let loaded: Vec<_> = files
        .par_iter()
        .map(|path| {
            let (content, parsed) = load_file(path);
            (path, content, parsed)
        })
        .collect();

    // Sequential, in path order
    let mut result = ExtractionResult::default();
    for (path, content, parsed) in loaded {
        let mut errors = ErrorReport::new();
        let translation = match parsed {
            Ok(built) => {
                let document = built.unwrap_into(&mut errors);
                locale_id(path)
                    .map(|id| build_translation(&id, document).unwrap_into(&mut errors))
            }
            Err(error) => {
                errors.push(error);
                None
            }
        };

        let fatal = errors.has_fatal() || translation.is_none();
        for error in errors {
            result
                .problems
                .push(FileProblem::new(path, error, content.as_deref()));
        }

        match translation {
            Some(translation) if !fatal => result.translations.push(SourcedTranslation {
                translation,
                source: path.clone(),
            }),
            _ => result.excluded.push(path.clone()),
        }
    }

    Ok(result)
}

fn load_file(path: &Path) -> (Option<String>, Result<Built<TmDocument>, TmError>) {
    match fs::read_to_string(path) {
        Ok(content) => {
            let parsed = parse_tm(&content);
            (Some(content), parsed)
        }
        Err(e) => (
            None,
            Err(TmError::new(
                ErrorKind::Files,
                format!("Failed to read file: {}", e),
            )),
        ),
    }
}
