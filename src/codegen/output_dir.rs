use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

pub const TS_EXTENSION: &str = ".ts";
pub const DTS_EXTENSION: &str = ".d.ts";

/// Which generated files a directory owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    TypeScript,
    Declaration,
}

impl GeneratedKind {
    pub fn owns(self, file_name: &str) -> bool {
        match self {
            GeneratedKind::TypeScript => {
                file_name.ends_with(TS_EXTENSION) && !file_name.ends_with(DTS_EXTENSION)
            }
            GeneratedKind::Declaration => file_name.ends_with(DTS_EXTENSION),
        }
    }
}

/// A directory that receives generated files.
///
/// Subdirectories are never touched.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    path: PathBuf,
    kind: GeneratedKind,
}

impl OutputDirectory {
    pub fn new(path: impl Into<PathBuf>, kind: GeneratedKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create directory: {}", self.path.display()))
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.path.join(name);
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
        Ok(file_path)
    }

    /// Deletes the owned files that are not in `keep`. Returns their names.
    pub fn clean_up(&self, keep: &BTreeSet<String>) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.kind.owns(&name) && !keep.contains(&name) {
                fs::remove_file(entry.path()).with_context(|| {
                    format!("Failed to remove file: {}", entry.path().display())
                })?;
                removed.push(name);
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_owned_files() {
        assert!(GeneratedKind::TypeScript.owns("en_Locale.ts"));
        assert!(!GeneratedKind::TypeScript.owns("Locale.d.ts"));
        assert!(!GeneratedKind::TypeScript.owns("notes.md"));
        assert!(GeneratedKind::Declaration.owns("Locale.d.ts"));
        assert!(!GeneratedKind::Declaration.owns("index.ts"));
    }

    #[test]
    fn test_clean_up_removes_stale_files_only() {
        let dir = tempdir().unwrap();
        let output = OutputDirectory::new(dir.path().join("locales"), GeneratedKind::TypeScript);
        output.resolve().unwrap();

        output.write_file("en_Locale.ts", "").unwrap();
        output.write_file("old_Locale.ts", "").unwrap();
        output.write_file("index.ts", "").unwrap();
        output.write_file("Locale.d.ts", "").unwrap();
        output.write_file("README.md", "").unwrap();
        fs::create_dir(output.path().join("nested")).unwrap();
        fs::write(output.path().join("nested").join("x.ts"), "").unwrap();

        let keep: BTreeSet<String> = ["en_Locale.ts", "index.ts"]
            .into_iter()
            .map(String::from)
            .collect();
        let removed = output.clean_up(&keep).unwrap();

        assert_eq!(removed, vec!["old_Locale.ts"]);
        assert!(output.path().join("Locale.d.ts").exists());
        assert!(output.path().join("README.md").exists());
        assert!(output.path().join("nested").join("x.ts").exists());
    }
}
