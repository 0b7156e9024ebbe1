//! Resolved settings of one run.
//!
//! Combines CLI arguments, the `.elziirc.json` file and defaults, in that
//! order of priority.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use glob::Pattern;

use crate::cli::args::CommonArgs;
use crate::codegen::TargetOptions;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};

#[derive(Debug)]
pub struct ProjectContext {
    /// Directory that relative config paths are resolved against.
    pub root: PathBuf,
    pub config: Config,
    pub translations_dir: PathBuf,
    pub ignores: Vec<Pattern>,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // ============================================================
        // 1. Load config, searching from --root or the current directory
        // ============================================================
        let start_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let config_result = load_config(&start_dir)?;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let root = config_result.base_dir;
        let config = config_result.config;

        // ============================================================
        // 2. Apply CLI overrides (CLI > config file > defaults)
        // ============================================================
        let translations_dir = match &common_args.translations {
            Some(dir) => dir.clone(),
            None => resolve_in(&root, &config.translations),
        };
        let ignores = config.ignore_patterns()?;

        if verbose {
            eprintln!("Translations directory: {}", translations_dir.display());
        }

        Ok(Self {
            root,
            config,
            translations_dir,
            ignores,
            verbose,
        })
    }

    /// Options of the output targets, with output directories resolved.
    pub fn target_options(&self, ts_out: Option<&Path>, dts_out: Option<&Path>) -> TargetOptions {
        let output = &self.config.output;
        TargetOptions {
            ts_dir: ts_out
                .map(Path::to_path_buf)
                .or_else(|| output.ts.as_deref().map(|dir| resolve_in(&self.root, dir))),
            dts_dir: dts_out
                .map(Path::to_path_buf)
                .or_else(|| output.dts.as_deref().map(|dir| resolve_in(&self.root, dir))),
            interface_name: self.config.interface_name.clone(),
            elz_instance_name: self.config.elz_instance_name.clone(),
            static_default: self.config.static_default,
            tool: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    /// `path` relative to the project root, with `/` separators.
    pub fn display_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn resolve_in(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root.components().all(|c| matches!(c, Component::CurDir));
    let rel = p.strip_prefix(".").unwrap_or(p);
    if is_cur_dir {
        Path::new(".").join(rel)
    } else {
        root.join(rel)
    }
}
