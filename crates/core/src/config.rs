//! Configuration module for the Elvish scanner
//!
//! This module provides configuration structures and ignore filtering logic
//! for controlling which scripts are analyzed and how.

use crate::folding::AnalysisOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of Elvish scripts
pub const ELVISH_EXTENSION: &str = "elv";

const DEFAULT_IGNORES: &[&str] = &[
    "**/.git/**",
    "**/node_modules/**",
    "**/target/**",
    "**/vendor/**",
    "**/dist/**",
    "**/build/**",
    "**/.cache/**",
];

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for the Elvish scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// Custom ignore patterns, matched against paths relative to `root`
    pub ignore_patterns: Vec<String>,

    /// Extra gitignore-style file
    pub ignore_file: Option<PathBuf>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Maximum file size to process (bytes)
    pub max_file_size: usize,

    pub follow_symlinks: bool,

    pub include_hidden: bool,

    /// Options forwarded to every file analysis
    pub analysis: AnalysisOptions,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_patterns: Vec::new(),
            ignore_file: None,
            threads: num_cpus(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            follow_symlinks: false,
            include_hidden: false,
            analysis: AnalysisOptions::default(),
        }
    }
}

impl ScanConfig {
    /// Create new config with root directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set ignore file path (builder pattern)
    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set max file size (builder pattern)
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set analysis options (builder pattern)
    pub fn with_analysis_options(mut self, options: AnalysisOptions) -> Self {
        self.analysis = options;
        self
    }

    /// Reject settings the scanner cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }
        if let Some(ref path) = self.ignore_file {
            if !path.is_file() {
                return Err(ConfigError::InvalidConfig(format!(
                    "ignore file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Whether a path names an Elvish script
pub fn is_elvish_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ELVISH_EXTENSION))
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    root: PathBuf,

    /// Rules from `.gitignore` under the root and the configured ignore file
    gitignore: Option<Gitignore>,

    custom_globs: GlobSet,

    default_ignores: GlobSet,

    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let gitignore = Self::build_gitignore(&config.root, config.ignore_file.as_deref())?;
        let custom_globs = Self::build_globset(&config.ignore_patterns)?;
        let default_ignores = Self::build_globset(DEFAULT_IGNORES)?;

        Ok(Self {
            root: config.root.clone(),
            gitignore,
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    fn build_gitignore(
        root: &Path,
        ignore_file: Option<&Path>,
    ) -> Result<Option<Gitignore>, ConfigError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut has_rules = false;

        let gitignore_path = root.join(".gitignore");
        if gitignore_path.exists() {
            if let Some(err) = builder.add(&gitignore_path) {
                tracing::debug!(path = %gitignore_path.display(), error = %err, "skipping malformed .gitignore");
            } else {
                has_rules = true;
            }
        }

        if let Some(path) = ignore_file {
            if let Some(err) = builder.add(path) {
                return Err(ConfigError::InvalidConfig(format!(
                    "cannot load ignore file {}: {}",
                    path.display(),
                    err
                )));
            }
            has_rules = true;
        }

        if !has_rules {
            return Ok(None);
        }

        match builder.build() {
            Ok(gi) => Ok(Some(gi)),
            Err(_) => Ok(None), // Ignore gitignore errors
        }
    }

    fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref())
                .map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        // The scan root itself is never filtered
        if path == self.root {
            return false;
        }

        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                if name.to_string_lossy().starts_with('.') {
                    return true;
                }
            }
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        if self.default_ignores.is_match(relative) {
            return true;
        }

        if self.custom_globs.is_match(relative) {
            return true;
        }

        // Paths outside the root cannot be matched against its gitignore
        if relative.has_root() {
            return false;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched_path_or_any_parents(relative, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let options = AnalysisOptions {
            fast: true,
            ..Default::default()
        };
        let config = ScanConfig::new(PathBuf::from("/test"))
            .with_threads(4)
            .with_max_file_size(1024)
            .with_include_hidden(true)
            .with_analysis_options(options);

        assert_eq!(config.threads, 4);
        assert_eq!(config.max_file_size, 1024);
        assert!(config.include_hidden);
        assert!(config.analysis.fast);
    }

    #[test]
    fn test_validate() {
        assert!(ScanConfig::default().validate().is_ok());
        assert!(matches!(
            ScanConfig::default().with_threads(0).validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(ScanConfig::default()
            .with_ignore_file(PathBuf::from("/definitely/not/here"))
            .validate()
            .is_err());
    }

    #[test]
    fn test_is_elvish_file() {
        assert!(is_elvish_file(Path::new("rc.elv")));
        assert!(is_elvish_file(Path::new("lib/Util.ELV")));
        assert!(!is_elvish_file(Path::new("script.sh")));
        assert!(!is_elvish_file(Path::new("elv")));
    }

    #[test]
    fn test_invalid_glob() {
        let config = ScanConfig::default().with_ignore_patterns(vec!["[".to_string()]);
        assert!(matches!(
            IgnoreFilter::new(&config),
            Err(ConfigError::InvalidGlob(_))
        ));
    }

    #[test]
    fn test_should_ignore() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        fs::write(root.join(".gitignore"), "generated/\n").unwrap();

        let config = ScanConfig::new(root.clone())
            .with_ignore_patterns(vec!["scratch/**".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(!filter.should_ignore(&root, true));
        assert!(!filter.should_ignore(&root.join("lib.elv"), false));
        assert!(filter.should_ignore(&root.join(".hidden.elv"), false));
        assert!(filter.should_ignore(&root.join("node_modules/x.elv"), false));
        assert!(filter.should_ignore(&root.join("scratch/try.elv"), false));
        assert!(filter.should_ignore(&root.join("generated"), true));
        assert!(filter.should_ignore(&root.join("generated/out.elv"), false));
    }
}
