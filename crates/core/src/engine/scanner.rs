use super::{analyze_source, AnalysisError};
use crate::config::{is_elvish_file, ConfigError, IgnoreFilter, ScanConfig};
use crate::models::{AnalysisMap, FileAnalysis, ScanMetadata, ScanStats};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Scanner errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Analysis error: {0}")]
    AnalysisError(#[from] AnalysisError),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    #[error("Not an Elvish script: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    FileTooLarge {
        path: PathBuf,
        size: usize,
        limit: usize,
    },
}

/// Scanner analyzing every Elvish script under a directory
pub struct ElvishScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl ElvishScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the configured directory and return the analysis map
    pub fn scan(&self) -> Result<AnalysisMap, ScanError> {
        let start = Instant::now();

        let source_files = self.find_source_files();
        tracing::debug!(
            root = %self.config.root.display(),
            files = source_files.len(),
            "discovered Elvish scripts"
        );

        let results: Vec<Option<FileAnalysis>> = if self.config.threads == 1 {
            source_files
                .iter()
                .map(|path| self.analyze_file(path))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;

            pool.install(|| {
                source_files
                    .par_iter()
                    .map(|path| self.analyze_file(path))
                    .collect()
            })
        };

        let skipped = results.iter().filter(|r| r.is_none()).count();
        let files: Vec<FileAnalysis> = results.into_iter().flatten().collect();
        let stats = ScanStats::from_files(&files, skipped);

        let duration = start.elapsed();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                files.len() as f64 / duration.as_secs_f64()
            } else {
                files.len() as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(AnalysisMap {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all Elvish scripts that pass the filters, in path order
    fn find_source_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Skip ignored directories
                if e.file_type().is_dir() {
                    return !self.ignore_filter.should_ignore(e.path(), true);
                }
                true
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();

            if !is_elvish_file(path) || self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() as usize > self.config.max_file_size {
                    tracing::debug!(path = %path.display(), size = metadata.len(), "skipping oversized file");
                    continue;
                }
            }

            files.push(path.to_path_buf());
        }

        files
    }

    /// Analyze a single file; unreadable files are logged and skipped
    fn analyze_file(&self, path: &Path) -> Option<FileAnalysis> {
        let started = Instant::now();

        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping unreadable file");
                return None;
            }
        };

        let analysis = match analyze_source(&source, self.config.analysis) {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "analysis failed");
                return None;
            }
        };

        let absolute_path = path.canonicalize().ok();
        let relative_path = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        tracing::trace!(
            path = %relative_path.display(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "analyzed file"
        );

        Some(analysis.with_path(relative_path, absolute_path))
    }
}
