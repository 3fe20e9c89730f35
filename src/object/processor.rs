use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::object::scanner::{FileCollector, ObjectClassifier, ProgressTracker, SourceExtractor, SourceInfo};
use crate::object::types::{ClassifiedFileSet, ObjectKind, ScanOptions, ScanResult, ScanStats, ScannedObject};
use crate::utils::file_utils;

/// Outcome of processing one file
#[derive(Debug)]
struct FileOutcome {
    path: PathBuf,
    kind: Option<ObjectKind>,
    info: Option<SourceInfo>,
}

/// Object processor: collects, classifies and extracts AL objects
#[derive(Debug)]
pub struct ObjectProcessor {
    /// Configuration options for processing
    options: ScanOptions,

    file_collector: FileCollector,

    classifier: ObjectClassifier,

    extractor: SourceExtractor,

    progress_tracker: ProgressTracker,
}

impl ObjectProcessor {
    /// Create a new object processor with the given options
    pub fn new(options: ScanOptions) -> Self {
        Self {
            file_collector: FileCollector::with_suffix(options.suffix.clone()),
            classifier: ObjectClassifier::new(options.case_matching),
            extractor: SourceExtractor::new(log::log_enabled!(log::Level::Debug)),
            progress_tracker: ProgressTracker::new(options.show_progress),
            options,
        }
    }

    /// Scan a directory recursively for AL objects
    pub fn scan_directory(&self, input_dir: impl AsRef<Path>) -> Result<ScanResult> {
        let input_dir = input_dir.as_ref();
        info!("Scanning directory: {}", input_dir.display());

        let files = self.file_collector.collect_files(input_dir);
        info!("Found {} files to process", files.len());

        self.process_files(&files)
    }

    /// Classify and extract the given files
    pub fn process_files(&self, files: &[PathBuf]) -> Result<ScanResult> {
        let thread_count = self.options.parallel_threads.unwrap_or_else(|| {
            let available = num_cpus::get();
            let used = std::cmp::max(1, available.saturating_sub(1));
            debug!("Using {} threads for parallel processing (available: {})", used, available);
            used
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .context("Failed to build thread pool")?;

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            self.progress_tracker
                .track_path_progress(files, |path| self.process_file(path))
        });

        Ok(self.collect(outcomes))
    }

    fn process_file(&self, path: &PathBuf) -> FileOutcome {
        let kind = self.classifier.classify(&file_utils::file_name_string(path));

        let info = match self.extractor.extract_file(path) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        };

        FileOutcome {
            path: path.clone(),
            kind,
            info,
        }
    }

    /// Fold per-file outcomes, in scan order, into the final result
    fn collect(&self, outcomes: Vec<FileOutcome>) -> ScanResult {
        let mut stats = ScanStats::default();
        let mut classified = ClassifiedFileSet::new();
        let mut objects = Vec::new();
        let mut namespace: Option<String> = None;

        stats.total_files = outcomes.len();

        for outcome in outcomes {
            let Some(info) = outcome.info else {
                stats.error_files += 1;
                stats.error_file_paths.push(outcome.path);
                continue;
            };

            if namespace.is_none() {
                namespace = info.namespace;
            }

            let Some(kind) = outcome.kind else {
                continue;
            };
            stats.classified_files += 1;
            classified.insert(kind, outcome.path.clone());

            match info.object_name {
                Some(name) => {
                    stats.total_objects += 1;
                    objects.push(ScannedObject {
                        kind,
                        name,
                        file_path: outcome.path,
                    });
                }
                None => {
                    warn!("No {} declaration found in {}", kind, outcome.path.display());
                    stats.unnamed_files += 1;
                }
            }
        }

        info!(
            "Processed {} files: {} classified, {} objects, {} unreadable",
            stats.total_files, stats.classified_files, stats.total_objects, stats.error_files
        );

        ScanResult {
            classified,
            objects,
            namespace,
            stats,
        }
    }
}
