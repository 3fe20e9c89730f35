use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// Trees smaller than this are processed without a progress bar
const PROGRESS_THRESHOLD: usize = 10;

/// Progress tracker for displaying progress during scanning
#[derive(Debug, Default)]
pub struct ProgressTracker {
    enabled: bool,
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Run `operation` over `paths` in parallel, keeping results in input order
    pub fn track_path_progress<F, R>(&self, paths: &[PathBuf], operation: F) -> Vec<R>
    where
        F: Fn(&PathBuf) -> R + Sync + Send,
        R: Send,
    {
        let progress_bar = if self.enabled && paths.len() > PROGRESS_THRESHOLD {
            let pb = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let processed_count = AtomicUsize::new(0);

        let results: Vec<R> = paths
            .par_iter()
            .map(|path| {
                let current_count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(pb) = &progress_bar {
                    pb.set_position(current_count as u64);

                    // Update message occasionally to avoid too many updates
                    if current_count % 10 == 0 || current_count == 1 || current_count == paths.len() {
                        if let Some(file_name) = path.file_name() {
                            pb.set_message(file_name.to_string_lossy().into_owned());
                        }
                    }
                }

                operation(path)
            })
            .collect();

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        results
    }
}
