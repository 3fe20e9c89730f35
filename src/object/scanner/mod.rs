pub mod classifier;
pub mod extractor;
pub mod file_collector;
mod progress;

// Re-export from submodules
pub use classifier::{ObjectClassifier, classify};
pub use extractor::{SourceExtractor, SourceInfo, extract_namespace, extract_object_name, quote_if_needed};
pub use file_collector::{FileCollector, scan};
pub use progress::ProgressTracker;
