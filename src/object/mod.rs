pub mod processor;
pub mod scanner;
pub mod types;

// Re-export the main API for easier access
pub use processor::ObjectProcessor;
pub use types::{CaseMatching, ClassifiedFileSet, ObjectKind, ScanOptions, ScanResult, ScanStats, ScannedObject};
