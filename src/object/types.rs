use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use crate::config::ScanConfig;

/// The AL object kinds recognised by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Codeunit,
    Page,
    Table,
    Report,
    Query,
    XmlPort,
    MenuSuite,
}

impl ObjectKind {
    /// All kinds, in classification order
    pub const ALL: [ObjectKind; 7] = [
        ObjectKind::Codeunit,
        ObjectKind::Page,
        ObjectKind::Table,
        ObjectKind::Report,
        ObjectKind::Query,
        ObjectKind::XmlPort,
        ObjectKind::MenuSuite,
    ];

    /// Source keyword, also used in permission entries
    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectKind::Codeunit => "codeunit",
            ObjectKind::Page => "page",
            ObjectKind::Table => "table",
            ObjectKind::Report => "report",
            ObjectKind::Query => "query",
            ObjectKind::XmlPort => "xmlport",
            ObjectKind::MenuSuite => "menusuite",
        }
    }

    /// File name token identifying the kind, e.g. `Customer.Table.al`
    pub fn file_token(&self) -> &'static str {
        match self {
            ObjectKind::Codeunit => ".codeunit.",
            ObjectKind::Page => ".page.",
            ObjectKind::Table => ".table.",
            ObjectKind::Report => ".report.",
            ObjectKind::Query => ".query.",
            ObjectKind::XmlPort => ".XMLPort.",
            ObjectKind::MenuSuite => ".MenuSuite.",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Codeunit => "Codeunit",
            ObjectKind::Page => "Page",
            ObjectKind::Table => "Table",
            ObjectKind::Report => "Report",
            ObjectKind::Query => "Query",
            ObjectKind::XmlPort => "XMLPort",
            ObjectKind::MenuSuite => "MenuSuite",
        };
        f.write_str(name)
    }
}

/// How file name tokens are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMatching {
    /// Lowercase the file name and compare the tokens as written.
    /// The mixed-case XMLPort and MenuSuite tokens therefore never match.
    #[default]
    Legacy,
    /// Compare every token case-insensitively
    Insensitive,
}

/// Files grouped by object kind, in scan order within each kind
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClassifiedFileSet {
    files: BTreeMap<ObjectKind, Vec<PathBuf>>,
}

impl ClassifiedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ObjectKind, path: PathBuf) {
        self.files.entry(kind).or_default().push(path);
    }

    /// Files of one kind
    pub fn get(&self, kind: ObjectKind) -> &[PathBuf] {
        self.files.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// An object found in a classified source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedObject {
    pub kind: ObjectKind,

    /// Object name, quoted when it contains a space
    pub name: String,

    /// Path to the file where this object was found
    pub file_path: PathBuf,
}

/// Statistics about the object scanning process
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total number of files with the scanned suffix
    pub total_files: usize,

    /// Number of files matched to an object kind
    pub classified_files: usize,

    /// Number of objects whose name could be extracted
    pub total_objects: usize,

    /// Classified files without a recognisable declaration
    pub unnamed_files: usize,

    /// Number of files that could not be read
    pub error_files: usize,

    /// Paths to files that could not be read
    pub error_file_paths: Vec<PathBuf>,
}

impl ScanStats {
    /// Files that did not match any object kind
    pub fn unclassified_files(&self) -> usize {
        self.total_files - self.classified_files
    }
}

/// Configuration options for object scanning
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File name suffix to collect
    pub suffix: String,

    pub case_matching: CaseMatching,

    /// Number of parallel threads to use for extraction
    pub parallel_threads: Option<usize>,

    /// Show a progress bar for larger trees
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            suffix: ".al".to_string(),
            case_matching: CaseMatching::Legacy,
            parallel_threads: None,
            show_progress: false,
        }
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            suffix: config.suffix.clone(),
            case_matching: config.case_matching,
            parallel_threads: config.parallel_threads,
            show_progress: config.show_progress,
        }
    }
}

/// Result of an object scanning operation
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Classified files by kind
    pub classified: ClassifiedFileSet,

    /// Objects in scan order
    pub objects: Vec<ScannedObject>,

    /// First namespace declared by any scanned file
    pub namespace: Option<String>,

    /// Statistics about the scanning process
    pub stats: ScanStats,
}
