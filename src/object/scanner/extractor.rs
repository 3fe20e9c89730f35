use std::path::Path;
use anyhow::Result;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::file_utils;

// "implements" clauses, possibly listing several interfaces
static IMPLEMENTS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+implements\s+(?:"[^"]*"|[\w.]+)(?:\s*,\s*(?:"[^"]*"|[\w.]+))*"#)
        .expect("valid implements regex")
});

// Handles `table 50100 "My Table"`, `codeunit 50100 MyCU` and an optional `extends` target
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?im)^\s*(codeunit|page|table|report|query|xmlport|menusuite)\s+(\d+)\s+(?:"([^"]+)"|([A-Za-z_]\w*))(?:\s+extends\s+(?:"[^"]+"|[A-Za-z_]\w*))?"#,
    )
    .expect("valid declaration regex")
});

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\s*;")
        .expect("valid namespace regex")
});

/// What the extractor found in one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    pub object_name: Option<String>,
    pub namespace: Option<String>,
}

/// Pulls object names and namespaces out of AL source text
#[derive(Debug, Default)]
pub struct SourceExtractor {
    /// Whether to output verbose logs
    pub verbose: bool,
}

impl SourceExtractor {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Read a file and extract its object name and namespace
    pub fn extract_file(&self, file_path: impl AsRef<Path>) -> Result<SourceInfo> {
        let file_path = file_path.as_ref();
        let content = file_utils::read_file_to_string(file_path)?;
        let info = self.extract(&content);

        if self.verbose {
            debug!("{}: object {:?}, namespace {:?}", file_path.display(), info.object_name, info.namespace);
        }
        Ok(info)
    }

    pub fn extract(&self, content: &str) -> SourceInfo {
        SourceInfo {
            object_name: extract_object_name(content),
            namespace: extract_namespace(content),
        }
    }
}

/// Name of the first object declared in `content`, quoted if it contains a space
pub fn extract_object_name(content: &str) -> Option<String> {
    let content = strip_bom(content);
    let without_implements = IMPLEMENTS_RE.replace_all(content, "");

    let captures = DECLARATION_RE.captures(&without_implements)?;
    let name = captures.get(3).or_else(|| captures.get(4))?.as_str();
    trace!("Declaration {} {} {:?}", &captures[1], &captures[2], name);

    Some(quote_if_needed(name))
}

/// The dotted identifier of the first `namespace x.y;` statement
pub fn extract_namespace(content: &str) -> Option<String> {
    NAMESPACE_RE
        .captures(strip_bom(content))
        .map(|captures| captures[1].to_string())
}

/// Wrap a name in double quotes when it contains whitespace
pub fn quote_if_needed(name: &str) -> String {
    if name.chars().any(char::is_whitespace) {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
