use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::parse_object;
use crate::error::{Result, ScaffoldError};

/// A closed interval of object ids reserved by the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub from: u32,
    pub to: u32,
}

impl IdRange {
    pub fn contains(&self, id: u32) -> bool {
        self.from <= id && id <= self.to
    }
}

/// The parts of the project manifest (app.json) the generator reads
#[derive(Debug, Clone, Default)]
pub struct ProjectManifest {
    pub path: PathBuf,
    pub id_ranges: Vec<IdRange>,
}

impl ProjectManifest {
    /// Load the manifest. Malformed range entries are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ScaffoldError::NotFound { path: path.to_path_buf() });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project manifest {}", path.display()))?;
        let doc = parse_object(path, &content)?;

        // Older manifests declare a single `idRange` object
        let declared: Vec<&Value> = match (doc.get("idRanges"), doc.get("idRange")) {
            (Some(Value::Array(ranges)), _) => ranges.iter().collect(),
            (_, Some(range @ Value::Object(_))) => vec![range],
            _ => Vec::new(),
        };

        let id_ranges: Vec<IdRange> = declared.into_iter().filter_map(parse_range).collect();
        debug!("{} declares {} usable id ranges", path.display(), id_ranges.len());

        Ok(Self {
            path: path.to_path_buf(),
            id_ranges,
        })
    }

    /// Smallest `from` across all declared ranges
    pub fn min_id(&self) -> Option<u32> {
        self.id_ranges.iter().map(|range| range.from).min()
    }

    /// The first id, or an error when no usable range is declared
    pub fn first_id(&self) -> Result<u32> {
        self.min_id().ok_or_else(|| ScaffoldError::MissingIdRange { path: self.path.clone() })
    }

    pub fn range_containing(&self, id: u32) -> Option<&IdRange> {
        self.id_ranges.iter().find(|range| range.contains(id))
    }
}

fn parse_range(value: &Value) -> Option<IdRange> {
    let from = value.get("from")?.as_u64()?;
    let to = value.get("to")?.as_u64()?;
    let range = IdRange {
        from: u32::try_from(from).ok()?,
        to: u32::try_from(to).ok()?,
    };

    if range.from > range.to {
        warn!("Ignoring id range {}..{}: from is greater than to", range.from, range.to);
        return None;
    }
    Some(range)
}
