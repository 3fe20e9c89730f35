use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::ToolConfig;
use crate::error::{Result, ScaffoldError};
use crate::host::{Host, prompt_required};
use crate::object::{ObjectProcessor, ScanOptions, ScanStats};
use crate::utils::file_utils;
use super::project::ProjectManifest;
use super::renderer::{PermissionEntries, PermissionSetRenderer, PermissionTier, artifact_file_name};

const NAME_PROMPT: &str = "Please enter the name of the permission set.";

/// What a generation run wrote
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub files: Vec<PathBuf>,
    pub first_id: u32,
    pub namespace: String,
    pub stats: ScanStats,
}

/// Generates the four permission sets for one project
#[derive(Debug)]
pub struct PermissionSetGenerator<'a> {
    root: &'a Path,
    config: &'a ToolConfig,
}

impl<'a> PermissionSetGenerator<'a> {
    pub fn new(root: &'a Path, config: &'a ToolConfig) -> Self {
        Self { root, config }
    }

    pub fn output_dir(&self) -> PathBuf {
        file_utils::resolve(self.root, &self.config.paths.permission_sets)
    }

    /// Destination paths in tier order
    pub fn target_paths(&self, base_name: &str) -> Vec<PathBuf> {
        let output_dir = self.output_dir();
        PermissionTier::ALL
            .iter()
            .map(|&tier| output_dir.join(artifact_file_name(base_name, tier)))
            .collect()
    }

    /// Scan the project and write the four files.
    ///
    /// Nothing is written if any destination already exists or the manifest
    /// declares no id range. The output directory itself may still be created.
    pub fn generate(&self, base_name: &str) -> Result<GenerationReport> {
        file_utils::ensure_dir_exists(self.output_dir())?;

        let targets = self.target_paths(base_name);
        if let Some(existing) = targets.iter().find(|path| path.exists()) {
            return Err(ScaffoldError::AlreadyExists { path: existing.clone() });
        }

        let manifest = ProjectManifest::load(file_utils::resolve(self.root, &self.config.paths.app_manifest))?;
        let first_id = manifest.first_id()?;
        let last_id = first_id.saturating_add(PermissionTier::Objects.id_offset());
        if let Some(range) = manifest.range_containing(first_id) {
            if !range.contains(last_id) {
                warn!("Permission set ids {}..={} run past the id range ending at {}", first_id, last_id, range.to);
            }
        }

        let scan = ObjectProcessor::new(ScanOptions::from(&self.config.scan)).scan_directory(self.root)?;
        let namespace = scan
            .namespace
            .clone()
            .unwrap_or_else(|| self.config.permissions.fallback_namespace.clone());

        let entries = PermissionEntries::from_objects(&scan.objects);
        let artifacts = PermissionSetRenderer::new(base_name, namespace.clone(), first_id).render(&entries)?;

        for (artifact, path) in artifacts.iter().zip(&targets) {
            file_utils::write_string_to_file(path, &artifact.content)?;
            info!("Wrote {} ({} {})", path.display(), artifact.name, artifact.id);
        }

        Ok(GenerationReport {
            files: targets,
            first_id,
            namespace,
            stats: scan.stats,
        })
    }
}

/// Prompt for a base name and generate the permission sets under `root`
pub fn generate_permission_sets(root: &Path, config: &ToolConfig, host: &dyn Host) -> Result<GenerationReport> {
    let base_name = prompt_required(host, NAME_PROMPT)?;
    let report = PermissionSetGenerator::new(root, config).generate(&base_name)?;

    host.info(&format!(
        "Permission sets for {} objects created with ids {} to {}.",
        report.stats.total_objects,
        report.first_id,
        report.first_id.saturating_add(PermissionTier::Objects.id_offset())
    ));
    Ok(report)
}
