//! Tool configuration loaded from an optional TOML file.
//!
//! Every field has a default, so an empty or missing file gives the
//! standard AL project layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::object::types::CaseMatching;

/// File name looked up in the project root when no explicit config is given
pub const PROJECT_CONFIG_FILE: &str = ".al-scaffold.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub paths: PathsConfig,
    pub scan: ScanConfig,
    pub permissions: PermissionsConfig,
    pub launch: LaunchConfig,
}

/// Locations of the managed files, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub settings: PathBuf,
    pub launch: PathBuf,
    pub app_manifest: PathBuf,
    pub app_source_cop: PathBuf,
    pub permission_sets: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            settings: PathBuf::from(".vscode").join("settings.json"),
            launch: PathBuf::from(".vscode").join("launch.json"),
            app_manifest: PathBuf::from("app.json"),
            app_source_cop: PathBuf::from("AppSourceCop.json"),
            permission_sets: PathBuf::from("src").join("PermissionSets"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffix of AL source files
    pub suffix: String,
    pub case_matching: CaseMatching,
    /// Worker threads for extraction; `None` sizes the pool from the CPU count
    pub parallel_threads: Option<usize>,
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            suffix: ".al".to_string(),
            case_matching: CaseMatching::Legacy,
            parallel_threads: None,
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Namespace written when no scanned file declares one
    pub fallback_namespace: String,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            fallback_namespace: "DefaultNamespace".to_string(),
        }
    }
}

/// Fixed fields of an appended launch target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub environment_type: String,
    pub startup_object_type: String,
    pub startup_object_id: u32,
    pub break_on_error: String,
    pub launch_browser: bool,
    pub enable_long_running_sql_statements: bool,
    pub enable_sql_information_debugger: bool,
    pub schema_update_mode: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            environment_type: "Sandbox".to_string(),
            startup_object_type: "Page".to_string(),
            startup_object_id: 22,
            break_on_error: "All".to_string(),
            launch_browser: true,
            enable_long_running_sql_statements: true,
            enable_sql_information_debugger: true,
            schema_update_mode: "ForceSync".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ToolConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!("Loaded tool config from {}", path.display());
        Ok(config)
    }

    /// Load the explicit config if given, else the project's own config file, else defaults
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let project_config = root.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            Self::from_file(&project_config)
        } else {
            debug!("No {} in {}, using defaults", PROJECT_CONFIG_FILE, root.display());
            Ok(Self::default())
        }
    }
}
