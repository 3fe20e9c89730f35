use std::fmt;
use std::path::Path;

use anyhow::anyhow;
use log::info;
use serde_json::{Value, json};

use crate::config::ToolConfig;
use crate::document::{JsonObject, to_pretty_json};
use crate::error::{Result, ScaffoldError};
use crate::host::{Host, prompt_required};
use crate::utils::file_utils;
use super::defaults::{
    APP_SOURCE_COP_TOKEN, CODE_ANALYZERS_KEY, OBJECT_NAME_PREFIX_KEY, SIDEBAR_LOCATION_KEY,
    default_settings,
};
use super::store::SettingsStore;

const PREFIX_PROMPT: &str = "Please enter the prefix for your AL project.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarLocation {
    Left,
    Right,
}

impl SidebarLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarLocation::Left => "left",
            SidebarLocation::Right => "right",
        }
    }
}

impl fmt::Display for SidebarLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a toggle did to the analyzer list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerToggle {
    Added,
    Removed,
}

/// Write the project settings document, asking before replacing an existing one
pub fn scaffold_settings(root: &Path, config: &ToolConfig, host: &dyn Host) -> Result<()> {
    let store = SettingsStore::for_project(root, &config.paths);
    let file_name = file_utils::file_name_string(store.path());
    let already_exists = store.exists();

    let prefix = prompt_required(host, PREFIX_PROMPT)?;
    let settings = default_settings(&prefix);

    if already_exists {
        let question = format!("{} already exists! Should this file be overwritten?", file_name);
        if !host.confirm(&question) {
            host.info(&format!("{} was left unchanged.", file_name));
            return Ok(());
        }
        info!("Overwriting {}", store.path().display());
    }
    store.save(&settings)?;

    if store.path().is_file() {
        host.info(&format!("{} has been created.", file_name));
        Ok(())
    } else {
        Err(anyhow!("{} could not be created.", file_name).into())
    }
}

pub fn set_sidebar_location(
    root: &Path,
    config: &ToolConfig,
    host: &dyn Host,
    location: SidebarLocation,
) -> Result<()> {
    let store = SettingsStore::for_project(root, &config.paths);
    store.set_property(SIDEBAR_LOCATION_KEY, json!(location.as_str()))?;
    host.info(&format!("Sidebar moved to the {}.", location));
    Ok(())
}

/// Add or remove the AppSourceCop analyzer and keep AppSourceCop.json in step
pub fn toggle_app_source_cop(root: &Path, config: &ToolConfig, host: &dyn Host) -> Result<AnalyzerToggle> {
    let store = SettingsStore::for_project(root, &config.paths);
    let prefix = store.get_property(OBJECT_NAME_PREFIX_KEY);

    let toggle = store.update(|settings| {
        let analyzers = settings
            .get_mut(CODE_ANALYZERS_KEY)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                ScaffoldError::InvalidValue(format!("\"{}\" is missing or not a list", CODE_ANALYZERS_KEY))
            })?;
        Ok(toggle_token(analyzers, APP_SOURCE_COP_TOKEN))
    })?;

    let cop_path = file_utils::resolve(root, &config.paths.app_source_cop);
    match toggle {
        AnalyzerToggle::Removed => {
            if file_utils::remove_file_if_exists(&cop_path)? {
                host.info(&format!("{} has been deleted.", file_utils::file_name_string(&cop_path)));
            }
        }
        AnalyzerToggle::Added => write_app_source_cop(&cop_path, prefix.as_ref(), host)?,
    }

    info!("{} {:?}", APP_SOURCE_COP_TOKEN, toggle);
    Ok(toggle)
}

/// Remove the first occurrence of `token`, or put it at the front of the list.
///
/// Adding inserts at the front rather than appending at the end: the
/// scaffolded settings list the token first, so two toggles restore the
/// original order.
pub fn toggle_token(list: &mut Vec<Value>, token: &str) -> AnalyzerToggle {
    match list.iter().position(|v| v.as_str() == Some(token)) {
        Some(index) => {
            list.remove(index);
            AnalyzerToggle::Removed
        }
        None => {
            list.insert(0, Value::String(token.to_string()));
            AnalyzerToggle::Added
        }
    }
}

fn write_app_source_cop(path: &Path, prefix: Option<&Value>, host: &dyn Host) -> Result<()> {
    let file_name = file_utils::file_name_string(path);
    let affixes: Vec<String> = prefix
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| vec![p.to_string()])
        .unwrap_or_default();
    if affixes.is_empty() {
        host.warning(&format!("\"{}\" is not set; {} has no mandatory affix.", OBJECT_NAME_PREFIX_KEY, file_name));
    }

    let mut doc = JsonObject::new();
    doc.insert("mandatoryAffixes".to_string(), json!(affixes));

    if path.exists() {
        let question = format!("{} already exists! Should this file be overwritten?", file_name);
        if !host.confirm(&question) {
            host.info(&format!("{} was left unchanged.", file_name));
            return Ok(());
        }
    }

    file_utils::write_string_to_file(path, &to_pretty_json(&doc)?)?;
    host.info(&format!("{} has been created.", file_name));
    Ok(())
}
