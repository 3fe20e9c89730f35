//! Deployment targets in the project's launch configuration.

use std::path::Path;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use crate::config::{LaunchConfig, ToolConfig};
use crate::document::{JsonDocumentStore, JsonObject};
use crate::error::{Result, ScaffoldError};
use crate::host::{Host, prompt_required};
use crate::utils::file_utils;

pub const CONFIGURATIONS_KEY: &str = "configurations";

const ENVIRONMENT_PROMPT: &str = "Please enter the name of the environment.";

// Only the exact "<n> - " form written by `renumber`
static INDEX_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+ - ").expect("valid index prefix regex"));

/// Prompt for an environment name and append a launch target for it.
///
/// Returns the number of configurations after the append.
pub fn append_launch_target(root: &Path, config: &ToolConfig, host: &dyn Host) -> Result<usize> {
    let store = JsonDocumentStore::new(file_utils::resolve(root, &config.paths.launch));
    if !store.exists() {
        return Err(ScaffoldError::NotFound {
            path: store.path().to_path_buf(),
        });
    }

    let environment = prompt_required(host, ENVIRONMENT_PROMPT)?;
    let entry = launch_entry(&config.launch, &environment);

    let count = store.update(|doc| append_configuration(doc, entry))?;

    info!("Appended launch target {:?} to {}", environment, store.path().display());
    host.info(&format!("Launch target \"{}\" added as entry {}.", environment, count));
    Ok(count)
}

/// Push `entry` onto the `configurations` array and renumber every entry.
///
/// The new entry's name is taken as given; only the existing entries lose
/// their earlier position prefix.
pub fn append_configuration(doc: &mut JsonObject, mut entry: Value) -> Result<usize> {
    let configurations = doc
        .entry(CONFIGURATIONS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| ScaffoldError::InvalidValue(format!("\"{}\" is not a list", CONFIGURATIONS_KEY)))?;

    renumber(configurations);
    let position = configurations.len() + 1;
    if let Some(object) = entry.as_object_mut() {
        let name = object.get("name").and_then(Value::as_str).unwrap_or_default();
        let numbered = format!("{} - {}", position, name);
        object.insert("name".to_string(), json!(numbered));
    }
    configurations.push(entry);
    Ok(configurations.len())
}

/// Prefix each entry's name with its 1-based position, replacing an earlier `"<n> - "` prefix
pub fn renumber(entries: &mut [Value]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        let Some(object) = entry.as_object_mut() else {
            debug!("Skipping non-object launch entry at position {}", index + 1);
            continue;
        };

        let base = object
            .get("name")
            .and_then(Value::as_str)
            .map(strip_index_prefix)
            .unwrap_or_default()
            .to_string();
        object.insert("name".to_string(), json!(format!("{} - {}", index + 1, base)));
    }
}

fn strip_index_prefix(name: &str) -> &str {
    match INDEX_PREFIX_RE.find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

/// The AL launch entry for one environment
pub fn launch_entry(defaults: &LaunchConfig, environment: &str) -> Value {
    json!({
        "name": environment,
        "type": "al",
        "request": "launch",
        "environmentType": defaults.environment_type,
        "environmentName": environment,
        "startupObjectType": defaults.startup_object_type,
        "startupObjectId": defaults.startup_object_id,
        "breakOnError": defaults.break_on_error,
        "launchBrowser": defaults.launch_browser,
        "enableLongRunningSqlStatements": defaults.enable_long_running_sql_statements,
        "enableSqlInformationDebugger": defaults.enable_sql_information_debugger,
        "schemaUpdateMode": defaults.schema_update_mode
    })
}
