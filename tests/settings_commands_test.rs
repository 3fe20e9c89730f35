mod common;

use std::fs;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use al_scaffold::settings::{AnalyzerToggle, toggle_app_source_cop};
use al_scaffold::{Command, CommandContext, CommandStatus, Severity, SettingsStore, ToolConfig, execute};
use common::{ScriptedHost, read_json, write_file};

fn context(root: &std::path::Path) -> CommandContext {
    CommandContext::new(root, ToolConfig::default())
}

#[test]
fn scaffold_creates_settings() -> Result<()> {
    let dir = tempdir()?;
    let host = ScriptedHost::new().answer("ABC");

    let status = execute(Command::ScaffoldSettings, &context(dir.path()), &host);

    assert_eq!(status, CommandStatus::Completed);
    let settings = read_json(&dir.path().join(".vscode/settings.json"));
    assert_eq!(settings["CRS.ObjectNamePrefix"], json!("ABC "));
    assert_eq!(settings["workbench.sideBar.location"], json!("right"));
    assert_eq!(host.messages(Severity::Info), vec!["settings.json has been created."]);

    let text = fs::read_to_string(dir.path().join(".vscode/settings.json"))?;
    assert!(text.starts_with("{\n    \"search.exclude\": {"));
    Ok(())
}

#[test]
fn scaffold_asks_again_on_blank_prefix() -> Result<()> {
    let dir = tempdir()?;
    let host = ScriptedHost::new().answer("").answer("   ").answer("XYZ");

    assert_eq!(execute(Command::ScaffoldSettings, &context(dir.path()), &host), CommandStatus::Completed);
    let settings = read_json(&dir.path().join(".vscode/settings.json"));
    assert_eq!(settings["CRS.ObjectNamePrefix"], json!("XYZ "));
    Ok(())
}

#[test]
fn scaffold_cancel_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let host = ScriptedHost::new().dismiss();

    let status = execute(Command::ScaffoldSettings, &context(dir.path()), &host);

    assert_eq!(status, CommandStatus::Cancelled);
    assert!(host.notifications.borrow().is_empty());
    assert!(!dir.path().join(".vscode/settings.json").exists());
    assert!(dir.path().join(".vscode").is_dir());
    Ok(())
}

#[test]
fn scaffold_respects_overwrite_answer() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(dir.path(), ".vscode/settings.json", r#"{"mine": true}"#);

    let declined = ScriptedHost::new().answer("ABC").confirming(false);
    execute(Command::ScaffoldSettings, &context(dir.path()), &declined);
    assert_eq!(read_json(&path), json!({"mine": true}));
    assert_eq!(
        declined.questions.borrow().as_slice(),
        ["settings.json already exists! Should this file be overwritten?"]
    );

    let accepted = ScriptedHost::new().answer("ABC").confirming(true);
    execute(Command::ScaffoldSettings, &context(dir.path()), &accepted);
    assert_eq!(read_json(&path)["CRS.ObjectNamePrefix"], json!("ABC "));
    assert!(read_json(&path).get("mine").is_none());
    Ok(())
}

#[test]
fn sidebar_commands_set_location() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(dir.path(), ".vscode/settings.json", r#"{"editor.wordWrap": "on"}"#);
    let host = ScriptedHost::new();

    assert_eq!(execute(Command::SidebarLeft, &context(dir.path()), &host), CommandStatus::Completed);
    assert_eq!(read_json(&path)["workbench.sideBar.location"], json!("left"));

    assert_eq!(execute(Command::SidebarRight, &context(dir.path()), &host), CommandStatus::Completed);
    let settings = read_json(&path);
    assert_eq!(settings["workbench.sideBar.location"], json!("right"));
    assert_eq!(settings["editor.wordWrap"], json!("on"));
    Ok(())
}

#[test]
fn sidebar_without_settings_reports_error() -> Result<()> {
    let dir = tempdir()?;
    let host = ScriptedHost::new();

    let status = execute(Command::SidebarLeft, &context(dir.path()), &host);

    assert_eq!(status, CommandStatus::Failed);
    let errors = host.messages(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("settings.json does not exist"), "{}", errors[0]);
    assert!(!dir.path().join(".vscode/settings.json").exists());
    Ok(())
}

#[test]
fn toggle_removes_and_restores_app_source_cop() -> Result<()> {
    let dir = tempdir()?;
    let setup = ScriptedHost::new().answer("ABC");
    execute(Command::ScaffoldSettings, &context(dir.path()), &setup);
    let settings_path = dir.path().join(".vscode/settings.json");
    let cop_path = write_file(dir.path(), "AppSourceCop.json", r#"{"mandatoryAffixes": ["OLD"]}"#);
    let original = read_json(&settings_path)["al.codeAnalyzers"].clone();

    let host = ScriptedHost::new().confirming(true);
    let config = ToolConfig::default();

    assert_eq!(toggle_app_source_cop(dir.path(), &config, &host)?, AnalyzerToggle::Removed);
    assert_eq!(read_json(&settings_path)["al.codeAnalyzers"], json!(["${CodeCop}", "${UICop}"]));
    assert!(!cop_path.exists());

    assert_eq!(toggle_app_source_cop(dir.path(), &config, &host)?, AnalyzerToggle::Added);
    assert_eq!(read_json(&settings_path)["al.codeAnalyzers"], original);
    assert_eq!(read_json(&cop_path), json!({"mandatoryAffixes": ["ABC"]}));
    Ok(())
}

#[test]
fn toggle_keeps_existing_cop_file_when_declined() -> Result<()> {
    let dir = tempdir()?;
    write_file(
        dir.path(),
        ".vscode/settings.json",
        r#"{"al.codeAnalyzers": ["${CodeCop}"], "CRS.ObjectNamePrefix": "ABC "}"#,
    );
    let cop_path = write_file(dir.path(), "AppSourceCop.json", r#"{"mandatoryAffixes": ["OLD"]}"#);
    let host = ScriptedHost::new().confirming(false);

    let toggle = toggle_app_source_cop(dir.path(), &ToolConfig::default(), &host)?;

    assert_eq!(toggle, AnalyzerToggle::Added);
    assert_eq!(read_json(&cop_path), json!({"mandatoryAffixes": ["OLD"]}));
    assert_eq!(host.messages(Severity::Info), vec!["AppSourceCop.json was left unchanged."]);
    Ok(())
}

#[test]
fn toggle_without_analyzer_list_warns_and_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(dir.path(), ".vscode/settings.json", r#"{"al.codeAnalyzers": "all"}"#);
    let host = ScriptedHost::new();

    let status = execute(Command::ToggleAppSourceCop, &context(dir.path()), &host);

    assert_eq!(status, CommandStatus::Failed);
    assert_eq!(host.messages(Severity::Warning).len(), 1);
    assert_eq!(read_json(&path), json!({"al.codeAnalyzers": "all"}));
    assert!(!dir.path().join("AppSourceCop.json").exists());
    Ok(())
}

#[test]
fn malformed_settings_are_reported() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), ".vscode/settings.json", "{ \"a\": ");
    let host = ScriptedHost::new();

    assert_eq!(execute(Command::ToggleAppSourceCop, &context(dir.path()), &host), CommandStatus::Failed);
    assert!(host.messages(Severity::Error)[0].contains("is not valid JSON"));

    let store = SettingsStore::for_project(dir.path(), &ToolConfig::default().paths);
    assert!(!store.has_property("a"));
    assert_eq!(store.get_property("a"), None);
    Ok(())
}
