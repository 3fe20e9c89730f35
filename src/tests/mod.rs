#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tempfile::tempdir;

    use crate::commands::{Command, CommandContext, CommandStatus, execute};
    use crate::config::{PROJECT_CONFIG_FILE, ToolConfig};
    use crate::host::{Host, Severity};
    use crate::settings::SettingsStore;

    /// Answers prompts from a queue and says yes to every question
    #[derive(Default)]
    struct QueueHost {
        answers: RefCell<VecDeque<String>>,
        log: RefCell<Vec<(Severity, String)>>,
    }

    impl QueueHost {
        fn with(answers: &[&str]) -> Self {
            let host = Self::default();
            host.answers.borrow_mut().extend(answers.iter().map(|a| a.to_string()));
            host
        }

        fn count(&self, severity: Severity) -> usize {
            self.log.borrow().iter().filter(|(s, _)| *s == severity).count()
        }
    }

    impl Host for QueueHost {
        fn prompt(&self, _message: &str) -> Option<String> {
            self.answers.borrow_mut().pop_front()
        }

        fn confirm(&self, _message: &str) -> bool {
            true
        }

        fn notify(&self, severity: Severity, message: &str) {
            self.log.borrow_mut().push((severity, message.to_string()));
        }
    }

    fn read_json(path: &Path) -> Result<Value> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn setup_project(root: &Path) -> Result<()> {
        fs::write(
            root.join("app.json"),
            r#"{"idRanges": [{"from": 70000, "to": 70010}]}"#,
        )?;
        fs::create_dir_all(root.join("src"))?;
        fs::write(
            root.join("src").join("Item.Table.al"),
            "namespace Acme.Stock;\ntable 70000 StockItem\n{\n}\n",
        )?;
        fs::create_dir_all(root.join(".vscode"))?;
        fs::write(
            root.join(".vscode").join("launch.json"),
            r#"{"version": "0.2.0", "configurations": []}"#,
        )?;
        Ok(())
    }

    #[test]
    fn test_full_project_workflow() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        setup_project(root)?;

        let context = CommandContext::new(root, ToolConfig::default());
        let host = QueueHost::with(&["ACM", "Dev", "Stock"]);

        for command in [
            Command::ScaffoldSettings,
            Command::SidebarLeft,
            Command::ToggleAppSourceCop,
            Command::ToggleAppSourceCop,
            Command::AddLaunchTarget,
            Command::GeneratePermissionSets,
        ] {
            assert_eq!(execute(command, &context, &host), CommandStatus::Completed, "{}", command);
        }
        assert_eq!(host.count(Severity::Error), 0);
        assert_eq!(host.count(Severity::Warning), 0);

        let store = SettingsStore::for_project(root, &context.config.paths);
        assert_eq!(store.get_property("workbench.sideBar.location"), Some(json!("left")));
        assert_eq!(
            store.get_property("al.codeAnalyzers"),
            Some(json!(["${AppSourceCop}", "${CodeCop}", "${UICop}"]))
        );
        assert_eq!(
            read_json(&root.join("AppSourceCop.json"))?,
            json!({"mandatoryAffixes": ["ACM"]})
        );

        let launch = read_json(&root.join(".vscode").join("launch.json"))?;
        assert_eq!(launch["configurations"][0]["name"], json!("1 - Dev"));

        let objects = fs::read_to_string(
            root.join("src")
                .join("PermissionSets")
                .join("StockObjects.PermissionSet.al"),
        )?;
        assert!(objects.starts_with("namespace Acme.Stock;\n"));
        assert!(objects.contains("permissionset 70003 \"Stock Objects\""));
        assert!(objects.contains("table StockItem = X;"));
        Ok(())
    }

    #[test]
    fn test_project_config_relocates_documents() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::write(
            root.join(PROJECT_CONFIG_FILE),
            "[paths]\nsettings = \"editor/settings.json\"\n",
        )?;

        let config = ToolConfig::load(root, None)?;
        let context = CommandContext::new(root, config);
        let host = QueueHost::with(&["ACM"]);

        assert_eq!(execute(Command::ScaffoldSettings, &context, &host), CommandStatus::Completed);
        assert!(root.join("editor").join("settings.json").is_file());
        assert!(!root.join(".vscode").exists());
        Ok(())
    }
}
