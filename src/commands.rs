//! The six user-facing commands and their error reporting.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::ToolConfig;
use crate::error::ScaffoldError;
use crate::host::{Host, Severity};
use crate::launch::append_launch_target;
use crate::permission::generate_permission_sets;
use crate::settings::{SidebarLocation, scaffold_settings, set_sidebar_location, toggle_app_source_cop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ScaffoldSettings,
    SidebarLeft,
    SidebarRight,
    ToggleAppSourceCop,
    AddLaunchTarget,
    GeneratePermissionSets,
}

impl Command {
    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::ScaffoldSettings => "init-settings",
            Command::SidebarLeft => "sidebar-left",
            Command::SidebarRight => "sidebar-right",
            Command::ToggleAppSourceCop => "toggle-app-source-cop",
            Command::AddLaunchTarget => "add-launch-target",
            Command::GeneratePermissionSets => "generate-permission-sets",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The project a command runs against
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config: ToolConfig,
}

impl CommandContext {
    pub fn new(root: impl AsRef<Path>, config: ToolConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Completed,
    /// The user dismissed a prompt; nothing was reported
    Cancelled,
    /// An error was reported through the host
    Failed,
}

/// Run one command. Errors end the command and are reported through `host`.
pub fn execute(command: Command, context: &CommandContext, host: &dyn Host) -> CommandStatus {
    info!("Running {} in {}", command, context.root.display());
    let root = context.root.as_path();
    let config = &context.config;

    let result = match command {
        Command::ScaffoldSettings => scaffold_settings(root, config, host),
        Command::SidebarLeft => set_sidebar_location(root, config, host, SidebarLocation::Left),
        Command::SidebarRight => set_sidebar_location(root, config, host, SidebarLocation::Right),
        Command::ToggleAppSourceCop => toggle_app_source_cop(root, config, host).map(|_| ()),
        Command::AddLaunchTarget => append_launch_target(root, config, host).map(|_| ()),
        Command::GeneratePermissionSets => generate_permission_sets(root, config, host).map(|_| ()),
    };

    match result {
        Ok(()) => CommandStatus::Completed,
        Err(e) if e.is_silent() => {
            debug!("{} cancelled", command);
            CommandStatus::Cancelled
        }
        Err(e) => {
            host.notify(severity_of(&e), &format!("{:#}", e));
            CommandStatus::Failed
        }
    }
}

fn severity_of(error: &ScaffoldError) -> Severity {
    match error {
        ScaffoldError::InvalidValue(_) => Severity::Warning,
        _ => Severity::Error,
    }
}
