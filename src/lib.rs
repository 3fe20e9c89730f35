#![recursion_limit = "256"]
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod launch;
pub mod object;
pub mod permission;
pub mod settings;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use commands::{Command, CommandContext, CommandStatus, execute};
pub use config::ToolConfig;
pub use error::ScaffoldError;
pub use host::{ConsoleHost, Host, Severity};

pub use object::{ObjectKind, ObjectProcessor, ScanOptions, ScanResult};
pub use permission::{PermissionSetGenerator, PermissionTier};
pub use settings::SettingsStore;

// Re-export utility functions
pub use utils::file_utils;
