pub mod defaults;
pub mod operations;
pub mod store;

// Re-export the main API for easier access
pub use operations::{AnalyzerToggle, SidebarLocation, scaffold_settings, set_sidebar_location, toggle_app_source_cop};
pub use store::SettingsStore;
