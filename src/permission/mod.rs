pub mod generator;
pub mod project;
pub mod renderer;

// Re-export the main API for easier access
pub use generator::{GenerationReport, PermissionSetGenerator, generate_permission_sets};
pub use project::{IdRange, ProjectManifest};
pub use renderer::{PermissionEntries, PermissionSetArtifact, PermissionSetRenderer, PermissionTier};
