//! Renders scanned objects into the four permission-set source files.
//!
//! Tiers nest as Objects < Read < Edit < Admin. Objects grants execute
//! on every object; Read and Edit add table data access on top of
//! Objects; Admin is self-contained with full access to everything.

use std::fmt::{self, Write as _};

use log::{debug, warn};

use crate::error::{Result, ScaffoldError};
use crate::object::scanner::quote_if_needed;
use crate::object::{ObjectKind, ScannedObject};

/// Longest permission set name the compiler accepts
const MAX_NAME_LENGTH: usize = 30;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionTier {
    Admin,
    Edit,
    Read,
    Objects,
}

impl PermissionTier {
    /// Tiers in id order
    pub const ALL: [PermissionTier; 4] = [
        PermissionTier::Admin,
        PermissionTier::Edit,
        PermissionTier::Read,
        PermissionTier::Objects,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PermissionTier::Admin => "Admin",
            PermissionTier::Edit => "Edit",
            PermissionTier::Read => "Read",
            PermissionTier::Objects => "Objects",
        }
    }

    /// Offset from the first id
    pub fn id_offset(&self) -> u32 {
        match self {
            PermissionTier::Admin => 0,
            PermissionTier::Edit => 1,
            PermissionTier::Read => 2,
            PermissionTier::Objects => 3,
        }
    }

    pub fn assignable(&self) -> bool {
        !matches!(self, PermissionTier::Objects)
    }

    pub fn included(&self) -> Option<PermissionTier> {
        match self {
            PermissionTier::Read | PermissionTier::Edit => Some(PermissionTier::Objects),
            PermissionTier::Admin | PermissionTier::Objects => None,
        }
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sorted, de-duplicated permission lines per tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionEntries {
    pub admin: Vec<String>,
    pub edit: Vec<String>,
    pub read: Vec<String>,
    pub objects: Vec<String>,
}

impl PermissionEntries {
    pub fn from_objects(objects: &[ScannedObject]) -> Self {
        let mut entries = Self::default();

        for object in objects {
            let generic = format!("{} {} = X", object.kind.keyword(), object.name);
            entries.objects.push(generic.clone());
            entries.admin.push(generic);

            if object.kind == ObjectKind::Table {
                entries.read.push(format!("tabledata {} = R", object.name));
                entries.edit.push(format!("tabledata {} = RIM", object.name));
                entries.admin.push(format!("tabledata {} = RIMD", object.name));
            }
        }

        for list in [&mut entries.admin, &mut entries.edit, &mut entries.read, &mut entries.objects] {
            list.sort();
            list.dedup();
        }
        entries
    }

    pub fn for_tier(&self, tier: PermissionTier) -> &[String] {
        match tier {
            PermissionTier::Admin => &self.admin,
            PermissionTier::Edit => &self.edit,
            PermissionTier::Read => &self.read,
            PermissionTier::Objects => &self.objects,
        }
    }
}

/// One generated permission set file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSetArtifact {
    pub tier: PermissionTier,
    pub id: u32,
    /// Permission set name, e.g. `My App Admin`
    pub name: String,
    pub file_name: String,
    pub content: String,
}

/// File name for a tier, e.g. `MyAppAdmin.PermissionSet.al`
pub fn artifact_file_name(base_name: &str, tier: PermissionTier) -> String {
    let compact: String = base_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}{}.PermissionSet.al", compact, tier.label())
}

#[derive(Debug, Clone)]
pub struct PermissionSetRenderer {
    base_name: String,
    namespace: String,
    first_id: u32,
}

impl PermissionSetRenderer {
    pub fn new(base_name: impl Into<String>, namespace: impl Into<String>, first_id: u32) -> Self {
        Self {
            base_name: base_name.into(),
            namespace: namespace.into(),
            first_id,
        }
    }

    /// Render all four tiers; ids run consecutively from the first id
    pub fn render(&self, entries: &PermissionEntries) -> Result<Vec<PermissionSetArtifact>> {
        PermissionTier::ALL
            .iter()
            .map(|&tier| -> Result<PermissionSetArtifact> {
                let id = self.first_id.checked_add(tier.id_offset()).ok_or_else(|| {
                    ScaffoldError::InvalidValue(format!("id {} leaves no room for four permission sets", self.first_id))
                })?;
                Ok(self.render_tier(tier, id, entries.for_tier(tier)))
            })
            .collect()
    }

    fn set_name(&self, tier: PermissionTier) -> String {
        format!("{} {}", self.base_name, tier.label())
    }

    fn render_tier(&self, tier: PermissionTier, id: u32, permissions: &[String]) -> PermissionSetArtifact {
        let name = self.set_name(tier);
        if name.chars().count() > MAX_NAME_LENGTH {
            warn!("Permission set name {:?} is longer than {} characters", name, MAX_NAME_LENGTH);
        }

        let mut content = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(content, "namespace {};", self.namespace);
        let _ = writeln!(content);
        let _ = writeln!(content, "permissionset {} {}", id, quote_if_needed(&name));
        let _ = writeln!(content, "{{");
        let _ = writeln!(content, "{INDENT}Assignable = {};", tier.assignable());
        let _ = writeln!(content, "{INDENT}Caption = '{}';", name.replace('\'', "''"));
        if let Some(included) = tier.included() {
            let _ = writeln!(content, "{INDENT}IncludedPermissionSets = {};", quote_if_needed(&self.set_name(included)));
        }
        if !permissions.is_empty() {
            let _ = writeln!(content, "{INDENT}Permissions =");
            let _ = writeln!(content, "{}", permission_lines(permissions));
        }
        let _ = writeln!(content, "}}");

        debug!("Rendered {} with id {} and {} permissions", name, id, permissions.len());
        PermissionSetArtifact {
            tier,
            id,
            file_name: artifact_file_name(&self.base_name, tier),
            name,
            content,
        }
    }
}

/// `entry,` lines with the last one terminated by `;`
fn permission_lines(permissions: &[String]) -> String {
    let indent = INDENT.repeat(2);
    let mut lines = permissions
        .iter()
        .map(|entry| format!("{indent}{entry}"))
        .collect::<Vec<_>>()
        .join(",\n");
    lines.push(';');
    lines
}
