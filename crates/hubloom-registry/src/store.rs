//! Artifact store boundary
//!
//! The registry's dynamic path reads agent definitions from an external
//! store with one folder per role. The store only lists filenames and
//! returns raw text; ids are derived from filenames with the extension
//! stripped. Filesystem and in-memory implementations live with their
//! callers; the in-memory store here backs tests.

use std::collections::HashMap;

use hubloom_core::Result;

/// Agent role families the registry resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Persona,
    Writer,
    Assembler,
}

impl Role {
    /// Store folder name for this role
    pub fn folder(&self) -> &'static str {
        match self {
            Role::Persona => "personas",
            Role::Writer => "writers",
            Role::Assembler => "assemblers",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Persona => write!(f, "persona"),
            Role::Writer => write!(f, "writer"),
            Role::Assembler => write!(f, "assembler"),
        }
    }
}

/// Read side of the per-role artifact store
pub trait ArtifactStore: Send + Sync {
    /// List artifact filenames for a role folder
    fn list(&self, role: Role) -> Result<Vec<String>>;

    /// Read one artifact's raw text
    fn read(&self, role: Role, filename: &str) -> Result<String>;
}

/// Derive an agent id from an artifact filename (extension stripped)
pub fn id_from_filename(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

/// In-memory artifact store for tests and built-in-only registries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    artifacts: HashMap<(Role, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact under a role folder
    pub fn insert(
        mut self,
        role: Role,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.artifacts.insert((role, filename.into()), content.into());
        self
    }
}

impl ArtifactStore for MemoryStore {
    fn list(&self, role: Role) -> Result<Vec<String>> {
        let mut filenames: Vec<String> = self
            .artifacts
            .keys()
            .filter(|(r, _)| *r == role)
            .map(|(_, name)| name.clone())
            .collect();
        filenames.sort();
        Ok(filenames)
    }

    fn read(&self, role: Role, filename: &str) -> Result<String> {
        self.artifacts
            .get(&(role, filename.to_string()))
            .cloned()
            .ok_or_else(|| {
                hubloom_core::HubloomError::NotFound(format!(
                    "{} artifact {}",
                    role, filename
                ))
            })
    }
}
