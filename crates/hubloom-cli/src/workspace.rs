//! Workspace layout: role folders for agent artifacts, one folder per hub
//!
//! ```text
//! <root>/
//!   .hubloom/config.toml
//!   personas/    one file per persona
//!   writers/     one file per writer
//!   assemblers/  one file per assembler
//!   hubs/<id>/<id>.md
//! ```

use std::path::{Path, PathBuf};

use hubloom_core::{HubArtifact, HubloomConfig, Result};
use hubloom_registry::{ArtifactStore, Role};

/// A hubloom workspace rooted at one directory
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scaffold the role folders and write the default config
    pub fn init(&self) -> Result<()> {
        for role in [Role::Persona, Role::Writer, Role::Assembler] {
            std::fs::create_dir_all(self.root.join(role.folder()))?;
        }
        std::fs::create_dir_all(self.root.join("hubs"))?;
        HubloomConfig::write_default(&self.root)?;
        Ok(())
    }

    /// Load workspace configuration, falling back to defaults
    pub fn config(&self) -> Result<HubloomConfig> {
        HubloomConfig::load_or_default(&self.root)
    }

    /// The artifact store backing the registry's dynamic path
    pub fn store(&self) -> FsArtifactStore {
        FsArtifactStore {
            root: self.root.clone(),
        }
    }

    /// Persist an assembled hub: one folder per hub, primary document inside
    pub fn save_hub(&self, artifact: &HubArtifact) -> Result<PathBuf> {
        let hub_dir = self.root.join("hubs").join(&artifact.frontmatter.id);
        std::fs::create_dir_all(&hub_dir)?;
        let path = hub_dir.join(format!("{}.md", artifact.frontmatter.id));
        std::fs::write(&path, artifact.to_markdown())?;
        Ok(path)
    }
}

/// Filesystem-backed artifact store with one folder per role
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl ArtifactStore for FsArtifactStore {
    fn list(&self, role: Role) -> Result<Vec<String>> {
        let folder = self.root.join(role.folder());
        if !folder.exists() {
            return Ok(Vec::new());
        }

        let mut filenames = Vec::new();
        for entry in std::fs::read_dir(&folder)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                filenames.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        filenames.sort();
        Ok(filenames)
    }

    fn read(&self, role: Role, filename: &str) -> Result<String> {
        let path = self.root.join(role.folder()).join(filename);
        Ok(std::fs::read_to_string(path)?)
    }
}
