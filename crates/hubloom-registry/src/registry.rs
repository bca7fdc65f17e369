//! Agent registry: built-in table first, dynamic artifact store second

use hubloom_agents::{
    builtin_assemblers, builtin_personas, builtin_writers, Assembler, Persona, Writer,
};
use hubloom_core::{parse_artifact, HubloomError, ParsedArtifact, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{id_from_filename, ArtifactStore, Role};

/// One catalogue entry shown to the Architect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub description: String,
}

/// The catalogue of available strategies the Architect selects from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub assemblers: Vec<ManifestEntry>,
    pub personas: Vec<ManifestEntry>,
}

/// Resolves agent ids to Persona/Writer/Assembler instances
///
/// Resolution checks the fixed built-in table first, then the dynamic
/// artifact store. Built-ins shadow store artifacts with the same id.
pub struct Registry<S: ArtifactStore> {
    personas: Vec<Persona>,
    writers: Vec<Writer>,
    assemblers: Vec<Assembler>,
    store: S,
}

impl<S: ArtifactStore> Registry<S> {
    /// Create a registry over an artifact store, seeded with the built-in
    /// rosters
    pub fn new(store: S) -> Self {
        Self {
            personas: builtin_personas(),
            writers: builtin_writers(),
            assemblers: builtin_assemblers(),
            store,
        }
    }

    /// Resolve a persona id
    pub fn resolve_persona(&self, id: &str) -> Result<Persona> {
        if let Some(persona) = self.personas.iter().find(|p| p.id == id) {
            return Ok(persona.clone());
        }
        let parsed = self.read_artifact(Role::Persona, id)?;
        Ok(Persona::from_parsed(id, &parsed))
    }

    /// Resolve a writer id
    pub fn resolve_writer(&self, id: &str) -> Result<Writer> {
        if let Some(writer) = self.writers.iter().find(|w| w.id == id) {
            return Ok(writer.clone());
        }
        let parsed = self.read_artifact(Role::Writer, id)?;
        Ok(Writer::from_parsed(id, &parsed))
    }

    /// Resolve an assembler id
    pub fn resolve_assembler(&self, id: &str) -> Result<Assembler> {
        if let Some(assembler) = self.assemblers.iter().find(|a| a.id == id) {
            return Ok(assembler.clone());
        }
        let parsed = self.read_artifact(Role::Assembler, id)?;
        let assembler = Assembler::from_parsed(id, &parsed);
        if assembler.writer_ids.is_empty() {
            return Err(HubloomError::Artifact(format!(
                "Assembler {} declares no eligible writers",
                id
            )));
        }
        Ok(assembler)
    }

    /// The catalogue of every known assembler and persona
    ///
    /// Built-ins come first, then store artifacts in filename order.
    /// Artifacts that fail to parse are skipped, not fatal to listing.
    pub fn manifest(&self) -> Manifest {
        let mut manifest = Manifest::default();

        for assembler in &self.assemblers {
            manifest.assemblers.push(ManifestEntry {
                id: assembler.id.clone(),
                description: assembler.description.clone(),
            });
        }
        for persona in &self.personas {
            manifest.personas.push(ManifestEntry {
                id: persona.id.clone(),
                description: persona.description.clone(),
            });
        }

        for (id, parsed) in self.stored_artifacts(Role::Assembler) {
            if manifest.assemblers.iter().any(|e| e.id == id) {
                continue;
            }
            let assembler = Assembler::from_parsed(&id, &parsed);
            if assembler.writer_ids.is_empty() {
                warn!("Skipping assembler artifact {}: no eligible writers", id);
                continue;
            }
            manifest.assemblers.push(ManifestEntry {
                id,
                description: assembler.description,
            });
        }

        for (id, parsed) in self.stored_artifacts(Role::Persona) {
            if manifest.personas.iter().any(|e| e.id == id) {
                continue;
            }
            let persona = Persona::from_parsed(&id, &parsed);
            manifest.personas.push(ManifestEntry {
                id,
                description: persona.description,
            });
        }

        manifest
    }

    /// Read and parse one artifact from the store
    fn read_artifact(&self, role: Role, id: &str) -> Result<ParsedArtifact> {
        let filenames = self.store.list(role)?;
        let filename = filenames
            .iter()
            .find(|name| id_from_filename(name) == id)
            .ok_or_else(|| HubloomError::NotFound(format!("{} {}", role, id)))?;

        let raw = self.store.read(role, filename)?;
        let parsed = parse_artifact(&raw);
        if let Some(declared) = parsed.field("id") {
            if declared != id {
                return Err(HubloomError::Artifact(format!(
                    "{} artifact {} declares conflicting id {}",
                    role, id, declared
                )));
            }
        }
        Ok(parsed)
    }

    /// Every parseable store artifact for a role, in filename order
    fn stored_artifacts(&self, role: Role) -> Vec<(String, ParsedArtifact)> {
        let filenames = match self.store.list(role) {
            Ok(filenames) => filenames,
            Err(e) => {
                warn!("Listing {} artifacts failed: {}", role, e);
                return Vec::new();
            }
        };

        let mut artifacts = Vec::new();
        for filename in filenames {
            let id = id_from_filename(&filename).to_string();
            match self.store.read(role, &filename) {
                Ok(raw) => {
                    let parsed = parse_artifact(&raw);
                    if let Some(declared) = parsed.field("id") {
                        if declared != id {
                            warn!(
                                "Skipping {} artifact {}: conflicting id {}",
                                role, filename, declared
                            );
                            continue;
                        }
                    }
                    artifacts.push((id, parsed));
                }
                Err(e) => {
                    warn!("Skipping {} artifact {}: {}", role, filename, e);
                }
            }
        }
        artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registry_with_store(store: MemoryStore) -> Registry<MemoryStore> {
        Registry::new(store)
    }

    #[test]
    fn test_resolves_builtin_first() {
        // A store artifact with a built-in id is shadowed
        let store = MemoryStore::new().insert(
            Role::Persona,
            "mentor.md",
            "name: Impostor\n\nNot the real mentor.",
        );
        let registry = registry_with_store(store);
        let persona = registry.resolve_persona("mentor").unwrap();
        assert_eq!(persona.name, "The Mentor");
    }

    #[test]
    fn test_resolves_dynamic_artifact() {
        let store = MemoryStore::new().insert(
            Role::Writer,
            "qa.md",
            "description: Q&A format\n\nAnswer the question in the heading first.",
        );
        let registry = registry_with_store(store);
        let writer = registry.resolve_writer("qa").unwrap();
        assert_eq!(writer.id, "qa");
        assert!(writer.writing_strategy.contains("heading first"));
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let registry = registry_with_store(MemoryStore::new());
        assert!(matches!(
            registry.resolve_writer("ghost"),
            Err(HubloomError::NotFound(_))
        ));
    }

    #[test]
    fn test_dynamic_assembler_requires_writers() {
        let store = MemoryStore::new().insert(
            Role::Assembler,
            "broken.md",
            "description: No writers declared\n\nStrategy text.",
        );
        let registry = registry_with_store(store);
        assert!(matches!(
            registry.resolve_assembler("broken"),
            Err(HubloomError::Artifact(_))
        ));
    }

    #[test]
    fn test_conflicting_declared_id_rejected() {
        let store = MemoryStore::new().insert(
            Role::Persona,
            "coach.md",
            "id: someone-else\n\nBody.",
        );
        let registry = registry_with_store(store);
        assert!(matches!(
            registry.resolve_persona("coach"),
            Err(HubloomError::Artifact(_))
        ));
    }

    #[test]
    fn test_manifest_includes_builtins_and_store() {
        let store = MemoryStore::new()
            .insert(
                Role::Assembler,
                "tutorial.md",
                "description: Tutorial chain\nwriterIds: howto\n\nChain tutorials.",
            )
            .insert(
                Role::Persona,
                "coach.md",
                "description: Pushy trainer voice\n\nPush hard.",
            );
        let registry = registry_with_store(store);
        let manifest = registry.manifest();

        let assembler_ids: Vec<&str> =
            manifest.assemblers.iter().map(|e| e.id.as_str()).collect();
        assert!(assembler_ids.contains(&"pillar"));
        assert!(assembler_ids.contains(&"tutorial"));

        let persona_ids: Vec<&str> = manifest.personas.iter().map(|e| e.id.as_str()).collect();
        assert!(persona_ids.contains(&"mentor"));
        assert!(persona_ids.contains(&"coach"));
    }

    #[test]
    fn test_manifest_skips_unparseable_artifacts() {
        let store = MemoryStore::new()
            .insert(
                Role::Assembler,
                "no-writers.md",
                "description: Unusable\n\nBody.",
            )
            .insert(
                Role::Persona,
                "wrong-id.md",
                "id: mismatch\n\nBody.",
            );
        let registry = registry_with_store(store);
        let manifest = registry.manifest();

        assert!(!manifest.assemblers.iter().any(|e| e.id == "no-writers"));
        assert!(!manifest.personas.iter().any(|e| e.id == "wrong-id"));
        // Built-ins are unaffected
        assert!(manifest.personas.iter().any(|e| e.id == "mentor"));
    }
}
