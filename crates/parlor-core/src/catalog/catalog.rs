use super::builtin::builtin_personalities;
use super::persona_file;
use super::personality::Personality;
use super::profile::PersonalityConfig;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Ordered list of personalities plus the model configuration for each id.
///
/// A personality may exist without a config; asking the generator to answer
/// for it yields a not-found error rather than a panic.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Personality>,
    configs: HashMap<String, PersonalityConfig>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (p, cfg) in builtin_personalities() {
            catalog.insert(p, Some(cfg));
        }
        catalog
    }

    /// Add a personality. Returns `false` (and changes nothing) if the id is
    /// already taken.
    pub fn insert(&mut self, personality: Personality, config: Option<PersonalityConfig>) -> bool {
        if self.get(&personality.id).is_some() {
            return false;
        }
        if let Some(cfg) = config {
            self.configs.insert(personality.id.clone(), cfg);
        }
        self.entries.push(personality);
        true
    }

    /// Append user-defined personalities found in `dir`. Returns how many
    /// were added.
    pub fn extend_from_dir(&mut self, dir: &Path) -> usize {
        let mut added = 0;
        for (p, cfg) in persona_file::discover(dir) {
            let id = p.id.clone();
            if self.insert(p, Some(cfg)) {
                added += 1;
            } else {
                warn!(id = %id, "personality id already in catalog, skipping");
            }
        }
        if added > 0 {
            info!(count = added, dir = %dir.display(), "custom personalities loaded");
        }
        added
    }

    pub fn personalities(&self) -> &[Personality] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Personality> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn config(&self, id: &str) -> Option<&PersonalityConfig> {
        self.configs.get(id)
    }

    /// Look a personality up by id, by full name, or by a name fragment that
    /// matches exactly one entry (all case-insensitive except the id).
    pub fn resolve(&self, key: &str) -> Option<&Personality> {
        if let Some(p) = self.get(key) {
            return Some(p);
        }
        let needle = key.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(p) = self.entries.iter().find(|p| p.name.to_lowercase() == needle) {
            return Some(p);
        }
        let mut partial = self
            .entries
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle));
        match (partial.next(), partial.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
