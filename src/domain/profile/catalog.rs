//! Profile catalog - the declarative per-agent configuration table.
//!
//! Entries live in a YAML document keyed by agent name. The default document
//! is embedded at build time; a replacement can be loaded from disk. Every
//! entry is validated when the catalog is loaded, so resolution itself is
//! infallible.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use super::model::AgentProfile;
use super::synthesizer::synthesize_profile;
use crate::domain::agent::AgentRecord;
use crate::domain::foundation::ValidationError;

const EMBEDDED_CATALOG: &str = include_str!("../../../data/agent_profiles.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Catalog entry '{key}' is invalid: {source}")]
    InvalidEntry {
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Catalog contains a blank agent key")]
    BlankKey,
}

/// Where a resolved profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    Catalog,
    Synthesized,
}

/// A profile together with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub profile: AgentProfile,
    pub source: ProfileSource,
}

/// Validated, immutable table of agent profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    entries: BTreeMap<String, AgentProfile>,
}

impl ProfileCatalog {
    /// Parses and validates a YAML catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, AgentProfile> = serde_yaml::from_str(yaml)?;
        for (key, profile) in &entries {
            if key.trim().is_empty() {
                return Err(CatalogError::BlankKey);
            }
            profile.validate().map_err(|source| CatalogError::InvalidEntry {
                key: key.clone(),
                source,
            })?;
        }
        Ok(Self { entries })
    }

    /// Loads a catalog from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// The catalog shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Number of configured agents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no agents are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured agent names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.entries.get(name)
    }

    /// Returns the catalog entry for `name` unchanged, or a synthesized profile.
    pub fn resolve(&self, name: &str, capabilities: &[String]) -> AgentProfile {
        self.resolve_with_source(name, capabilities).profile
    }

    fn resolve_with_source(&self, name: &str, capabilities: &[String]) -> ResolvedProfile {
        match self.entries.get(name) {
            Some(profile) => ResolvedProfile {
                profile: profile.clone(),
                source: ProfileSource::Catalog,
            },
            None => ResolvedProfile {
                profile: synthesize_profile(name, capabilities),
                source: ProfileSource::Synthesized,
            },
        }
    }

    /// Resolves the profile for a stored agent.
    ///
    /// Synthesized profiles take `domain`, `tone` and `mission` from the agent's
    /// metadata when present. Catalog entries are returned untouched.
    pub fn resolve_for_agent(&self, agent: &AgentRecord) -> ResolvedProfile {
        let mut resolved = self.resolve_with_source(&agent.name, &agent.capabilities);
        if resolved.source == ProfileSource::Synthesized {
            let profile = &mut resolved.profile;
            if let Some(domain) = agent.metadata_str("domain") {
                profile.domain = domain.to_string();
            }
            if let Some(tone) = agent.metadata_str("tone") {
                profile.communication.tone = tone.to_string();
            }
            if let Some(mission) = agent.metadata_str("mission") {
                profile.mission = mission.to_string();
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn single_entry_yaml(key: &str, proficiency: f64) -> String {
        let profile = synthesize_profile("care_coordinator", &["scheduling".to_string()]);
        let mut value = serde_yaml::to_value(&profile).unwrap();
        value["expert_capabilities"][0]["proficiency"] = serde_yaml::Value::from(proficiency);
        let mut map = BTreeMap::new();
        map.insert(key.to_string(), value);
        serde_yaml::to_string(&map).unwrap()
    }

    #[test]
    fn embedded_catalog_loads_and_validates() {
        let catalog = ProfileCatalog::embedded().unwrap();
        assert!(catalog.len() >= 10);
        assert!(catalog.get("fda_regulatory_strategist").is_some());
    }

    #[test]
    fn resolve_returns_catalog_entry_unchanged() {
        let catalog = ProfileCatalog::embedded().unwrap();
        let expected = catalog.get("hipaa_compliance_officer").unwrap().clone();

        let resolved = catalog.resolve("hipaa_compliance_officer", &["ignored".to_string()]);

        assert_eq!(resolved, expected);
    }

    #[test]
    fn resolve_synthesizes_on_miss() {
        let catalog = ProfileCatalog::embedded().unwrap();
        let caps = vec!["diagnostics".to_string(), "triage".to_string()];

        let resolved = catalog.resolve("test_agent", &caps);

        assert_eq!(resolved, synthesize_profile("test_agent", &caps));
    }

    #[test]
    fn resolve_for_agent_applies_metadata_to_synthesized_profiles() {
        let catalog = ProfileCatalog::default();
        let agent = AgentRecord::new("oncology_navigator", vec![])
            .with_metadata("domain", "Oncology")
            .with_metadata("tone", "Compassionate")
            .with_metadata("mission", "Guide patients through treatment");

        let resolved = catalog.resolve_for_agent(&agent);

        assert_eq!(resolved.source, ProfileSource::Synthesized);
        assert_eq!(resolved.profile.domain, "Oncology");
        assert_eq!(resolved.profile.communication.tone, "Compassionate");
        assert_eq!(resolved.profile.mission, "Guide patients through treatment");
    }

    #[test]
    fn resolve_for_agent_leaves_catalog_entries_alone() {
        let catalog = ProfileCatalog::embedded().unwrap();
        let expected = catalog.get("medical_writer").unwrap().clone();
        let agent = AgentRecord::new("medical_writer", vec![]).with_metadata("domain", "Other");

        let resolved = catalog.resolve_for_agent(&agent);

        assert_eq!(resolved.source, ProfileSource::Catalog);
        assert_eq!(resolved.profile, expected);
    }

    #[test]
    fn rejects_out_of_range_proficiency_at_load_time() {
        let yaml = single_entry_yaml("care_coordinator", 1.5);
        let err = ProfileCatalog::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidEntry { ref key, .. } if key == "care_coordinator"
        ));
    }

    #[test]
    fn rejects_entries_with_missing_fields() {
        let yaml = "broken_agent:\n  role_type: Broken\n";
        assert!(matches!(
            ProfileCatalog::from_yaml_str(yaml),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn rejects_blank_keys() {
        let yaml = single_entry_yaml(" ", 0.9);
        assert!(matches!(
            ProfileCatalog::from_yaml_str(&yaml),
            Err(CatalogError::BlankKey)
        ));
    }

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(single_entry_yaml("care_coordinator", 0.9).as_bytes())
            .unwrap();

        let catalog = ProfileCatalog::from_path(file.path()).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["care_coordinator"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ProfileCatalog::from_path("/nonexistent/profiles.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/profiles.yaml"));
    }
}
