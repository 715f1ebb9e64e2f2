use super::error::DefinitionError;
use crate::model::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current definition format version
pub const DEFINITION_VERSION: u32 = 1;

/// Portable description of one structured-playlist forest
///
/// This is the document users export and import. Trees are keyed by
/// playlist ID; node identity does not survive a save/load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Definition {
    pub version: u32,

    pub name: String,

    pub provider: Provider,

    /// Owner of the definition (omitted from files when empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,

    /// Top-level playlists, each with its dependency tree
    pub playlists: Vec<PlaylistSpec>,
}

/// A playlist and the playlists it absorbs items from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistSpec {
    pub id: String,

    #[serde(default)]
    pub dependencies: Vec<PlaylistSpec>,
}

impl PlaylistSpec {
    /// A spec with no dependencies
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
        }
    }

    /// A spec with the given dependencies
    pub fn with_dependencies(id: impl Into<String>, dependencies: Vec<PlaylistSpec>) -> Self {
        Self {
            id: id.into(),
            dependencies,
        }
    }
}

impl Definition {
    /// Create an empty definition at the current version
    pub fn new(name: impl Into<String>, provider: Provider, user_id: impl Into<String>) -> Self {
        Self {
            version: DEFINITION_VERSION,
            name: name.into(),
            provider,
            user_id: user_id.into(),
            playlists: Vec::new(),
        }
    }

    /// Parse a definition document
    ///
    /// Only checks the document against the schema; cycles are reported
    /// by [`crate::validation::validate_definition`].
    pub fn from_json(raw: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize to the pretty-printed file format
    pub fn to_json_pretty(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the definition declares no playlists at all
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Distinct playlist IDs in depth-first, first-appearance order
    pub fn playlist_ids(&self) -> Vec<String> {
        fn walk(spec: &PlaylistSpec, seen: &mut HashSet<String>, out: &mut Vec<String>) {
            if seen.insert(spec.id.clone()) {
                out.push(spec.id.clone());
            }
            for dependency in &spec.dependencies {
                walk(dependency, seen, out);
            }
        }

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for spec in &self.playlists {
            walk(spec, &mut seen, &mut ids);
        }
        ids
    }

    /// Every (dependent, dependency) playlist ID pair, duplicates included
    pub fn edges(&self) -> Vec<(String, String)> {
        fn walk(spec: &PlaylistSpec, out: &mut Vec<(String, String)>) {
            for dependency in &spec.dependencies {
                out.push((spec.id.clone(), dependency.id.clone()));
                walk(dependency, out);
            }
        }

        let mut edges = Vec::new();
        for spec in &self.playlists {
            walk(spec, &mut edges);
        }
        edges
    }
}
