//! Person alias resolution.
//!
//! A fixed alias → canonical-name table; lookups are exact (case- and
//! punctuation-sensitive) and unmapped names pass through unchanged. Applied
//! to the `persons` field only, never to organizations.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Known aliases in the bundled corpus. Checked verbatim; there is no fuzzy
/// or partial matching.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("W. Smith", "William Smith"),
    ("Bill Smith", "William Smith"),
    ("A. Moreno", "Antonio Moreno"),
    ("Tony Moreno", "Antonio Moreno"),
    ("L. Castillo", "Lucia Castillo"),
    ("J. P. Varga", "Janos Varga"),
    ("Varga", "Janos Varga"),
];

/// Owns the alias table, constructed once and passed to the pipeline.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    table: HashMap<String, String>,
}

impl AliasResolver {
    /// Resolver backed by the built-in table.
    pub fn new() -> Self {
        Self::from_pairs(
            BUILTIN_ALIASES
                .iter()
                .map(|&(a, c)| (a.to_string(), c.to_string())),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Load a replacement table from a JSON object `{ "alias": "canonical" }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read alias table {}", path.display()))?;
        let table: HashMap<String, String> = serde_json::from_str(&text)
            .with_context(|| format!("alias table {} is not a JSON object", path.display()))?;
        Ok(Self { table })
    }

    /// Canonical form of a person mention: the mapped name if the mention is
    /// a known alias, otherwise the mention itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.table.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new()
    }
}
