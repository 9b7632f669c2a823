
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// One registration: every phrase in `phrases` stands for `canonical`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasEntry {
    pub phrases: Vec<String>,
    #[serde(rename = "to")]
    pub canonical: String,
}

/// Frozen phrase → canonical reference table. Built once through
/// [`AliasConfig::builder`] and then only read.
#[derive(Debug, Clone, Default)]
pub struct AliasConfig {
    entries: Vec<AliasEntry>,
    phrase_map: HashMap<String, usize>,
}

impl AliasConfig {
    pub fn builder() -> AliasConfigBuilder {
        AliasConfigBuilder::default()
    }

    /// Reads a JSON array of `{"phrases": [...], "to": "..."}` entries.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<AliasEntry> = serde_json::from_str(json)?;

        let mut builder = AliasConfig::builder();
        for entry in entries {
            builder.register(entry.phrases, entry.canonical);
        }
        builder.build()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = AliasConfig::from_json_str(&content)?;
        debug!(path = %path.display(), entries = config.len(), "Loaded alias configuration");
        Ok(config)
    }

    /// The canonical reference string for an exact (trimmed) phrase match.
    pub fn resolve(&self, phrase: &str) -> Option<&str> {
        self.phrase_map
            .get(phrase.trim())
            .map(|&index| self.entries[index].canonical.as_str())
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AliasConfigBuilder {
    entries: Vec<AliasEntry>,
}

impl AliasConfigBuilder {
    pub fn register<I, S>(&mut self, phrases: I, canonical: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|phrase| phrase.as_ref().trim().to_string())
            .collect();

        self.entries.push(AliasEntry {
            phrases,
            canonical: canonical.into(),
        });
        self
    }

    /// Chaining form of [`register`](Self::register).
    pub fn map<I, S>(mut self, phrases: I, canonical: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register(phrases, canonical);
        self
    }

    /// Freezes the table. A phrase may only ever stand for one canonical
    /// string, and must not be blank.
    pub fn build(self) -> Result<AliasConfig, ConfigError> {
        let mut phrase_map: HashMap<String, usize> = HashMap::new();

        for (index, entry) in self.entries.iter().enumerate() {
            for phrase in &entry.phrases {
                if phrase.is_empty() {
                    return Err(ConfigError::EmptyPhrase {
                        canonical: entry.canonical.clone(),
                    });
                }

                if let Some(&existing) = phrase_map.get(phrase) {
                    let first = &self.entries[existing].canonical;
                    if *first != entry.canonical {
                        return Err(ConfigError::ConflictingPhrase {
                            phrase: phrase.clone(),
                            first: first.clone(),
                            second: entry.canonical.clone(),
                        });
                    }
                    continue;
                }

                phrase_map.insert(phrase.clone(), index);
            }
        }

        Ok(AliasConfig {
            entries: self.entries,
            phrase_map,
        })
    }
}
