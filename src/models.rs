use crate::types::{LanguageBytes, RawRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized repository record handed to aggregators and the serving layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    /// `owner/repo`
    pub name: String,
    pub star_count: u64,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Self {
            id: raw.id,
            name: raw.full_name,
            star_count: raw.stargazers_count,
        }
    }
}

/// One row of the language ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedLanguage {
    pub language: String,
    pub byte_count: u64,
}

/// Running byte count per language, merged one repository at a time.
#[derive(Debug, Clone, Default)]
pub struct LanguageTally {
    bytes: HashMap<String, u64>,
}

impl LanguageTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a repository's language map into the tally.
    pub fn merge(&mut self, languages: LanguageBytes) {
        for (language, bytes) in languages {
            *self.bytes.entry(language).or_insert(0) += bytes;
        }
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.bytes.get(language).copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Descending by byte count; equal counts fall back to language name so
    /// the output does not depend on which fetch finished first.
    pub fn into_ranked(self) -> Vec<RankedLanguage> {
        let mut ranked: Vec<RankedLanguage> = self
            .bytes
            .into_iter()
            .map(|(language, byte_count)| RankedLanguage { language, byte_count })
            .collect();

        ranked.sort_by(|a, b| {
            b.byte_count
                .cmp(&a.byte_count)
                .then_with(|| a.language.cmp(&b.language))
        });

        ranked
    }
}
