//! Job-title → expected-skill-keywords taxonomy.
//!
//! Loaded once at startup from a JSON object file and shared read-only
//! behind an `Arc` for the life of the process. A missing or malformed file
//! degrades to an empty taxonomy: every lookup then returns no keywords and
//! the keyword component of the ATS score contributes zero.

use std::path::Path;
use tracing::warn;

/// Ordered job-title → keywords mapping. Entry order matters: the fuzzy
/// fallback in `keywords_for` scans keys in stored order and takes the
/// first hit. Keys are lower-cased at construction.
#[derive(Debug, Clone, Default)]
pub struct KeywordTaxonomy {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordTaxonomy {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a taxonomy from explicit entries. Tests inject fabricated
    /// taxonomies through this instead of touching files.
    pub fn from_entries<K, W>(entries: impl IntoIterator<Item = (K, Vec<W>)>) -> Self
    where
        K: Into<String>,
        W: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, words)| {
                    (
                        key.into().trim().to_lowercase(),
                        words.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Loads the taxonomy from a JSON object file
    /// (`{"data analyst": ["sql", "excel"], ...}`). Any failure — missing
    /// file, bad JSON, non-object root — yields an empty taxonomy.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("keyword taxonomy unavailable at {}: {e}", path.display());
                return Self::empty();
            }
        };

        let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("keyword taxonomy at {} is malformed: {e}", path.display());
                return Self::empty();
            }
        };

        Self::from_entries(parsed.into_iter().map(|(key, value)| {
            let words: Vec<String> = value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            (key, words)
        }))
    }

    /// Expected keywords for a job title. Exact match on the normalized
    /// title first; otherwise the first stored key that contains the title
    /// or is contained by it; otherwise empty.
    pub fn keywords_for(&self, job_title: &str) -> &[String] {
        let title = job_title.trim().to_lowercase();
        if title.is_empty() {
            return &[];
        }

        if let Some((_, words)) = self.entries.iter().find(|(key, _)| *key == title) {
            return words;
        }

        self.entries
            .iter()
            .find(|(key, _)| key.contains(&title) || title.contains(key.as_str()))
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
