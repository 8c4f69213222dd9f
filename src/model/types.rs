//! Normalized documentation entities.

use serde::{Deserialize, Serialize};

/// One documentation item as received from the source feed.
///
/// Only the relative path is stored; the full link is always derived from the
/// base URL of the owning [`DocIndex`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocEntry {
    pub title: String,
    pub relative_path: String,
}

impl DocEntry {
    /// Returns `None` unless both fields are non-empty.
    pub fn new(title: impl Into<String>, relative_path: impl Into<String>) -> Option<Self> {
        let title = title.into();
        let relative_path = relative_path.into();
        if title.is_empty() || relative_path.is_empty() {
            return None;
        }
        Some(Self {
            title,
            relative_path,
        })
    }

    /// Plain concatenation of `base_url` and the relative path.
    pub fn full_url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.relative_path)
    }
}

/// Display-ready `{title, full_url}` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocLink {
    pub title: String,
    pub full_url: String,
}

impl DocLink {
    /// Markdown form, `[title](full_url)`.
    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.title, self.full_url)
    }
}

/// Ordered collection of entries built from one load.
///
/// Entries keep the order they had in the source payload; duplicates are kept.
/// An index is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIndex {
    source_url: String,
    base_url: String,
    entries: Vec<DocEntry>,
}

impl DocIndex {
    pub fn new(
        source_url: impl Into<String>,
        base_url: impl Into<String>,
        entries: Vec<DocEntry>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            base_url: base_url.into(),
            entries,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocEntry> {
        self.entries.iter()
    }

    /// Full link for `entry` under this index's base URL.
    pub fn full_url(&self, entry: &DocEntry) -> String {
        entry.full_url(&self.base_url)
    }

    pub fn link(&self, entry: &DocEntry) -> DocLink {
        DocLink {
            title: entry.title.clone(),
            full_url: self.full_url(entry),
        }
    }

    pub fn links(&self) -> Vec<DocLink> {
        self.entries.iter().map(|e| self.link(e)).collect()
    }

    /// Copy of this index whose links are built against `base_url`.
    pub fn rebase(&self, base_url: impl Into<String>) -> Self {
        Self {
            source_url: self.source_url.clone(),
            base_url: base_url.into(),
            entries: self.entries.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a DocIndex {
    type Item = &'a DocEntry;
    type IntoIter = std::slice::Iter<'a, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
