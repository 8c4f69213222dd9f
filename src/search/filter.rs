//! Case-insensitive substring filtering over a loaded index.

use crate::model::{DocEntry, DocIndex, DocLink};

/// Entries of one index that matched one query, in index order.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    index: &'a DocIndex,
    query: String,
    filtered: bool,
    hits: Vec<&'a DocEntry>,
}

impl<'a> SearchResults<'a> {
    /// The query as given by the caller.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-blank query was applied. `false` means every entry is listed.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// No entry matched. This is a normal outcome, not a load failure.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn entries(&self) -> &[&'a DocEntry] {
        &self.hits
    }

    pub fn index(&self) -> &'a DocIndex {
        self.index
    }

    /// Display-ready links, built with the index's base URL.
    pub fn links(&self) -> Vec<DocLink> {
        self.hits.iter().map(|entry| self.index.link(entry)).collect()
    }
}

/// Whether `title` contains `needle`, ignoring case.
///
/// `needle` must already be lower-cased.
pub fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

/// Filter `index` by `query`.
///
/// A query that is empty after trimming returns every entry. Otherwise both
/// sides are lower-cased and an entry is kept when its title contains the
/// query anywhere. Inner whitespace is significant and no further Unicode
/// normalization is applied.
pub fn filter<'a>(index: &'a DocIndex, query: &str) -> SearchResults<'a> {
    if query.trim().is_empty() {
        return SearchResults {
            index,
            query: query.to_string(),
            filtered: false,
            hits: index.iter().collect(),
        };
    }

    let needle = query.to_lowercase();
    let hits: Vec<&DocEntry> = index
        .iter()
        .filter(|entry| title_matches(&entry.title, &needle))
        .collect();

    tracing::trace!(query, hits = hits.len(), total = index.len(), "filter");

    SearchResults {
        index,
        query: query.to_string(),
        filtered: true,
        hits,
    }
}
