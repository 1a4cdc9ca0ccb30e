use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::identifiers::Slug;

/// A per-record document fed to the text index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    pub slug: Slug,
    pub name: String,
    pub description: String,
    /// Tags joined with single spaces.
    pub tags_text: String,
    /// Empty when the record has no summary.
    pub tldr: String,
}

/// One ranked match returned by a text index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub slug: Slug,
    pub score: f64,
}

/// Slug → relevance score for a non-empty query.
///
/// An empty `SearchHits` means a query was entered and nothing matched.
/// Absence of a filter is expressed as `Option::None`, never as an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchHits {
    scores: BTreeMap<Slug, f64>,
}

impl SearchHits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slug: Slug, score: f64) {
        self.scores.insert(slug, score);
    }

    pub fn score(&self, slug: &Slug) -> Option<f64> {
        self.scores.get(slug).copied()
    }

    pub fn contains(&self, slug: &Slug) -> bool {
        self.scores.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slug, f64)> {
        self.scores.iter().map(|(slug, score)| (slug, *score))
    }
}

impl FromIterator<SearchMatch> for SearchHits {
    fn from_iter<I: IntoIterator<Item = SearchMatch>>(iter: I) -> Self {
        let mut hits = SearchHits::new();
        for m in iter {
            hits.insert(m.slug, m.score);
        }
        hits
    }
}

/// All list-level filters, each independently toggleable.
///
/// The default applies no filtering at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact publication year. Records without a year always pass.
    pub year: Option<i32>,
    /// Free-text query. Blank strings mean "no search filter".
    pub query: Option<String>,
    pub dismissed: BTreeSet<Slug>,
    pub show_dismissed: bool,
    /// Records whose relevance (missing counts as 0) is below this are dropped.
    pub min_relevance: f64,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_dismissed(mut self, dismissed: BTreeSet<Slug>, show_dismissed: bool) -> Self {
        self.dismissed = dismissed;
        self.show_dismissed = show_dismissed;
        self
    }

    pub fn with_min_relevance(mut self, min_relevance: f64) -> Self {
        self.min_relevance = min_relevance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_collect_from_matches() {
        let hits: SearchHits = vec![
            SearchMatch { slug: Slug::from("b"), score: 1.5 },
            SearchMatch { slug: Slug::from("a"), score: 3.0 },
        ]
        .into_iter()
        .collect();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits.score(&Slug::from("a")), Some(3.0));
        assert!(!hits.contains(&Slug::from("c")));
    }

    #[test]
    fn default_criteria_filter_nothing() {
        let criteria = FilterCriteria::default();
        assert!(criteria.year.is_none());
        assert!(criteria.query.is_none());
        assert!(criteria.dismissed.is_empty());
        assert!(!criteria.show_dismissed);
        assert_eq!(criteria.min_relevance, 0.0);
    }
}
