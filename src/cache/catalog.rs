// Written once by whichever load wins the race, read-only afterwards.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::benchmark::Benchmark;
use crate::cache::loader::LoadError;
use crate::selection::filters::filter_benchmarks;
use crate::selection::ranking::{SearchIndex, SearchOptions};
use crate::types::identifiers::CatalogVersion;
use crate::types::search::{FilterCriteria, SearchHits};

/// The loaded benchmark collection plus the search index built over it.
#[derive(Debug)]
pub struct Catalog {
    version: CatalogVersion,
    loaded_at: DateTime<Utc>, // informational only
    benchmarks: Vec<Benchmark>,
    index: SearchIndex,
}

impl Catalog {
    /// Parse a JSON array of records and index it.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let benchmarks: Vec<Benchmark> =
            serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_benchmarks(benchmarks, CatalogVersion::from_content(bytes))
    }

    /// Order by relevance (descending, missing as 0), check slug
    /// uniqueness, then build the index. The index is complete on return.
    pub fn from_benchmarks(
        benchmarks: Vec<Benchmark>,
        version: CatalogVersion,
    ) -> Result<Self, LoadError> {
        let mut sorted = benchmarks;
        sorted.sort_by(|a, b| b.relevance().total_cmp(&a.relevance()));

        let mut seen = BTreeSet::new();
        for b in &sorted {
            if !seen.insert(b.slug.as_str()) {
                return Err(LoadError::DuplicateSlug(b.slug.to_string()));
            }
        }

        let index = SearchIndex::build(&sorted, Some(version.clone()), SearchOptions::default());

        Ok(Self {
            version,
            loaded_at: Utc::now(),
            benchmarks: sorted,
            index,
        })
    }

    pub fn version(&self) -> &CatalogVersion {
        &self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Records in default presentation order.
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn search(&self, query: &str) -> Option<SearchHits> {
        self.index.search(query)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Benchmark> {
        filter_benchmarks(&self.benchmarks, &self.index, criteria)
    }
}
