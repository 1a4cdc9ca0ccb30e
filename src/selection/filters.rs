use std::cmp::Ordering;

use crate::benchmark::Benchmark;
use crate::selection::ranking::{SearchIndex, TextIndex};
use crate::types::search::{FilterCriteria, SearchHits};

/// Resolve the query against `index`, then apply every filter.
pub fn filter_benchmarks<'a, I: TextIndex>(
    benchmarks: &'a [Benchmark],
    index: &SearchIndex<I>,
    criteria: &FilterCriteria,
) -> Vec<&'a Benchmark> {
    let hits = criteria.query.as_deref().and_then(|q| index.search(q));
    apply_filters(benchmarks, hits.as_ref(), criteria)
}

/// Apply the filters with search scores already resolved.
///
/// `hits == None` means no search filter. `Some` of an empty map excludes
/// everything. Matches are ordered by descending search score; otherwise
/// the input order is kept.
pub fn apply_filters<'a>(
    benchmarks: &'a [Benchmark],
    hits: Option<&SearchHits>,
    criteria: &FilterCriteria,
) -> Vec<&'a Benchmark> {
    let mut retained: Vec<&Benchmark> = benchmarks
        .iter()
        .filter(|b| criteria.show_dismissed || !criteria.dismissed.contains(&b.slug))
        .filter(|b| match (criteria.year, b.year) {
            (Some(selected), Some(year)) => year == selected,
            _ => true,
        })
        .filter(|b| hits.map_or(true, |h| h.contains(&b.slug)))
        .filter(|b| b.relevance() >= criteria.min_relevance)
        .collect();

    if let Some(hits) = hits.filter(|h| !h.is_empty()) {
        // Stable: equal scores keep input order
        retained.sort_by(|a, b| {
            let sa = hits.score(&a.slug).unwrap_or(0.0);
            let sb = hits.score(&b.slug).unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        });
    }

    retained
}
