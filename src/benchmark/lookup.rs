//! Pure projections over an explicit collection.
//!
//! Every helper takes the slice it works on, so they apply equally to the
//! full catalog and to an already-filtered list.

use std::collections::BTreeSet;

use crate::benchmark::record::Benchmark;
use crate::taxonomy::{self, Framework, ToolType};

pub fn by_framework<'a>(benchmarks: &'a [Benchmark], framework_id: &str) -> Vec<&'a Benchmark> {
    benchmarks
        .iter()
        .filter(|b| b.has_framework(framework_id))
        .collect()
}

pub fn by_tool_type<'a>(benchmarks: &'a [Benchmark], tool_type: &str) -> Vec<&'a Benchmark> {
    benchmarks
        .iter()
        .filter(|b| b.has_tool_type(tool_type))
        .collect()
}

/// First record with this slug.
pub fn by_slug<'a>(benchmarks: &'a [Benchmark], slug: &str) -> Option<&'a Benchmark> {
    benchmarks.iter().find(|b| b.slug.as_str() == slug)
}

pub fn count_by_framework(benchmarks: &[Benchmark], framework_id: &str) -> usize {
    benchmarks
        .iter()
        .filter(|b| b.has_framework(framework_id))
        .count()
}

/// Framework entries a record links to. Unknown ids are skipped.
pub fn frameworks_of(benchmark: &Benchmark) -> Vec<&'static Framework> {
    benchmark
        .framework_ids
        .iter()
        .filter_map(|id| taxonomy::framework(id.as_str()))
        .collect()
}

/// Tool type entries a record links to. Unknown keys are skipped.
pub fn tool_types_of(benchmark: &Benchmark) -> Vec<&'static ToolType> {
    benchmark
        .tool_types
        .iter()
        .filter_map(|key| taxonomy::tool_type(key.as_str()))
        .collect()
}

/// Distinct publication years, newest first.
pub fn available_years(benchmarks: &[Benchmark]) -> Vec<i32> {
    let years: BTreeSet<i32> = benchmarks.iter().filter_map(|b| b.year).collect();
    years.into_iter().rev().collect()
}

/// Hide records published before `cutoff` when `hide_old` is set.
///
/// Undated records are never hidden.
pub fn apply_year_cutoff<'a>(
    benchmarks: &'a [Benchmark],
    hide_old: bool,
    cutoff: i32,
) -> Vec<&'a Benchmark> {
    benchmarks
        .iter()
        .filter(|b| !hide_old || b.year.map_or(true, |year| year >= cutoff))
        .collect()
}
