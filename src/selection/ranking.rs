use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::benchmark::Benchmark;
use crate::selection::fuzzy::{distance_within, max_distance};
use crate::types::identifiers::{CatalogVersion, Slug};
use crate::types::search::{SearchDocument, SearchHits, SearchMatch};

/// Term-frequency saturation.
const BM25_K1: f64 = 1.2;
/// Field-length normalization.
const BM25_B: f64 = 0.7;
/// BM25+ lower bound on the contribution of a matching term.
const BM25_DELTA: f64 = 0.5;

/// Weight of a prefix expansion relative to an exact term.
const PREFIX_WEIGHT: f64 = 0.375;
/// Weight of a fuzzy expansion relative to an exact term.
const FUZZY_WEIGHT: f64 = 0.45;

const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Tags,
    Tldr,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [Field::Name, Field::Description, Field::Tags, Field::Tldr];

    fn index(self) -> usize {
        self as usize
    }

    fn text(self, doc: &SearchDocument) -> &str {
        match self {
            Field::Name => &doc.name,
            Field::Description => &doc.description,
            Field::Tags => &doc.tags_text,
            Field::Tldr => &doc.tldr,
        }
    }
}

/// Relative field weights. Only their ordering is meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBoosts {
    pub name: f64,
    pub tags: f64,
    pub tldr: f64,
    pub description: f64,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            name: 3.0,
            tags: 2.0,
            tldr: 1.5,
            description: 1.0,
        }
    }
}

impl FieldBoosts {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Name => self.name,
            Field::Description => self.description,
            Field::Tags => self.tags,
            Field::Tldr => self.tldr,
        }
    }
}

/// How the per-term result sets of a multi-term query are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// A record must match every term.
    And,
    /// A record must match at least one term.
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub fuzziness: f64,
    pub prefix: bool,
    pub combine: Combine,
    pub boosts: FieldBoosts,
}

impl QueryOptions {
    pub fn primary() -> Self {
        Self {
            fuzziness: 0.2,
            prefix: true,
            combine: Combine::And,
            boosts: FieldBoosts::default(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            fuzziness: 0.4,
            prefix: true,
            combine: Combine::Or,
            boosts: FieldBoosts::default(),
        }
    }
}

/// The two passes run by [`SearchIndex::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub primary: QueryOptions,
    /// Only consulted when the primary pass matches nothing.
    pub fallback: QueryOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            primary: QueryOptions::primary(),
            fallback: QueryOptions::fallback(),
        }
    }
}

/// A replaceable ranked full-text engine.
///
/// Implementations must be deterministic: the same documents and query
/// always yield the same matches, scores and order.
pub trait TextIndex {
    fn build(documents: Vec<SearchDocument>) -> Self
    where
        Self: Sized;

    /// Matches ordered by descending score.
    fn query(&self, text: &str, options: &QueryOptions) -> Vec<SearchMatch>;

    fn document_count(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: usize,
    tf: usize,
}

/// In-memory BM25+ index over the four record fields.
///
/// Query terms expand to indexed terms by exact match, prefix and bounded
/// edit distance; the vocabulary is scanned once per query term.
#[derive(Debug, Clone, Default)]
pub struct Bm25Index {
    slugs: Vec<Slug>,
    postings: BTreeMap<String, [Vec<Posting>; FIELD_COUNT]>,
    field_lengths: Vec<[usize; FIELD_COUNT]>,
    avg_field_lengths: [f64; FIELD_COUNT],
}

/// Lowercased alphanumeric runs.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl TextIndex for Bm25Index {
    fn build(documents: Vec<SearchDocument>) -> Self {
        let mut index = Bm25Index::default();
        let mut totals = [0usize; FIELD_COUNT];

        for (doc, document) in documents.into_iter().enumerate() {
            let mut lengths = [0usize; FIELD_COUNT];

            for field in Field::ALL {
                let tokens = tokenize(field.text(&document));
                lengths[field.index()] = tokens.len();
                totals[field.index()] += tokens.len();

                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for token in tokens {
                    *counts.entry(token).or_insert(0) += 1;
                }
                for (term, tf) in counts {
                    index.postings.entry(term).or_default()[field.index()]
                        .push(Posting { doc, tf });
                }
            }

            index.field_lengths.push(lengths);
            index.slugs.push(document.slug);
        }

        let n = index.slugs.len().max(1) as f64;
        for (avg, total) in index.avg_field_lengths.iter_mut().zip(totals) {
            *avg = total as f64 / n;
        }

        index
    }

    fn query(&self, text: &str, options: &QueryOptions) -> Vec<SearchMatch> {
        let mut combined: Option<BTreeMap<usize, f64>> = None;

        for term in tokenize(text) {
            let term_scores = self.score_term(&term, options);
            combined = Some(match combined {
                None => term_scores,
                Some(acc) => merge(acc, term_scores, options.combine),
            });
        }

        let mut matches: Vec<(usize, f64)> = combined.unwrap_or_default().into_iter().collect();
        // Sort by (score desc, document position asc)
        matches.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });

        matches
            .into_iter()
            .map(|(doc, score)| SearchMatch {
                slug: self.slugs[doc].clone(),
                score,
            })
            .collect()
    }

    fn document_count(&self) -> usize {
        self.slugs.len()
    }
}

impl Bm25Index {
    fn score_term(&self, query_term: &str, options: &QueryOptions) -> BTreeMap<usize, f64> {
        let query_len = query_term.chars().count();
        let max_edits = max_distance(query_len, options.fuzziness);
        let mut scores: BTreeMap<usize, f64> = BTreeMap::new();

        for (term, fields) in &self.postings {
            let Some(weight) = term_weight(query_term, query_len, term, options.prefix, max_edits)
            else {
                continue;
            };

            for field in Field::ALL {
                let boost = options.boosts.get(field);
                let list = &fields[field.index()];
                if boost == 0.0 || list.is_empty() {
                    continue;
                }

                let idf = self.idf(list.len());
                for posting in list {
                    let score = weight * boost * self.bm25(posting, idf, field);
                    *scores.entry(posting.doc).or_insert(0.0) += score;
                }
            }
        }

        scores
    }

    fn idf(&self, doc_freq: usize) -> f64 {
        let n = self.slugs.len() as f64;
        let df = doc_freq as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn bm25(&self, posting: &Posting, idf: f64, field: Field) -> f64 {
        let tf = posting.tf as f64;
        let avg = self.avg_field_lengths[field.index()];
        let len = self.field_lengths[posting.doc][field.index()] as f64;
        let norm = if avg > 0.0 { len / avg } else { 1.0 };

        idf * (BM25_DELTA + tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * norm)))
    }
}

/// How strongly an indexed term counts toward a query term, if at all.
fn term_weight(
    query_term: &str,
    query_len: usize,
    term: &str,
    prefix: bool,
    max_edits: usize,
) -> Option<f64> {
    if term == query_term {
        return Some(1.0);
    }

    let q = query_len as f64;
    let mut best: Option<f64> = None;

    if prefix && term.starts_with(query_term) {
        let extra = (term.chars().count() - query_len) as f64;
        best = Some(PREFIX_WEIGHT * q / (q + 0.3 * extra));
    }

    if max_edits > 0 {
        if let Some(d) = distance_within(query_term, term, max_edits) {
            let fuzzy = FUZZY_WEIGHT * q / (q + d as f64);
            best = Some(best.map_or(fuzzy, |b| b.max(fuzzy)));
        }
    }

    best
}

fn merge(acc: BTreeMap<usize, f64>, next: BTreeMap<usize, f64>, combine: Combine) -> BTreeMap<usize, f64> {
    match combine {
        Combine::And => acc
            .into_iter()
            .filter_map(|(doc, score)| next.get(&doc).map(|s| (doc, score + s)))
            .collect(),
        Combine::Or => {
            let mut acc = acc;
            for (doc, score) in next {
                *acc.entry(doc).or_insert(0.0) += score;
            }
            acc
        }
    }
}

/// Ranked, typo-tolerant lookup over the catalog.
///
/// Starts unbuilt; [`SearchIndex::rebuild`] replaces the engine wholesale.
#[derive(Debug, Clone)]
pub struct SearchIndex<I = Bm25Index> {
    engine: Option<I>,
    options: SearchOptions,
    built_from: Option<CatalogVersion>,
}

impl<I> Default for SearchIndex<I> {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl<I> SearchIndex<I> {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            engine: None,
            options,
            built_from: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn built_from(&self) -> Option<&CatalogVersion> {
        self.built_from.as_ref()
    }
}

impl<I: TextIndex> SearchIndex<I> {
    /// Build a ready index in one step.
    pub fn build(benchmarks: &[Benchmark], version: Option<CatalogVersion>, options: SearchOptions) -> Self {
        let mut index = Self::new(options);
        index.rebuild(benchmarks, version);
        index
    }

    pub fn rebuild(&mut self, benchmarks: &[Benchmark], version: Option<CatalogVersion>) {
        let documents = benchmarks.iter().map(Benchmark::search_document).collect();
        self.engine = Some(I::build(documents));
        self.built_from = version;
    }

    /// `None` when the query is blank or the index is unbuilt (no filter).
    /// `Some` of an empty map when a query was given and nothing matched.
    pub fn search(&self, query: &str) -> Option<SearchHits> {
        let engine = self.engine.as_ref()?;
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let primary = engine.query(query, &self.options.primary);
        if !primary.is_empty() {
            tracing::trace!(query, matches = primary.len(), "primary search pass");
            return Some(primary.into_iter().collect());
        }

        let fallback = engine.query(query, &self.options.fallback);
        tracing::trace!(query, matches = fallback.len(), "primary pass empty, used fallback");
        Some(fallback.into_iter().collect())
    }
}
