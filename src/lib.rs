//! Curated catalog of AI-education benchmarks.
//!
//! `edubench-catalog` loads a static JSON collection of benchmark records
//! once, indexes it for ranked fuzzy/prefix search over four weighted
//! fields, and composes search with year, dismissal and relevance filters.
//! Static taxonomy tables (framework categories, tool types, concerns),
//! research report fetching and persisted reviewer preferences sit around
//! that core.
//!
//! For a fixed collection and query, search results and filter output are
//! identical run to run.

pub mod benchmark;
pub mod cache;
pub mod config;
pub mod preferences;
pub mod reports;
pub mod selection;
pub mod service;
pub mod taxonomy;
pub mod types;

pub use benchmark::{Benchmark, SourceType};
pub use cache::{Catalog, DatasetLoader, DirFetcher, Fetch, FetchError, FetchFn, FetchResponse, LoadError};
pub use config::{CatalogConfig, ConfigError};
pub use reports::{Report, ReportError, ResearchReports};
pub use selection::{filter_benchmarks, SearchIndex};
pub use service::{CatalogOverview, CatalogService};
pub use types::{FilterCriteria, SearchHits, Slug};
