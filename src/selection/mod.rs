pub mod filters;
pub mod fuzzy;
pub mod ranking;

pub use filters::{apply_filters, filter_benchmarks};
pub use ranking::{
    tokenize, Bm25Index, Combine, Field, FieldBoosts, QueryOptions, SearchIndex, SearchOptions,
    TextIndex,
};
