pub mod catalog;
pub mod fetch;
pub mod loader;
pub mod manifest;

pub use catalog::Catalog;
pub use fetch::{DirFetcher, Fetch, FetchError, FetchFn, FetchResponse};
pub use loader::{DatasetLoader, LoadError};
pub use manifest::ResearchManifests;
