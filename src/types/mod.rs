pub mod identifiers;
pub mod search;

pub use identifiers::{slugify, CatalogVersion, FrameworkId, Slug, ToolTypeKey};
pub use search::{FilterCriteria, SearchDocument, SearchHits, SearchMatch};
