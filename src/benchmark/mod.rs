pub mod lookup;
pub mod record;

pub use crate::types::identifiers::{slugify, FrameworkId, Slug, ToolTypeKey};
pub use record::{Benchmark, SourceType};
