use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// URL-safe unique key of a benchmark record.
///
/// Joins search results, dismissal state and display routes, so it must
/// stay stable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Self {
        Slug(value.into())
    }

    /// Derive a slug from a display name.
    pub fn from_name(name: &str) -> Self {
        Slug(slugify(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Slug(value.to_string())
    }
}

/// Lowercase, collapse every run of non `[a-z0-9]` into `-`, trim dashes.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Dotted-decimal framework category id, e.g. `"2.3"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkId(String);

impl FrameworkId {
    pub fn new(value: impl Into<String>) -> Self {
        FrameworkId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric ordering key. Unparseable ids sort last.
    pub fn sort_key(&self) -> f64 {
        numeric_sort_key(&self.0)
    }
}

impl From<&str> for FrameworkId {
    fn from(value: &str) -> Self {
        FrameworkId(value.to_string())
    }
}

pub(crate) fn numeric_sort_key(id: &str) -> f64 {
    id.parse::<f64>().unwrap_or(f64::INFINITY)
}

/// Short key of a tool type, e.g. `"ai_tutor"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolTypeKey(String);

impl ToolTypeKey {
    pub fn new(value: impl Into<String>) -> Self {
        ToolTypeKey(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToolTypeKey {
    fn from(value: &str) -> Self {
        ToolTypeKey(value.to_string())
    }
}

/// Content hash of the raw dataset a catalog was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(String);

impl CatalogVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        CatalogVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("MMLU"), "mmlu");
        assert_eq!(slugify("BIG-Bench Hard BBH"), "big-bench-hard-bbh");
        assert_eq!(slugify("  ASAP-SAS (Short Answer) "), "asap-sas-short-answer");
        assert_eq!(slugify("BEA 2019 GEC"), "bea-2019-gec");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Éval"), "caf-val");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn framework_ids_sort_numerically() {
        let mut ids: Vec<FrameworkId> = ["6.2", "1", "2.3", "10", "2.1"]
            .into_iter()
            .map(FrameworkId::from)
            .collect();
        ids.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

        let sorted: Vec<&str> = ids.iter().map(FrameworkId::as_str).collect();
        assert_eq!(sorted, vec!["1", "2.1", "2.3", "6.2", "10"]);
    }

    #[test]
    fn same_content_same_version() {
        let a = CatalogVersion::from_content(b"[]");
        let b = CatalogVersion::from_content(b"[]");
        let c = CatalogVersion::from_content(b"[ ]");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("sha256:"));
    }
}
