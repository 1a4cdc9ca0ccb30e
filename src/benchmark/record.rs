use serde::{Deserialize, Serialize};

use crate::types::identifiers::{FrameworkId, Slug, ToolTypeKey};
use crate::types::search::SearchDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Dataset,
    Paper,
}

/// One catalog entry describing an evaluation dataset or paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub name: String,
    pub slug: Slug,
    pub source_url: String,
    pub source_type: SourceType,
    pub description: String,
    #[serde(default)]
    pub framework_ids: Vec<FrameworkId>,
    #[serde(default)]
    pub tool_types: Vec<ToolTypeKey>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Short AI-generated summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// K-12 suitability rating, 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl Benchmark {
    /// Relevance with a missing score counted as 0.
    pub fn relevance(&self) -> f64 {
        self.relevance_score.unwrap_or(0.0)
    }

    pub fn has_framework(&self, id: &str) -> bool {
        self.framework_ids.iter().any(|f| f.as_str() == id)
    }

    pub fn has_tool_type(&self, key: &str) -> bool {
        self.tool_types.iter().any(|t| t.as_str() == key)
    }

    /// Project the record onto the four indexed text fields.
    pub fn search_document(&self) -> SearchDocument {
        SearchDocument {
            slug: self.slug.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tags_text: self.tags.join(" "),
            tldr: self.tldr.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "name": "GSM8K",
        "slug": "gsm8k",
        "sourceUrl": "https://huggingface.co/datasets/openai/gsm8k",
        "sourceType": "dataset",
        "description": "Grade-school math word problems.",
        "frameworkIds": ["3.1", "1"],
        "toolTypes": ["ai_tutor", "pal"],
        "tags": ["math", "grade-school"],
        "year": 2021,
        "relevanceScore": 7
    }"#;

    #[test]
    fn deserializes_camel_case_record() {
        let b: Benchmark = serde_json::from_str(RECORD).unwrap();

        assert_eq!(b.slug.as_str(), "gsm8k");
        assert_eq!(b.source_type, SourceType::Dataset);
        assert_eq!(b.year, Some(2021));
        assert_eq!(b.relevance(), 7.0);
        assert!(b.tldr.is_none());
        assert!(b.has_framework("3.1"));
        assert!(!b.has_framework("3"));
        assert!(b.has_tool_type("pal"));
    }

    #[test]
    fn missing_relevance_counts_as_zero() {
        let mut b: Benchmark = serde_json::from_str(RECORD).unwrap();
        b.relevance_score = None;
        assert_eq!(b.relevance(), 0.0);
    }

    #[test]
    fn search_document_flattens_tags_and_tldr() {
        let b: Benchmark = serde_json::from_str(RECORD).unwrap();
        let doc = b.search_document();

        assert_eq!(doc.tags_text, "math grade-school");
        assert_eq!(doc.tldr, "");
        assert_eq!(doc.slug, b.slug);
    }

    #[test]
    fn optional_fields_are_omitted_when_serialized() {
        let mut b: Benchmark = serde_json::from_str(RECORD).unwrap();
        b.year = None;
        b.relevance_score = None;

        let json = serde_json::to_string(&b).unwrap();
        assert!(!json.contains("\"year\""));
        assert!(!json.contains("\"relevanceScore\""));
        assert!(json.contains("\"sourceUrl\""));
    }
}
