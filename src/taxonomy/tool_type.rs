use serde::Serialize;

use super::framework::{framework, Framework};

/// A category of AI-education product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolType {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Framework ids this kind of tool depends on most.
    pub key_needs: &'static [&'static str],
}

pub static TOOL_TYPES: &[ToolType] = &[
    ToolType {
        key: "ai_tutor",
        name: "AI Tutors",
        description: "1-to-1 conversational tutoring systems.",
        key_needs: &["2.3", "2.2", "4.2", "3.1", "1"],
    },
    ToolType {
        key: "pal",
        name: "Personalised Adaptive Learning",
        description: "Systems that adapt content and difficulty to individual learners.",
        key_needs: &["3.2", "2.1", "4.1", "4.2", "6.1", "6.2"],
    },
    ToolType {
        key: "teacher_support",
        name: "Teacher Support Tools",
        description: "Tools that assist teachers with lesson planning, content generation, grading and analytics.",
        key_needs: &["2.1", "3.1", "3.2", "4.1", "4.2", "5"],
    },
];

pub fn tool_type(key: &str) -> Option<&'static ToolType> {
    TOOL_TYPES.iter().find(|t| t.key == key)
}

/// Display name, or the key itself when unknown.
pub fn tool_type_name(key: &str) -> &str {
    tool_type(key).map_or(key, |t| t.name)
}

/// Key needs resolved to framework entries; dangling ids are dropped.
pub fn key_need_frameworks(tool_type: &ToolType) -> Vec<&'static Framework> {
    tool_type
        .key_needs
        .iter()
        .filter_map(|id| framework(id))
        .collect()
}
