use serde::Serialize;

use crate::types::identifiers::numeric_sort_key;

/// A node in the pedagogical-dimension taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub id: &'static str,
    pub area: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Frameworks of one area, in numeric id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub area: &'static str,
    pub frameworks: Vec<&'static Framework>,
}

pub static FRAMEWORKS: &[Framework] = &[
    Framework {
        id: "1",
        area: "General reasoning",
        name: "General reasoning",
        description: "Benchmarks measuring general cognitive and reasoning abilities (logic, math, reading comprehension, problem-solving).",
    },
    Framework {
        id: "2.1",
        area: "Pedagogy",
        name: "Pedagogical knowledge",
        description: "Benchmarks measuring knowledge about teaching: instructional strategies, learning theories, curriculum design.",
    },
    Framework {
        id: "2.2",
        area: "Pedagogy",
        name: "Pedagogy of generated outputs",
        description: "Benchmarks evaluating the pedagogical quality of AI-generated explanations, hints, and instructional content.",
    },
    Framework {
        id: "2.3",
        area: "Pedagogy",
        name: "Pedagogical interactions",
        description: "Benchmarks evaluating interactive teaching behaviours: Socratic questioning, scaffolding, adaptive dialogue.",
    },
    Framework {
        id: "3.1",
        area: "Educational content",
        name: "Content knowledge",
        description: "Benchmarks measuring mastery of subject-matter content (STEM, humanities, etc.).",
    },
    Framework {
        id: "3.2",
        area: "Educational content",
        name: "Content alignment",
        description: "Benchmarks measuring alignment of content to curricula, standards, or learning objectives.",
    },
    Framework {
        id: "4.1",
        area: "Assessment",
        name: "Scoring and grading",
        description: "Benchmarks evaluating automated scoring, grading, and rubric application.",
    },
    Framework {
        id: "4.2",
        area: "Assessment",
        name: "Feedback with reasoning",
        description: "Benchmarks evaluating quality of feedback: explanations, reasoning traces, actionable suggestions.",
    },
    Framework {
        id: "5",
        area: "Ethics and bias",
        name: "Ethics and bias",
        description: "Benchmarks measuring fairness, bias, safety, and ethical behaviour in educational contexts.",
    },
    Framework {
        id: "6.1",
        area: "Digitisation / accessibility",
        name: "Multimodal capabilities",
        description: "Benchmarks evaluating vision, audio, diagram understanding, and multimodal reasoning for education.",
    },
    Framework {
        id: "6.2",
        area: "Digitisation / accessibility",
        name: "Multilingual capabilities",
        description: "Benchmarks evaluating performance across languages and cross-lingual educational tasks.",
    },
];

pub fn framework(id: &str) -> Option<&'static Framework> {
    FRAMEWORKS.iter().find(|f| f.id == id)
}

/// Group frameworks by area, areas in order of their lowest id.
pub fn area_groups() -> Vec<AreaGroup> {
    let mut sorted: Vec<&'static Framework> = FRAMEWORKS.iter().collect();
    sorted.sort_by(|a, b| numeric_sort_key(a.id).total_cmp(&numeric_sort_key(b.id)));

    let mut groups: Vec<AreaGroup> = Vec::new();
    for fw in sorted {
        match groups.iter_mut().find(|g| g.area == fw.area) {
            Some(group) => group.frameworks.push(fw),
            None => groups.push(AreaGroup {
                area: fw.area,
                frameworks: vec![fw],
            }),
        }
    }
    groups
}
