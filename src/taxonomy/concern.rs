use serde::Serialize;

/// An ethical or learning-science concern with its own research report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concern {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub static CONCERNS: &[Concern] = &[
    Concern {
        key: "cognitive_offloading",
        name: "Cognitive Offloading & Over-reliance",
        description: "When AI does the thinking for learners, reducing effort, bypassing productive struggle and creating dependency.",
    },
    Concern {
        key: "productive_struggle",
        name: "Productive Struggle & Scaffolding",
        description: "The balance between helpful AI scaffolding and over-scaffolding that removes the desirable difficulty learners need to grow.",
    },
    Concern {
        key: "metacognition",
        name: "Metacognition & Self-regulation",
        description: "Whether AI tools help or hinder learners\u{2019} ability to monitor their own understanding and self-regulate.",
    },
    Concern {
        key: "critical_thinking",
        name: "Critical Thinking & Higher-order Skills",
        description: "Impact of AI on higher-order cognitive skills such as analysis, evaluation, synthesis and creative problem-solving.",
    },
    Concern {
        key: "equity_access",
        name: "Equity & Access",
        description: "Risks of AI widening existing education gaps through the digital divide, language bias, cost barriers and disparate impact.",
    },
];

pub fn concern(key: &str) -> Option<&'static Concern> {
    CONCERNS.iter().find(|c| c.key == key)
}

/// All concerns in table order.
pub fn concerns() -> &'static [Concern] {
    CONCERNS
}

pub fn concern_name(key: &str) -> &str {
    concern(key).map_or(key, |c| c.name)
}
