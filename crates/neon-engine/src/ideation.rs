//! Concept synthesis from a parsed prompt. Everything here is a pure
//! function of the prompt text.

use crate::artifact::{Architecture, Component, IdeationDomain, IdeationPrompt};
use crate::quality::word_tokens;

const MAX_THEMES: usize = 5;
const TITLE_WORDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrompt {
    pub concept: String,
    pub domain: IdeationDomain,
    pub constraints: Vec<String>,
    pub aesthetic_direction: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub title: String,
    pub problem: String,
    pub solution: String,
    pub themes: Vec<String>,
}

pub fn parse_prompt(prompt: &IdeationPrompt) -> ParsedPrompt {
    ParsedPrompt {
        concept: prompt.concept.trim().to_string(),
        domain: prompt.domain,
        constraints: prompt.constraints.clone().unwrap_or_default(),
        aesthetic_direction: prompt.aesthetic_direction.clone(),
        tags: prompt.tags.clone().unwrap_or_default(),
    }
}

/// First distinct lowercase word tokens, in order of appearance.
pub fn extract_themes(concept: &str) -> Vec<String> {
    let lowered = concept.to_lowercase();
    let mut themes: Vec<String> = Vec::new();
    for token in word_tokens(&lowered) {
        if themes.len() == MAX_THEMES {
            break;
        }
        if !themes.iter().any(|theme| theme == token) {
            themes.push(token.to_string());
        }
    }
    themes
}

pub fn generate_title(concept: &str) -> String {
    concept
        .split(' ')
        .filter(|word| !word.is_empty())
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn identify_problem(concept: &str) -> String {
    format!(
        "The current landscape lacks a focused solution for {}.",
        concept.to_lowercase()
    )
}

pub fn propose_solution(concept: &str) -> String {
    format!(
        "Introduce a system that orchestrates {} with clear outcomes.",
        concept.to_lowercase()
    )
}

pub fn generate_concept(parsed: &ParsedPrompt) -> Concept {
    Concept {
        title: generate_title(&parsed.concept),
        problem: identify_problem(&parsed.concept),
        solution: propose_solution(&parsed.concept),
        themes: extract_themes(&parsed.concept),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn generate_components(parsed: &ParsedPrompt) -> Vec<Component> {
    let base_tech = match parsed.domain {
        IdeationDomain::Software => strings(&["Rust", "Tokio"]),
        _ => strings(&["Strategy"]),
    };
    let experience_tech = match parsed.domain {
        IdeationDomain::Brands => strings(&["Design Systems", "Figma"]),
        _ => strings(&["Markdown"]),
    };
    vec![
        Component {
            name: "Core Engine".into(),
            function: "Coordinates the ideation flow and orchestrates outputs.".into(),
            owner: "Core Team".into(),
            integration: "Integrates with domain-specific handlers.".into(),
            tech: base_tech,
            features: strings(&["Prompt parsing", "Concept synthesis", "Quality scoring"]),
        },
        Component {
            name: "Experience Layer".into(),
            function: "Delivers the result to stakeholders with clarity.".into(),
            owner: "Experience Team".into(),
            integration: "Connects to export and distribution channels.".into(),
            tech: experience_tech,
            features: strings(&["Narrative framing", "Visualization", "Export readiness"]),
        },
    ]
}

pub fn define_architecture(components: &[Component], constraints: &[String]) -> Architecture {
    let realtime = constraints
        .iter()
        .any(|item| item.to_lowercase().contains("realtime"));
    Architecture {
        storage: if realtime {
            "Event-sourced data store"
        } else {
            "Document-oriented store"
        }
        .into(),
        computation: "Modular services with deterministic pipelines".into(),
        interface: if realtime {
            "Streaming dashboard"
        } else {
            "Insight portal"
        }
        .into(),
        ecosystem_mapping: components
            .iter()
            .map(|component| component.name.clone())
            .collect(),
    }
}
