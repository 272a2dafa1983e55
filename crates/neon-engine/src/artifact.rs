use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quality::QualityScore;

/// Area an idea belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeationDomain {
    Software,
    Brands,
    Products,
    Content,
    Business,
    Systems,
    Creative,
    Research,
    Events,
    Education,
}

impl IdeationDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdeationDomain::Software => "software",
            IdeationDomain::Brands => "brands",
            IdeationDomain::Products => "products",
            IdeationDomain::Content => "content",
            IdeationDomain::Business => "business",
            IdeationDomain::Systems => "systems",
            IdeationDomain::Creative => "creative",
            IdeationDomain::Research => "research",
            IdeationDomain::Events => "events",
            IdeationDomain::Education => "education",
        }
    }
}

impl fmt::Display for IdeationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input accepted by `generate` and `analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeationPrompt {
    pub concept: String,
    pub domain: IdeationDomain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aesthetic_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl IdeationPrompt {
    pub fn new(concept: impl Into<String>, domain: IdeationDomain) -> Self {
        Self {
            concept: concept.into(),
            domain,
            constraints: None,
            aesthetic_direction: None,
            tags: None,
            mode: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub function: String,
    pub owner: String,
    pub integration: String,
    pub tech: Vec<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub storage: String,
    pub computation: String,
    pub interface: String,
    pub ecosystem_mapping: Vec<String>,
}

/// Audit record carried by every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactProvenance {
    pub origin: String,
    pub generator: String,
    pub transformations: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lineage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub constraints: Vec<String>,
    pub tags: Vec<String>,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aesthetic_direction: Option<String>,
    pub created_at: String,
}

/// Idea record produced by the engine and persisted in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaArtifact {
    pub id: String,
    pub title: String,
    pub domain: IdeationDomain,
    pub concept: String,
    pub problem: String,
    pub solution: String,
    pub themes: Vec<String>,
    pub components: Vec<Component>,
    pub architecture: Architecture,
    pub quality: QualityScore,
    pub provenance: ArtifactProvenance,
    pub lineage: Lineage,
    pub metadata: ArtifactMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub score: QualityScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Markdown,
}
