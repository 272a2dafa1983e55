//! The generation engine.

use std::path::PathBuf;

use neon_core::errors::{codes, ErrorInfo, GenieError};
use serde::{Deserialize, Serialize};

use crate::artifact::{
    AnalysisReport, ArtifactMetadata, ArtifactProvenance, ExportFormat, IdeaArtifact,
    IdeationPrompt, Lineage,
};
use crate::corpus::{CorpusFilter, CorpusStore, FileCorpus};
use crate::export::render_markdown;
use crate::identity::{IdentitySource, WallClock};
use crate::ideation::{
    define_architecture, generate_components, generate_concept, parse_prompt, ParsedPrompt,
};
use crate::lineage::{
    create_lineage, create_provenance, finalize_artifact, track_transformation,
    EVOLVED_TRANSFORMATION,
};
use crate::quality::QualityScorer;

pub const DEFAULT_CORPUS_PATH: &str = "corpus";
pub const DEFAULT_MODE: &str = "standalone";

/// Generator label recorded on freshly generated artifacts.
pub const GENERATOR: &str = "neon-genie";

const SIMILAR_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenieConfig {
    pub corpus_path: PathBuf,
    pub mode: String,
}

impl Default for GenieConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// Operation surface shared by the engine and its deterministic decorator.
pub trait IdeaEngine {
    fn generate(&mut self, prompt: &IdeationPrompt) -> Result<IdeaArtifact, GenieError>;

    fn analyze(&mut self, prompt: &IdeationPrompt) -> Result<AnalysisReport, GenieError>;

    /// Returns `Ok(None)` when the parent is not in the corpus.
    fn evolve(
        &mut self,
        parent_id: &str,
        feedback: &[String],
    ) -> Result<Option<IdeaArtifact>, GenieError>;

    fn search(&self, query: &str) -> Result<Vec<IdeaArtifact>, GenieError>;

    fn find_similar(&self, id: &str) -> Result<Vec<IdeaArtifact>, GenieError>;

    /// Returns `Ok(None)` when the artifact is not in the corpus.
    fn export(&self, id: &str, format: ExportFormat) -> Result<Option<String>, GenieError>;
}

/// Idea generation engine over a corpus, with a pluggable identity hook.
#[derive(Debug, Clone)]
pub struct Genie<S = WallClock, C = FileCorpus> {
    identity: S,
    corpus: C,
    scorer: QualityScorer,
    mode: String,
}

impl Genie<WallClock, FileCorpus> {
    pub fn open(config: &GenieConfig) -> Self {
        Self::with_parts(
            WallClock,
            FileCorpus::new(config.corpus_path.clone()),
            config.mode.clone(),
        )
    }
}

impl<S: IdentitySource, C: CorpusStore> Genie<S, C> {
    pub fn with_parts(identity: S, corpus: C, mode: impl Into<String>) -> Self {
        Self {
            identity,
            corpus,
            scorer: QualityScorer::default(),
            mode: mode.into(),
        }
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn identity(&self) -> &S {
        &self.identity
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn corpus_mut(&mut self) -> &mut C {
        &mut self.corpus
    }

    fn build_artifact(
        &self,
        parsed: ParsedPrompt,
        provenance: ArtifactProvenance,
        lineage: Lineage,
    ) -> Result<IdeaArtifact, GenieError> {
        let concept = generate_concept(&parsed);
        let components = generate_components(&parsed);
        let architecture = define_architecture(&components, &parsed.constraints);
        let quality = self.scorer.score(&parsed.concept);
        let artifact = IdeaArtifact {
            id: self.identity.artifact_id(),
            title: concept.title,
            domain: parsed.domain,
            concept: parsed.concept,
            problem: concept.problem,
            solution: concept.solution,
            themes: concept.themes,
            components,
            architecture,
            quality,
            provenance,
            lineage,
            metadata: ArtifactMetadata {
                constraints: parsed.constraints,
                tags: parsed.tags,
                mode: self.mode.clone(),
                aesthetic_direction: parsed.aesthetic_direction,
                created_at: self.identity.timestamp(),
            },
        };
        finalize_artifact(artifact)
    }

    fn similarity(a: &IdeaArtifact, b: &IdeaArtifact) -> f64 {
        let shared_tags = a
            .metadata
            .tags
            .iter()
            .filter(|tag| b.metadata.tags.contains(*tag))
            .count();
        let shared_themes = a
            .themes
            .iter()
            .filter(|theme| b.themes.contains(*theme))
            .count();
        (shared_tags + shared_themes) as f64 / 10.0
    }
}

fn require_concept(prompt: &IdeationPrompt) -> Result<(), GenieError> {
    if prompt.concept.trim().is_empty() {
        return Err(GenieError::Engine(
            ErrorInfo::new(codes::INVALID_PAYLOAD, "prompt concept must not be empty")
                .with_context("domain", prompt.domain.as_str()),
        ));
    }
    Ok(())
}

impl<S: IdentitySource, C: CorpusStore> IdeaEngine for Genie<S, C> {
    fn generate(&mut self, prompt: &IdeationPrompt) -> Result<IdeaArtifact, GenieError> {
        require_concept(prompt)?;
        let parsed = parse_prompt(prompt);
        let provenance = create_provenance(GENERATOR, self.identity.timestamp());
        let artifact = self.build_artifact(parsed, provenance, create_lineage(None))?;
        self.corpus.store(&artifact)?;
        Ok(artifact)
    }

    fn analyze(&mut self, prompt: &IdeationPrompt) -> Result<AnalysisReport, GenieError> {
        let artifact = self.generate(prompt)?;
        Ok(AnalysisReport {
            id: artifact.id,
            summary: format!(
                "Analysis for {} in {}.",
                artifact.title, artifact.domain
            ),
            recommendations: artifact.quality.breakdown.refinements.clone(),
            risks: vec!["Ensure constraints are fully validated before deployment.".into()],
            opportunities: vec!["Expand into adjacent domains for scale.".into()],
            score: artifact.quality,
        })
    }

    fn evolve(
        &mut self,
        parent_id: &str,
        feedback: &[String],
    ) -> Result<Option<IdeaArtifact>, GenieError> {
        let Some(mut parent) = self.corpus.retrieve(parent_id)? else {
            return Ok(None);
        };
        let prompt = IdeationPrompt {
            concept: format!("{} refined with {}", parent.concept, feedback.join(", ")),
            domain: parent.domain,
            constraints: Some(parent.metadata.constraints.clone()),
            aesthetic_direction: parent.metadata.aesthetic_direction.clone(),
            tags: Some(parent.metadata.tags.clone()),
            mode: Some(self.mode.clone()),
        };
        let provenance = track_transformation(
            &parent.provenance,
            EVOLVED_TRANSFORMATION,
            self.identity.timestamp(),
        );
        let child = self.build_artifact(
            parse_prompt(&prompt),
            provenance,
            create_lineage(Some(&parent.id)),
        )?;

        if !parent.lineage.children.contains(&child.id) {
            parent.lineage.children.push(child.id.clone());
        }
        self.corpus.store(&parent)?;
        self.corpus.store(&child)?;
        Ok(Some(child))
    }

    fn search(&self, query: &str) -> Result<Vec<IdeaArtifact>, GenieError> {
        let needle = query.to_lowercase();
        let artifacts = self.corpus.list(&CorpusFilter::default())?;
        Ok(artifacts
            .into_iter()
            .filter(|artifact| {
                format!(
                    "{} {} {}",
                    artifact.title, artifact.concept, artifact.solution
                )
                .to_lowercase()
                .contains(&needle)
            })
            .collect())
    }

    fn find_similar(&self, id: &str) -> Result<Vec<IdeaArtifact>, GenieError> {
        let Some(subject) = self.corpus.retrieve(id)? else {
            return Ok(Vec::new());
        };
        let mut candidates: Vec<(f64, IdeaArtifact)> = self
            .corpus
            .list(&CorpusFilter::domain(subject.domain))?
            .into_iter()
            .filter(|artifact| artifact.id != id)
            .map(|artifact| (Self::similarity(&subject, &artifact), artifact))
            .collect();
        candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(candidates
            .into_iter()
            .take(SIMILAR_LIMIT)
            .map(|(_, artifact)| artifact)
            .collect())
    }

    fn export(&self, id: &str, format: ExportFormat) -> Result<Option<String>, GenieError> {
        let Some(artifact) = self.corpus.retrieve(id)? else {
            return Ok(None);
        };
        let rendered = match format {
            ExportFormat::Json => serde_json::to_string_pretty(&artifact).map_err(|err| {
                GenieError::Serde(
                    ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string())
                        .with_context("id", id),
                )
            })?,
            ExportFormat::Markdown => render_markdown(&artifact),
        };
        Ok(Some(rendered))
    }
}
