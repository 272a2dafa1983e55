//! Idea generation engine and corpus store for Neon Genie.
//!
//! The engine derives every field of an artifact from the prompt text,
//! except identifiers and timestamps, which come from an [`IdentitySource`].

mod artifact;
mod corpus;
mod export;
mod genie;
mod identity;
pub mod ideation;
mod lineage;
pub mod quality;

pub use artifact::{
    AnalysisReport, Architecture, ArtifactMetadata, ArtifactProvenance, Component, ExportFormat,
    IdeaArtifact, IdeationDomain, IdeationPrompt, Lineage,
};
pub use corpus::{
    validate_artifact_id, CorpusFilter, CorpusStats, CorpusStore, FileCorpus, MemoryCorpus,
};
pub use export::render_markdown;
pub use genie::{
    Genie, GenieConfig, IdeaEngine, DEFAULT_CORPUS_PATH, DEFAULT_MODE, GENERATOR,
};
pub use identity::{IdentitySource, WallClock};
pub use lineage::{finalize_artifact, EVOLVED_TRANSFORMATION, ORIGIN};
pub use quality::{QualityScore, QualityScorer, QualityTier};
