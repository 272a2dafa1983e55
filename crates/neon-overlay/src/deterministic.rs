//! Deterministic decorator around the generation engine.
//!
//! [`DeterministicGenie`] installs a [`ProvenanceIdentity`] as the engine's
//! identity hook, so every identifier and timestamp the engine records is a
//! function of the request provenance. After each generating call it stamps
//! the artifact with the provenance timestamp and an `overlay_run:<run_id>`
//! audit entry, then writes the stamped copy back to the corpus.

use neon_core::errors::{codes, ErrorInfo, GenieError};
use neon_core::{generate_artifact_id, validate_timestamp, Provenance, SeededRandom};
use neon_engine::{
    AnalysisReport, CorpusStore, ExportFormat, FileCorpus, Genie, GenieConfig, IdeaArtifact,
    IdeaEngine, IdeationPrompt, IdentitySource,
};
use tracing::debug;

/// Prefix of the audit entry appended to every stamped artifact.
pub const OVERLAY_RUN_PREFIX: &str = "overlay_run:";

/// Identity hook whose values are fixed by provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceIdentity {
    artifact_id: String,
    timestamp: String,
}

impl ProvenanceIdentity {
    pub fn new(provenance: &Provenance, derived_seed: &str) -> Self {
        Self {
            artifact_id: generate_artifact_id(
                &provenance.run_id,
                &provenance.timestamp_iso,
                Some(derived_seed),
            ),
            timestamp: provenance.timestamp_iso.clone(),
        }
    }
}

impl IdentitySource for ProvenanceIdentity {
    fn artifact_id(&self) -> String {
        self.artifact_id.clone()
    }

    fn timestamp(&self) -> String {
        self.timestamp.clone()
    }
}

/// Engine wrapper that removes every clock and entropy dependency.
#[derive(Debug)]
pub struct DeterministicGenie<C = FileCorpus> {
    provenance: Provenance,
    derived_seed: String,
    rng: SeededRandom,
    engine: Genie<ProvenanceIdentity, C>,
}

impl DeterministicGenie<FileCorpus> {
    /// Opens the file-backed corpus named by `config`.
    pub fn open(provenance: Option<Provenance>, config: &GenieConfig) -> Result<Self, GenieError> {
        Self::with_corpus(
            provenance,
            FileCorpus::new(config.corpus_path.clone()),
            config.mode.clone(),
        )
    }
}

impl<C: CorpusStore> DeterministicGenie<C> {
    /// Fails with `MissingProvenance` or `InvalidTimestamp`; no instance is
    /// returned in either case.
    pub fn with_corpus(
        provenance: Option<Provenance>,
        corpus: C,
        mode: impl Into<String>,
    ) -> Result<Self, GenieError> {
        let provenance = provenance.ok_or_else(|| {
            GenieError::Provenance(
                ErrorInfo::new(
                    codes::MISSING_PROVENANCE,
                    "deterministic engine requires provenance",
                )
                .with_hint("supply run_id and timestamp_iso"),
            )
        })?;
        validate_timestamp(&provenance.timestamp_iso)?;

        let derived_seed = provenance.derived_seed();
        let identity = ProvenanceIdentity::new(&provenance, &derived_seed);
        debug!(
            run_id = %provenance.run_id,
            artifact_id = %identity.artifact_id,
            "deterministic engine ready"
        );
        Ok(Self {
            rng: SeededRandom::new(derived_seed.clone()),
            engine: Genie::with_parts(identity, corpus, mode),
            derived_seed,
            provenance,
        })
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn derived_seed(&self) -> &str {
        &self.derived_seed
    }

    /// The run's only sequence generator.
    pub fn rng(&mut self) -> &mut SeededRandom {
        &mut self.rng
    }

    pub fn engine(&self) -> &Genie<ProvenanceIdentity, C> {
        &self.engine
    }

    fn audit_entry(&self) -> String {
        format!("{OVERLAY_RUN_PREFIX}{}", self.provenance.run_id)
    }

    fn stamp(&mut self, mut artifact: IdeaArtifact) -> Result<IdeaArtifact, GenieError> {
        artifact.provenance.timestamp = self.provenance.timestamp_iso.clone();
        artifact.metadata.created_at = self.provenance.timestamp_iso.clone();
        artifact
            .provenance
            .transformations
            .push(self.audit_entry());
        self.engine.corpus_mut().store(&artifact)?;
        Ok(artifact)
    }
}

impl<C: CorpusStore> IdeaEngine for DeterministicGenie<C> {
    fn generate(&mut self, prompt: &IdeationPrompt) -> Result<IdeaArtifact, GenieError> {
        let artifact = self.engine.generate(prompt)?;
        self.stamp(artifact)
    }

    fn analyze(&mut self, prompt: &IdeationPrompt) -> Result<AnalysisReport, GenieError> {
        let mut report = self.engine.analyze(prompt)?;
        if let Some(artifact) = self.engine.corpus().retrieve(&report.id)? {
            self.stamp(artifact)?;
        }
        report.id = self.engine.identity().artifact_id();
        Ok(report)
    }

    fn evolve(
        &mut self,
        parent_id: &str,
        feedback: &[String],
    ) -> Result<Option<IdeaArtifact>, GenieError> {
        // The child would take the parent's id and overwrite it in place.
        if self.engine.identity().artifact_id() == parent_id {
            return Err(GenieError::Engine(
                ErrorInfo::new(
                    codes::INVALID_PAYLOAD,
                    format!("cannot evolve {parent_id} under the provenance that created it"),
                )
                .with_context("parentId", parent_id)
                .with_context("run_id", self.provenance.run_id.clone())
                .with_hint("evolve under a new run_id"),
            ));
        }
        match self.engine.evolve(parent_id, feedback)? {
            Some(child) => self.stamp(child).map(Some),
            None => Ok(None),
        }
    }

    fn search(&self, query: &str) -> Result<Vec<IdeaArtifact>, GenieError> {
        self.engine.search(query)
    }

    fn find_similar(&self, id: &str) -> Result<Vec<IdeaArtifact>, GenieError> {
        self.engine.find_similar(id)
    }

    fn export(&self, id: &str, format: ExportFormat) -> Result<Option<String>, GenieError> {
        self.engine.export(id, format)
    }
}
