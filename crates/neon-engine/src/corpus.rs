//! Artifact persistence.
//!
//! [`FileCorpus`] keeps one pretty-printed JSON document per artifact under a
//! root directory. Writes are whole-file replacements, so two processes that
//! store the same deterministic artifact simply agree on the last write.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use neon_core::errors::{codes, ErrorInfo, GenieError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::artifact::{IdeaArtifact, IdeationDomain};

/// Rejects ids that could name a file outside the corpus root.
///
/// Accepted ids are non-empty and use only ASCII letters, digits, `_` and
/// `-`, which covers every id the engine and the overlay generate.
pub fn validate_artifact_id(id: &str) -> Result<&str, GenieError> {
    let well_formed = !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if well_formed {
        Ok(id)
    } else {
        Err(GenieError::Corpus(
            ErrorInfo::new(codes::INVALID_PAYLOAD, format!("Invalid artifact id: {id}"))
                .with_context("id", id)
                .with_hint("artifact ids contain only letters, digits, '_' and '-'"),
        ))
    }
}

/// Totals over the whole corpus.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total: usize,
    pub by_domain: BTreeMap<IdeationDomain, usize>,
    pub by_mode: BTreeMap<String, usize>,
    /// Mean composite quality; `0.0` for an empty corpus.
    pub avg_quality: f64,
}

impl CorpusStats {
    pub fn from_artifacts(artifacts: &[IdeaArtifact]) -> Self {
        let mut stats = CorpusStats {
            total: artifacts.len(),
            ..CorpusStats::default()
        };
        let mut quality_sum = 0.0;
        for artifact in artifacts {
            *stats.by_domain.entry(artifact.domain).or_default() += 1;
            *stats
                .by_mode
                .entry(artifact.metadata.mode.clone())
                .or_default() += 1;
            quality_sum += artifact.quality.composite;
        }
        stats.avg_quality = quality_sum / artifacts.len().max(1) as f64;
        stats
    }
}

/// Shallow merge: each top-level key of `patch` replaces the same key of
/// the artifact.
fn merge_patch(artifact: &IdeaArtifact, patch: &Value) -> Result<IdeaArtifact, GenieError> {
    let invalid = |message: String| {
        GenieError::Corpus(
            ErrorInfo::new(codes::INVALID_PAYLOAD, message).with_context("id", artifact.id.clone()),
        )
    };
    let Value::Object(changes) = patch else {
        return Err(invalid("artifact update must be a JSON object".into()));
    };
    let mut document = serde_json::to_value(artifact).map_err(|err| {
        GenieError::Serde(ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string()))
    })?;
    if let Value::Object(fields) = &mut document {
        for (key, value) in changes {
            fields.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(document)
        .map_err(|err| invalid(format!("artifact update does not decode: {err}")))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusFilter {
    pub domain: Option<IdeationDomain>,
    pub min_quality: Option<f64>,
    pub mode: Option<String>,
}

impl CorpusFilter {
    pub fn domain(domain: IdeationDomain) -> Self {
        Self {
            domain: Some(domain),
            ..Self::default()
        }
    }

    pub fn matches(&self, artifact: &IdeaArtifact) -> bool {
        if self.domain.is_some_and(|domain| artifact.domain != domain) {
            return false;
        }
        if let Some(mode) = &self.mode {
            if &artifact.metadata.mode != mode {
                return false;
            }
        }
        if let Some(min) = self.min_quality {
            if artifact.quality.composite < min {
                return false;
            }
        }
        true
    }
}

/// Storage contract consumed by the engine.
pub trait CorpusStore {
    fn store(&mut self, artifact: &IdeaArtifact) -> Result<(), GenieError>;

    /// Returns `Ok(None)` when no artifact with `id` exists.
    fn retrieve(&self, id: &str) -> Result<Option<IdeaArtifact>, GenieError>;

    /// Returns matching artifacts ordered by id.
    fn list(&self, filter: &CorpusFilter) -> Result<Vec<IdeaArtifact>, GenieError>;

    /// Returns `Ok(false)` when nothing was stored under `id`.
    fn delete(&mut self, id: &str) -> Result<bool, GenieError>;

    /// Merges `patch` into the stored artifact and stores the result.
    /// Returns `Ok(None)` when no artifact with `id` exists.
    fn update(&mut self, id: &str, patch: &Value) -> Result<Option<IdeaArtifact>, GenieError> {
        let Some(existing) = self.retrieve(id)? else {
            return Ok(None);
        };
        let merged = merge_patch(&existing, patch)?;
        self.store(&merged)?;
        Ok(Some(merged))
    }

    fn stats(&self) -> Result<CorpusStats, GenieError> {
        let artifacts = self.list(&CorpusFilter::default())?;
        Ok(CorpusStats::from_artifacts(&artifacts))
    }
}

fn io_error(err: std::io::Error, path: &Path) -> GenieError {
    GenieError::Corpus(
        ErrorInfo::new(codes::CORPUS_IO, err.to_string())
            .with_context("path", path.display().to_string()),
    )
}

fn decode_error(err: serde_json::Error, path: &Path) -> GenieError {
    GenieError::Corpus(
        ErrorInfo::new(codes::CORPUS_DECODE, err.to_string())
            .with_context("path", path.display().to_string()),
    )
}

#[derive(Debug, Clone)]
pub struct FileCorpus {
    root: PathBuf,
}

impl FileCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_path(&self, id: &str) -> Result<PathBuf, GenieError> {
        let id = validate_artifact_id(id)?;
        Ok(self.root.join(format!("{id}.json")))
    }

    fn ensure_root(&self) -> Result<(), GenieError> {
        fs::create_dir_all(&self.root).map_err(|err| io_error(err, &self.root))
    }

    fn read_artifact(path: &Path) -> Result<IdeaArtifact, GenieError> {
        let data = fs::read(path).map_err(|err| io_error(err, path))?;
        serde_json::from_slice(&data).map_err(|err| decode_error(err, path))
    }
}

impl CorpusStore for FileCorpus {
    fn store(&mut self, artifact: &IdeaArtifact) -> Result<(), GenieError> {
        self.ensure_root()?;
        let path = self.artifact_path(&artifact.id)?;
        let body = serde_json::to_vec_pretty(artifact).map_err(|err| {
            GenieError::Serde(
                ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string())
                    .with_context("id", artifact.id.clone()),
            )
        })?;
        fs::write(&path, body).map_err(|err| io_error(err, &path))?;
        debug!(id = %artifact.id, path = %path.display(), "stored artifact");
        Ok(())
    }

    fn retrieve(&self, id: &str) -> Result<Option<IdeaArtifact>, GenieError> {
        let path = self.artifact_path(id)?;
        match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data)
                .map(Some)
                .map_err(|err| decode_error(err, &path)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err, &path)),
        }
    }

    fn list(&self, filter: &CorpusFilter) -> Result<Vec<IdeaArtifact>, GenieError> {
        self.ensure_root()?;
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|err| io_error(err, &self.root))? {
            let entry = entry.map_err(|err| io_error(err, &self.root))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut artifacts = Vec::new();
        for path in paths {
            let artifact = Self::read_artifact(&path)?;
            if filter.matches(&artifact) {
                artifacts.push(artifact);
            }
        }
        artifacts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(artifacts)
    }

    fn delete(&mut self, id: &str) -> Result<bool, GenieError> {
        let path = self.artifact_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(id, path = %path.display(), "deleted artifact");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error(err, &path)),
        }
    }
}

/// In-process corpus keyed by artifact id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    artifacts: BTreeMap<String, IdeaArtifact>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl CorpusStore for MemoryCorpus {
    fn store(&mut self, artifact: &IdeaArtifact) -> Result<(), GenieError> {
        self.artifacts.insert(artifact.id.clone(), artifact.clone());
        Ok(())
    }

    fn retrieve(&self, id: &str) -> Result<Option<IdeaArtifact>, GenieError> {
        Ok(self.artifacts.get(id).cloned())
    }

    fn list(&self, filter: &CorpusFilter) -> Result<Vec<IdeaArtifact>, GenieError> {
        Ok(self
            .artifacts
            .values()
            .filter(|artifact| filter.matches(artifact))
            .cloned()
            .collect())
    }

    fn delete(&mut self, id: &str) -> Result<bool, GenieError> {
        Ok(self.artifacts.remove(id).is_some())
    }
}
