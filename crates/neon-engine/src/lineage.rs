//! Artifact provenance records and lineage hashing.

use neon_core::{content_hash, GenieError};
use serde::Serialize;

use crate::artifact::{Architecture, ArtifactProvenance, Component, IdeaArtifact, Lineage};

/// Origin label stamped on every artifact.
pub const ORIGIN: &str = "neon-genie-v3.7.0";

/// Transformation recorded on an evolved artifact.
pub const EVOLVED_TRANSFORMATION: &str = "Evolved with feedback";

pub fn create_provenance(generator: &str, timestamp: String) -> ArtifactProvenance {
    ArtifactProvenance {
        origin: ORIGIN.to_string(),
        generator: generator.to_string(),
        transformations: Vec::new(),
        timestamp,
    }
}

pub fn track_transformation(
    provenance: &ArtifactProvenance,
    transformation: &str,
    timestamp: String,
) -> ArtifactProvenance {
    let mut transformations = provenance.transformations.clone();
    transformations.push(transformation.to_string());
    ArtifactProvenance {
        transformations,
        timestamp,
        ..provenance.clone()
    }
}

pub fn create_lineage(parent: Option<&str>) -> Lineage {
    Lineage {
        parent: parent.map(str::to_string),
        children: Vec::new(),
        hash: None,
    }
}

#[derive(Serialize)]
struct LineageDigest<'a> {
    id: &'a str,
    title: &'a str,
    concept: &'a str,
    components: &'a [Component],
    architecture: &'a Architecture,
}

/// Stamps the lineage hash computed over the artifact's identifying content.
pub fn finalize_artifact(mut artifact: IdeaArtifact) -> Result<IdeaArtifact, GenieError> {
    let hash = content_hash(&LineageDigest {
        id: &artifact.id,
        title: &artifact.title,
        concept: &artifact.concept,
        components: &artifact.components,
        architecture: &artifact.architecture,
    })?;
    artifact.lineage.hash = Some(hash);
    Ok(artifact)
}
