use crate::artifact::IdeaArtifact;

/// Renders an artifact as a Markdown brief.
pub fn render_markdown(artifact: &IdeaArtifact) -> String {
    let mut lines = vec![
        format!("# {}", artifact.title),
        format!("**Domain:** {}", artifact.domain),
        format!("**Concept:** {}", artifact.concept),
        "## Problem".to_string(),
        artifact.problem.clone(),
        "## Solution".to_string(),
        artifact.solution.clone(),
        "## Components".to_string(),
    ];
    lines.extend(
        artifact
            .components
            .iter()
            .map(|component| format!("- {}: {}", component.name, component.function)),
    );
    lines.extend([
        "## Architecture".to_string(),
        format!("- Storage: {}", artifact.architecture.storage),
        format!("- Computation: {}", artifact.architecture.computation),
        format!("- Interface: {}", artifact.architecture.interface),
        "## Quality".to_string(),
        format!("Composite Score: {:.2}", artifact.quality.composite),
    ]);
    lines.join("\n")
}
