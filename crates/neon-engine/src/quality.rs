//! Heuristic five-dimension quality scoring.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Composite score at or above which an idea passes.
pub const PASS_THRESHOLD: f64 = 0.5;

/// Dimension weights used to build the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub ontological_depth: f64,
    pub novelty: f64,
    pub viability: f64,
    pub zeitgeist_alignment: f64,
    pub generative_potential: f64,
}

/// Weights for standalone mode.
pub const STANDALONE_WEIGHTS: Weights = Weights {
    ontological_depth: 0.3,
    novelty: 0.25,
    viability: 0.25,
    zeitgeist_alignment: 0.15,
    generative_potential: 0.05,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub value: f64,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_scores: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Reject,
    Consider,
    Accept,
    Prioritize,
}

impl QualityTier {
    pub fn from_composite(score: f64) -> Self {
        if score < 0.5 {
            QualityTier::Reject
        } else if score < 0.65 {
            QualityTier::Consider
        } else if score < 0.8 {
            QualityTier::Accept
        } else {
            QualityTier::Prioritize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QualityBreakdown {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub refinements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub ontological_depth: DimensionScore,
    pub novelty: DimensionScore,
    pub viability: DimensionScore,
    pub zeitgeist_alignment: DimensionScore,
    pub generative_potential: DimensionScore,
    pub composite: f64,
    pub threshold: f64,
    pub passed: bool,
    pub tier: QualityTier,
    pub breakdown: QualityBreakdown,
}

impl QualityScore {
    /// Dimensions in their canonical reporting order.
    pub fn dimensions(&self) -> [(&'static str, &DimensionScore); 5] {
        [
            ("ontological_depth", &self.ontological_depth),
            ("novelty", &self.novelty),
            ("viability", &self.viability),
            ("zeitgeist_alignment", &self.zeitgeist_alignment),
            ("generative_potential", &self.generative_potential),
        ]
    }
}

fn clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn sub_scores(entries: &[(&str, f64)]) -> Option<BTreeMap<String, f64>> {
    Some(
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
    )
}

fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count()
}

/// Splits on runs of non-word characters.
pub(crate) fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .filter(|token| !token.is_empty())
}

/// Scores prompt text; every value depends only on the text.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    weights: Weights,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self {
            weights: STANDALONE_WEIGHTS,
        }
    }
}

impl QualityScorer {
    pub fn with_weights(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn score(&self, prompt_text: &str) -> QualityScore {
        let ontological_depth = self.score_ontological_depth(prompt_text);
        let novelty = self.score_novelty(prompt_text);
        let viability = self.score_viability(prompt_text);
        let zeitgeist_alignment = self.score_zeitgeist(prompt_text);
        let generative_potential = self.score_generative_potential(prompt_text);

        let composite = clamp(
            ontological_depth.value * self.weights.ontological_depth
                + novelty.value * self.weights.novelty
                + viability.value * self.weights.viability
                + zeitgeist_alignment.value * self.weights.zeitgeist_alignment
                + generative_potential.value * self.weights.generative_potential,
        );

        let mut score = QualityScore {
            ontological_depth,
            novelty,
            viability,
            zeitgeist_alignment,
            generative_potential,
            composite,
            threshold: PASS_THRESHOLD,
            passed: composite >= PASS_THRESHOLD,
            tier: QualityTier::from_composite(composite),
            breakdown: QualityBreakdown::default(),
        };
        score.breakdown = breakdown(&score);
        score
    }

    pub fn score_ontological_depth(&self, prompt_text: &str) -> DimensionScore {
        let length = prompt_text.split(' ').count() as f64;
        let value = clamp(length / 40.0);
        DimensionScore {
            value,
            rationale: "Depth rises as the concept includes layered intent and systemic scope."
                .into(),
            sub_scores: sub_scores(&[
                ("surface", clamp(0.25 - value / 4.0)),
                ("functional", clamp(value * 0.35)),
                ("psychological", clamp(value * 0.45)),
                ("philosophical", clamp(value * 0.7)),
                ("ontological", clamp(value * 0.9)),
            ]),
        }
    }

    pub fn score_novelty(&self, prompt_text: &str) -> DimensionScore {
        let lowered = prompt_text.to_lowercase();
        let unique = word_tokens(&lowered).collect::<BTreeSet<_>>().len() as f64;
        let value = clamp(unique / 30.0);
        DimensionScore {
            value,
            rationale: "Novelty increases with diverse language and distinctive framing.".into(),
            sub_scores: sub_scores(&[
                ("derivative", clamp(0.3 - value / 2.0)),
                ("recombinant", clamp(value * 0.6)),
                ("novel", clamp(value * 0.8)),
                ("paradigmatic", clamp(value)),
            ]),
        }
    }

    pub fn score_viability(&self, prompt_text: &str) -> DimensionScore {
        let hits = keyword_hits(
            prompt_text,
            &["market", "resource", "regulatory", "technical", "team"],
        ) as f64;
        let technical = clamp(0.4 + hits * 0.05);
        let resource = clamp(0.35 + hits * 0.04);
        let market = clamp(0.3 + hits * 0.06);
        let regulatory = clamp(0.25 + hits * 0.05);
        let value = clamp(technical * 0.3 + resource * 0.2 + market * 0.3 + regulatory * 0.2);
        DimensionScore {
            value,
            rationale:
                "Viability balances technical feasibility, resources, market fit, and compliance."
                    .into(),
            sub_scores: sub_scores(&[
                ("technical", technical),
                ("resource", resource),
                ("market", market),
                ("regulatory", regulatory),
            ]),
        }
    }

    pub fn score_zeitgeist(&self, prompt_text: &str) -> DimensionScore {
        let hits = keyword_hits(
            prompt_text,
            &["future", "trend", "cultural", "climate", "ai", "sustainability"],
        ) as f64;
        let trend = clamp(0.4 + hits * 0.05);
        let contrarian = clamp(0.35 + hits * 0.04);
        let future = clamp(0.3 + hits * 0.06);
        let timeless = clamp(0.4 + hits * 0.03);
        let value = clamp(trend * 0.2 + contrarian * 0.3 + future * 0.3 + timeless * 0.2);
        DimensionScore {
            value,
            rationale: "Zeitgeist alignment reflects cultural pulse and long-term resonance."
                .into(),
            sub_scores: sub_scores(&[
                ("trend", trend),
                ("contrarian", contrarian),
                ("future", future),
                ("timeless", timeless),
            ]),
        }
    }

    pub fn score_generative_potential(&self, prompt_text: &str) -> DimensionScore {
        let base = clamp(prompt_text.chars().count() as f64 / 200.0);
        DimensionScore {
            value: base,
            rationale: "Generative potential improves when the concept extends to ecosystems."
                .into(),
            sub_scores: sub_scores(&[
                ("extensibility", clamp(base * 0.9)),
                ("platform", clamp(base * 0.8)),
                ("network", clamp(base * 0.7)),
                ("evolution", clamp(base)),
            ]),
        }
    }
}

fn breakdown(score: &QualityScore) -> QualityBreakdown {
    let mut result = QualityBreakdown::default();
    for (name, dimension) in score.dimensions() {
        if dimension.value >= 0.7 {
            result.strengths.push(format!("{name} is strong."));
        } else if dimension.value <= 0.45 {
            result.weaknesses.push(format!("{name} needs reinforcement."));
            result.refinements.push(format!(
                "Expand {} through clearer detail.",
                name.replacen('_', " ", 1)
            ));
        }
    }
    if result.strengths.is_empty() {
        result
            .strengths
            .push("Balanced foundation with room for amplification.".into());
    }
    if result.weaknesses.is_empty() {
        result
            .refinements
            .push("Introduce bold differentiators to push the score higher.".into());
    }
    result
}
