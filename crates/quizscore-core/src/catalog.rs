//! The fixed trait catalog: traits, their weights, composites, and
//! learning-style clusters.
//!
//! Weights only matter inside a composite group. They are never normalized
//! across the whole catalog.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Number of traits in the catalog.
pub const TRAIT_COUNT: usize = 14;

/// A personality or aptitude dimension measured by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trait {
    // Core learning traits
    Openness,
    GrowthMindset,
    LearningCommitment,
    SelfEfficacy,

    // Core technical traits
    ProblemSolving,
    AttentionToDetail,
    Persistence,

    // Core teamwork traits
    Agreeableness,
    TeamOrientation,
    FeedbackOrientation,

    // Supporting traits
    CognitiveFlexibility,
    AnalyticalThinking,
    TechnicalCuriosity,
    ConflictResolution,
}

impl Trait {
    /// Every trait, in catalog declaration order.
    pub const ALL: [Trait; TRAIT_COUNT] = [
        Trait::Openness,
        Trait::GrowthMindset,
        Trait::LearningCommitment,
        Trait::SelfEfficacy,
        Trait::ProblemSolving,
        Trait::AttentionToDetail,
        Trait::Persistence,
        Trait::Agreeableness,
        Trait::TeamOrientation,
        Trait::FeedbackOrientation,
        Trait::CognitiveFlexibility,
        Trait::AnalyticalThinking,
        Trait::TechnicalCuriosity,
        Trait::ConflictResolution,
    ];

    /// Wire name of the trait.
    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Openness => "openness",
            Trait::GrowthMindset => "growthMindset",
            Trait::LearningCommitment => "learningCommitment",
            Trait::SelfEfficacy => "selfEfficacy",
            Trait::ProblemSolving => "problemSolving",
            Trait::AttentionToDetail => "attentionToDetail",
            Trait::Persistence => "persistence",
            Trait::Agreeableness => "agreeableness",
            Trait::TeamOrientation => "teamOrientation",
            Trait::FeedbackOrientation => "feedbackOrientation",
            Trait::CognitiveFlexibility => "cognitiveFlexibility",
            Trait::AnalyticalThinking => "analyticalThinking",
            Trait::TechnicalCuriosity => "technicalCuriosity",
            Trait::ConflictResolution => "conflictResolution",
        }
    }

    /// Position of the trait in catalog order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weight the trait carries inside its composite when nothing overrides it.
    pub fn default_weight(self) -> f64 {
        match self {
            Trait::Openness | Trait::GrowthMindset => 0.3,
            Trait::LearningCommitment | Trait::SelfEfficacy => 0.2,
            Trait::ProblemSolving => 0.4,
            Trait::AttentionToDetail | Trait::Persistence => 0.3,
            Trait::Agreeableness => 0.3,
            Trait::TeamOrientation => 0.4,
            Trait::FeedbackOrientation => 0.3,
            Trait::CognitiveFlexibility
            | Trait::AnalyticalThinking
            | Trait::TechnicalCuriosity
            | Trait::ConflictResolution => 0.25,
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trait {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trait::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownTrait(s.to_string()))
    }
}

/// A weighted combination of several traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Composite {
    LearningPotential,
    TechnicalAptitude,
    TeamworkAbility,
}

impl Composite {
    pub const ALL: [Composite; 3] = [
        Composite::LearningPotential,
        Composite::TechnicalAptitude,
        Composite::TeamworkAbility,
    ];

    /// The traits averaged into this composite.
    pub fn members(self) -> &'static [Trait] {
        match self {
            Composite::LearningPotential => &[
                Trait::Openness,
                Trait::GrowthMindset,
                Trait::LearningCommitment,
                Trait::SelfEfficacy,
            ],
            Composite::TechnicalAptitude => &[
                Trait::ProblemSolving,
                Trait::AttentionToDetail,
                Trait::Persistence,
            ],
            Composite::TeamworkAbility => &[
                Trait::Agreeableness,
                Trait::TeamOrientation,
                Trait::FeedbackOrientation,
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Composite::LearningPotential => "learningPotential",
            Composite::TechnicalAptitude => "technicalAptitude",
            Composite::TeamworkAbility => "teamworkAbility",
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a participant prefers to learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LearningStyle {
    SelfDirected,
    Collaborative,
    Structured,
    Mixed,
}

impl LearningStyle {
    /// The three clustered styles, in tie-check order. `Mixed` is derived.
    pub const CLUSTERED: [LearningStyle; 3] = [
        LearningStyle::SelfDirected,
        LearningStyle::Collaborative,
        LearningStyle::Structured,
    ];

    /// Traits whose mean forms this style's score. Empty for `Mixed`.
    pub fn cluster(self) -> &'static [Trait] {
        match self {
            LearningStyle::SelfDirected => &[
                Trait::SelfEfficacy,
                Trait::AnalyticalThinking,
                Trait::CognitiveFlexibility,
            ],
            LearningStyle::Collaborative => &[
                Trait::TeamOrientation,
                Trait::FeedbackOrientation,
                Trait::ConflictResolution,
            ],
            LearningStyle::Structured => &[
                Trait::AttentionToDetail,
                Trait::Persistence,
                Trait::LearningCommitment,
            ],
            LearningStyle::Mixed => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LearningStyle::SelfDirected => "selfDirected",
            LearningStyle::Collaborative => "collaborative",
            LearningStyle::Structured => "structured",
            LearningStyle::Mixed => "mixed",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-trait weight table.
///
/// Only constructible through validation, so every composite is guaranteed
/// a nonzero weight sum and composite scoring never divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitWeights {
    weights: [f64; TRAIT_COUNT],
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self {
            weights: Trait::ALL.map(Trait::default_weight),
        }
    }
}

impl TraitWeights {
    /// Start from the catalog defaults and apply `overrides` keyed by trait
    /// wire name. All problems are reported together.
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Result<Self, CatalogError> {
        let mut weights = Self::default().weights;
        let mut errors = Vec::new();

        for (name, &weight) in overrides {
            match name.parse::<Trait>() {
                Ok(t) => {
                    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                        errors.push(CatalogError::WeightOutOfRange {
                            trait_name: name.clone(),
                            weight,
                        });
                    } else {
                        weights[t.index()] = weight;
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        let candidate = Self { weights };
        for composite in Composite::ALL {
            if candidate.composite_weight_sum(composite) <= 0.0 {
                errors.push(CatalogError::ZeroWeightComposite(
                    composite.as_str().to_string(),
                ));
            }
        }

        match errors.len() {
            0 => Ok(candidate),
            1 => Err(errors.remove(0)),
            _ => Err(CatalogError::Multiple(errors)),
        }
    }

    /// Weight of a single trait.
    pub fn get(&self, t: Trait) -> f64 {
        self.weights[t.index()]
    }

    /// Sum of member weights for a composite.
    pub fn composite_weight_sum(&self, composite: Composite) -> f64 {
        composite.members().iter().map(|&t| self.get(t)).sum()
    }
}
