//! The scoring engine.
//!
//! Turns a positional answer array and its course's question list into
//! per-trait scores, composite scores, a learning-style label, and ranked
//! strength and development areas. Pure and synchronous: a `ScoringEngine`
//! can be shared freely across threads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Composite, LearningStyle, Trait, TraitWeights};
use crate::model::{Answer, Question};

/// How many traits are reported as strengths and as development areas.
pub const RANKED_AREA_COUNT: usize = 3;

/// Per-trait scores on a 0-100 scale, iterated in catalog order.
///
/// A trait with no entry reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitScores(BTreeMap<Trait, i32>);

impl TraitScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, t: Trait, score: i32) {
        self.0.insert(t, score);
    }

    /// Score for `t`, or 0 if it was never scored.
    pub fn get(&self, t: Trait) -> i32 {
        self.0.get(&t).copied().unwrap_or(0)
    }

    pub fn contains(&self, t: Trait) -> bool {
        self.0.contains_key(&t)
    }

    /// `(trait, score)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        self.0.iter().map(|(&t, &s)| (t, s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Trait, i32)> for TraitScores {
    fn from_iter<I: IntoIterator<Item = (Trait, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three composite scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScores {
    pub learning_potential: i32,
    pub technical_aptitude: i32,
    pub teamwork_ability: i32,
}

impl CompositeScores {
    pub fn get(&self, composite: Composite) -> i32 {
        match composite {
            Composite::LearningPotential => self.learning_potential,
            Composite::TechnicalAptitude => self.technical_aptitude,
            Composite::TeamworkAbility => self.teamwork_ability,
        }
    }
}

/// Guidance derived from the trait scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub learning_style: LearningStyle,
    pub strength_areas: Vec<Trait>,
    pub development_areas: Vec<Trait>,
}

/// Everything the engine computes for one submission.
///
/// `learning_style` is duplicated at the top level and inside
/// `recommendation`; stored records and clients read both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub traits: TraitScores,
    pub composites: CompositeScores,
    pub learning_style: LearningStyle,
    pub recommendation: Recommendation,
}

/// Scores answer sets against a fixed weight table.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: TraitWeights,
}

impl ScoringEngine {
    pub fn new(weights: TraitWeights) -> Self {
        Self { weights }
    }

    /// Score one trait from the answers to the questions that measure it.
    ///
    /// Answers are looked up by each question's position in the full
    /// `questions` list. An unanswered question adds nothing to the raw
    /// score but its best option still counts toward the maximum.
    pub fn score_trait(&self, answers: &[Answer], questions: &[Question], t: Trait) -> i32 {
        let mut score = 0.0;
        let mut max_possible = 0.0;

        for (position, question) in questions.iter().enumerate() {
            if question.measures != t {
                continue;
            }
            if let Some(value) = answers.get(position).copied().flatten() {
                score += value;
            }
            max_possible += question.max_value();
        }

        if max_possible > 0.0 {
            round_half_up(score / max_possible * 100.0)
        } else {
            0
        }
    }

    /// Weighted average of the listed traits' scores.
    ///
    /// Returns `None` when the listed traits carry no weight at all.
    pub fn score_weighted(&self, scores: &TraitScores, traits: &[Trait]) -> Option<i32> {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for &t in traits {
            let weight = self.weights.get(t);
            weighted_sum += f64::from(scores.get(t)) * weight;
            total_weight += weight;
        }
        (total_weight > 0.0).then(|| round_half_up(weighted_sum / total_weight))
    }

    /// Score one of the fixed composites.
    pub fn score_composite(&self, scores: &TraitScores, composite: Composite) -> i32 {
        // TraitWeights guarantees every composite a positive weight sum.
        self.score_weighted(scores, composite.members())
            .unwrap_or_default()
    }

    /// Pick the dominant learning style, or `Mixed` when the top score is
    /// shared.
    pub fn classify_learning_style(&self, scores: &TraitScores) -> LearningStyle {
        let clustered = LearningStyle::CLUSTERED.map(|style| (style, style_score(scores, style)));
        let mixed = round_half_up(
            f64::from(clustered.iter().map(|(_, s)| s).sum::<i32>()) / clustered.len() as f64,
        );

        let candidates = clustered
            .into_iter()
            .chain(std::iter::once((LearningStyle::Mixed, mixed)));
        let max = candidates.clone().map(|(_, s)| s).max().unwrap_or(0);
        let mut top = candidates.filter(|&(_, s)| s == max).map(|(style, _)| style);

        match (top.next(), top.next()) {
            (Some(style), None) => style,
            _ => LearningStyle::Mixed,
        }
    }

    /// Top and bottom traits by score.
    ///
    /// Sorting is stable, so equal scores keep catalog order. Both lists come
    /// from the same descending order; with fewer than six traits they may
    /// overlap.
    pub fn rank_strengths_and_development(&self, scores: &TraitScores) -> (Vec<Trait>, Vec<Trait>) {
        let mut ranked: Vec<(Trait, i32)> = scores.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let strengths = ranked
            .iter()
            .take(RANKED_AREA_COUNT)
            .map(|&(t, _)| t)
            .collect();
        let developments = ranked[ranked.len().saturating_sub(RANKED_AREA_COUNT)..]
            .iter()
            .map(|&(t, _)| t)
            .collect();
        (strengths, developments)
    }

    /// Score a full submission.
    pub fn calculate_results(&self, answers: &[Answer], questions: &[Question]) -> AssessmentResult {
        let traits: TraitScores = Trait::ALL
            .into_iter()
            .map(|t| (t, self.score_trait(answers, questions, t)))
            .collect();

        let composites = CompositeScores {
            learning_potential: self.score_composite(&traits, Composite::LearningPotential),
            technical_aptitude: self.score_composite(&traits, Composite::TechnicalAptitude),
            teamwork_ability: self.score_composite(&traits, Composite::TeamworkAbility),
        };

        let learning_style = self.classify_learning_style(&traits);
        let (strength_areas, development_areas) = self.rank_strengths_and_development(&traits);

        tracing::debug!(
            questions = questions.len(),
            answers = answers.len(),
            %learning_style,
            "calculated assessment result"
        );

        AssessmentResult {
            traits,
            composites,
            learning_style,
            recommendation: Recommendation {
                learning_style,
                strength_areas,
                development_areas,
            },
        }
    }
}

fn style_score(scores: &TraitScores, style: LearningStyle) -> i32 {
    let cluster = style.cluster();
    if cluster.is_empty() {
        return 0;
    }
    let sum: i32 = cluster.iter().map(|&t| scores.get(t)).sum();
    round_half_up(f64::from(sum) / cluster.len() as f64)
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
