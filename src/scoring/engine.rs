//! The scoring engine: one design's raw metrics in, one [`Evaluation`] out.
//!
//! The engine is constructed once per batch from a validated rubric and the
//! frozen reference standards; `evaluate` is a pure function of its inputs,
//! so re-running on the same metrics yields identical results.

use std::collections::BTreeMap;

use crate::config::{IdealTarget, RubricConfig};
use crate::error::Result;
use crate::standards::ReferenceStandards;
use crate::types::{
    Category, CategoryEvaluation, ChecklistOutcome, DesignMetrics, Evaluation, MaturityLevel,
    OverallResult,
};
use crate::standards::metric;

use super::feedback;
use super::fit::{fit_score, gap};

/// One rubric metric resolved against the blended standards.
#[derive(Debug, Clone)]
struct ResolvedMetric {
    name: String,
    weight: f64,
    target: IdealTarget,
}

/// The outcome of assessing one metric for one design.
#[derive(Debug, Clone)]
pub struct MetricAssessment {
    pub category: Category,
    pub name: String,
    /// The raw signal, when present.
    pub value: Option<f64>,
    pub target: IdealTarget,
    /// 0-100 fit; `None` when the signal is missing.
    pub fit: Option<f64>,
    /// Normalized distance outside the ideal band.
    pub gap: f64,
    pub weight: f64,
}

pub struct ScoringEngine {
    config: RubricConfig,
    resolved: BTreeMap<Category, Vec<ResolvedMetric>>,
}

impl ScoringEngine {
    /// Validates the rubric (fail fast, before any scoring) and resolves each
    /// metric's ideal band against the blended benchmark: bands re-center on
    /// the benchmark, floors stay as configured.
    pub fn new(config: &RubricConfig, standards: &ReferenceStandards) -> Result<Self> {
        config.validate()?;

        let mut resolved = BTreeMap::new();
        for category in Category::all() {
            let specs = config
                .metrics
                .for_category(category)
                .iter()
                .map(|spec| {
                    let target = match standards.get(category, &spec.name) {
                        Some(benchmark) => spec.target.recentered(benchmark),
                        None => spec.target,
                    };
                    ResolvedMetric {
                        name: spec.name.clone(),
                        weight: spec.weight,
                        target,
                    }
                })
                .collect();
            resolved.insert(category, specs);
        }

        Ok(Self {
            config: config.clone(),
            resolved,
        })
    }

    /// Score one design. Missing signals are never fatal: the category scores
    /// from whatever is present and dependent checklist items read
    /// indeterminate.
    pub fn evaluate(&self, metrics: &DesignMetrics) -> Evaluation {
        let mut categories = BTreeMap::new();
        let mut category_scores = BTreeMap::new();
        let mut all_assessments: Vec<MetricAssessment> = Vec::new();
        let mut weighted_sum = 0.0f64;
        let mut weight_total = 0.0f64;

        for category in Category::all() {
            let assessments = self.assess_category(category, metrics);
            let score = category_score(&assessments);
            let has_signal = assessments.iter().any(|a| a.value.is_some());

            let level = MaturityLevel::from_score(score, &self.config.levels);
            let checklist = checklist_from(&assessments);
            let (strengths, improvements) = feedback::from_assessments(&assessments);

            categories.insert(
                category,
                CategoryEvaluation {
                    level: level.rank(),
                    level_name: level.name().to_string(),
                    checklist,
                    strengths,
                    improvements,
                },
            );
            category_scores.insert(category, score as f32);

            if has_signal {
                let weight = self.config.category_weights.for_category(category);
                weighted_sum += weight * score;
                weight_total += weight;
            }
            all_assessments.extend(assessments);
        }

        let overall_score = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };
        let overall_level = MaturityLevel::from_score(overall_score, &self.config.levels);
        let (strengths, improvements) = feedback::from_assessments(&all_assessments);

        Evaluation {
            design_id: metrics.id.clone(),
            title: metrics.title.clone(),
            overall: OverallResult {
                score: overall_score as f32,
                level: overall_level.rank(),
                level_name: overall_level.name().to_string(),
                strengths,
                improvements,
            },
            categories,
            category_scores,
        }
    }

    fn assess_category(&self, category: Category, metrics: &DesignMetrics) -> Vec<MetricAssessment> {
        self.resolved[&category]
            .iter()
            .map(|resolved| {
                let value = raw_value(metrics, category, &resolved.name);
                let (fit, gap_value) = match value {
                    Some(v) => (Some(fit_score(v, &resolved.target)), gap(v, &resolved.target)),
                    None => (None, 0.0),
                };
                MetricAssessment {
                    category,
                    name: resolved.name.clone(),
                    value,
                    target: resolved.target,
                    fit,
                    gap: gap_value,
                    weight: resolved.weight,
                }
            })
            .collect()
    }
}

/// Weighted mean over present metrics, normalized by their weights so missing
/// signals drop out instead of scoring zero.
fn category_score(assessments: &[MetricAssessment]) -> f64 {
    let mut weighted_sum = 0.0f64;
    let mut weight_total = 0.0f64;
    for assessment in assessments {
        if let Some(fit) = assessment.fit {
            weighted_sum += assessment.weight * fit;
            weight_total += assessment.weight;
        }
    }
    if weight_total > 0.0 {
        (weighted_sum / weight_total).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Each rubric item doubles as a checklist item: in band passes, out of band
/// fails, and a missing signal is indeterminate rather than failed.
fn checklist_from(assessments: &[MetricAssessment]) -> BTreeMap<String, ChecklistOutcome> {
    assessments
        .iter()
        .map(|assessment| {
            let outcome = match assessment.fit {
                None => ChecklistOutcome::Indeterminate,
                Some(fit) if fit >= 100.0 => ChecklistOutcome::Pass,
                Some(_) => ChecklistOutcome::Fail,
            };
            (assessment.name.clone(), outcome)
        })
        .collect()
}

/// Extract the raw signal behind a rubric metric, `None` when the profiler
/// could not produce it.
fn raw_value(metrics: &DesignMetrics, category: Category, name: &str) -> Option<f64> {
    match (category, name) {
        (Category::Typography, metric::SIZE_RATIO) => metrics
            .typography
            .as_ref()
            .filter(|t| t.sample_count > 0)
            .map(|t| f64::from(t.size_ratio)),
        (Category::Typography, metric::TEXT_BLOCK_COUNT) => metrics
            .typography
            .as_ref()
            .map(|_| metrics.text_block_count as f64),
        (Category::Typography, metric::HEADING_COUNT) => metrics
            .typography
            .as_ref()
            .filter(|t| t.sample_count > 0)
            .map(|t| t.heading_count as f64),
        (Category::Buttons, metric::BUTTON_COUNT) => {
            metrics.buttons.map(|b| b.count as f64)
        }
        (Category::Buttons, metric::TOUCH_FRIENDLY_PCT) => metrics
            .buttons
            .map(|b| f64::from(b.touch_friendly_percentage)),
        (Category::Buttons, metric::HIERARCHY_SCORE) => {
            metrics.buttons.map(|b| f64::from(b.hierarchy_score))
        }
        (Category::BrandCharacter, metric::COLOR_HARMONY) => metrics
            .color
            .as_ref()
            .filter(|c| !c.colors.is_empty())
            .map(|c| f64::from(c.harmony_score)),
        (Category::BrandCharacter, metric::WHITE_SPACE_PCT) => {
            metrics.layout.white_space_percentage.map(f64::from)
        }
        (Category::BrandCharacter, metric::GOLDEN_RATIO_SCORE) => {
            metrics.layout.golden_ratio_score.map(f64::from)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::StandardsBuilder;
    use crate::types::{ButtonSignals, ColorProfile, ColorSample, LayoutSignals, SizeAnalysis};

    fn engine() -> ScoringEngine {
        let config = RubricConfig::default();
        let standards = StandardsBuilder::default().build(None, None);
        ScoringEngine::new(&config, &standards).expect("default engine")
    }

    fn strong_metrics() -> DesignMetrics {
        let mut metrics = DesignMetrics::new("strong", "Strong Design");
        metrics.typography = Some(SizeAnalysis {
            min_size: 12.0,
            max_size: 48.0,
            avg_size: 18.0,
            common_sizes: vec![(14.0, 12), (18.0, 8), (32.0, 4)],
            size_ratio: 0.25,
            heading_count: 6,
            heading_scale: 2.8,
            sample_count: 24,
        });
        metrics.text_block_count = 30;
        metrics.buttons = Some(ButtonSignals {
            count: 8,
            touch_friendly_percentage: 92.0,
            hierarchy_score: 85.0,
        });
        metrics.color = Some(ColorProfile {
            colors: vec![
                ColorSample::from_rgb([240, 240, 240], 60.0),
                ColorSample::from_rgb([30, 60, 200], 25.0),
            ],
            harmony_score: 80,
            dominant_color: Some(ColorSample::from_rgb([240, 240, 240], 60.0)),
        });
        metrics.layout = LayoutSignals {
            white_space_percentage: Some(40.0),
            golden_ratio_score: Some(72.0),
        };
        metrics
    }

    #[test]
    fn all_scores_stay_in_range() {
        let evaluation = engine().evaluate(&strong_metrics());
        assert!(evaluation.overall.score >= 0.0 && evaluation.overall.score <= 100.0);
        for (_, score) in &evaluation.category_scores {
            assert!(*score >= 0.0 && *score <= 100.0);
        }
    }

    #[test]
    fn strong_design_reaches_the_top_band() {
        let evaluation = engine().evaluate(&strong_metrics());
        assert!(
            evaluation.overall.score >= 80.0,
            "expected top band, got {}",
            evaluation.overall.score
        );
        assert_eq!(evaluation.overall.level, 4);
        assert_eq!(evaluation.overall.level_name, "10x Designer");
    }

    #[test]
    fn evaluation_is_deterministic() {
        let metrics = strong_metrics();
        let e = engine();
        let a = serde_json::to_string(&e.evaluate(&metrics)).unwrap();
        let b = serde_json::to_string(&e.evaluate(&metrics)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_text_design_scores_without_raising_and_reads_indeterminate() {
        let mut metrics = strong_metrics();
        metrics.typography = Some(SizeAnalysis::neutral());
        metrics.text_block_count = 0;

        let evaluation = engine().evaluate(&metrics);
        let typography = &evaluation.categories[&Category::Typography];
        assert_eq!(
            typography.checklist[metric::SIZE_RATIO],
            ChecklistOutcome::Indeterminate
        );
        assert_eq!(
            typography.checklist[metric::HEADING_COUNT],
            ChecklistOutcome::Indeterminate
        );
        // Block count is still a real (zero) observation.
        assert_eq!(
            typography.checklist[metric::TEXT_BLOCK_COUNT],
            ChecklistOutcome::Fail
        );
        assert!(evaluation.category_scores[&Category::Typography] >= 0.0);
    }

    #[test]
    fn missing_category_drops_out_of_the_overall_weighting() {
        let mut metrics = strong_metrics();
        metrics.buttons = None;

        let evaluation = engine().evaluate(&metrics);
        assert_eq!(evaluation.category_scores[&Category::Buttons], 0.0);
        // Overall reflects the two present categories, not a zeroed third.
        assert!(
            evaluation.overall.score > 50.0,
            "buttons absence should not crater the overall score, got {}",
            evaluation.overall.score
        );
    }

    #[test]
    fn design_with_no_signals_still_produces_a_complete_evaluation() {
        let metrics = DesignMetrics::new("bare", "Bare");
        let evaluation = engine().evaluate(&metrics);
        assert_eq!(evaluation.overall.score, 0.0);
        assert_eq!(evaluation.overall.level, 1);
        assert_eq!(evaluation.categories.len(), 3);
        for (_, category) in &evaluation.categories {
            for (_, outcome) in &category.checklist {
                assert_eq!(*outcome, ChecklistOutcome::Indeterminate);
            }
        }
    }

    #[test]
    fn improvements_rank_worst_gap_first() {
        let mut metrics = strong_metrics();
        // Push two signals out of band by different amounts.
        if let Some(buttons) = metrics.buttons.as_mut() {
            buttons.touch_friendly_percentage = 20.0; // far below the 80 floor
            buttons.hierarchy_score = 65.0; // slightly below the 70 floor
        }
        let evaluation = engine().evaluate(&metrics);
        let improvements = &evaluation.categories[&Category::Buttons].improvements;
        assert!(improvements.len() >= 2);
        assert!(
            improvements[0].contains("touch"),
            "worst gap should rank first: {improvements:?}"
        );
    }
}
