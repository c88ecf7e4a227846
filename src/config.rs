//! Rubric configuration: category weights, per-metric ideal targets, level
//! cut points, profiler thresholds, and showcase caps.
//!
//! Everything scoring depends on is carried in one explicit [`RubricConfig`]
//! value passed into the engine; there is no process-wide configuration state.
//! Validation is fail-fast: an invalid rubric aborts before any scoring.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DqsError, Result};
use crate::standards::metric;
use crate::types::Category;

/// Ideal target for one measured signal: either a band or a floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdealTarget {
    Range { low: f64, high: f64 },
    Min { min: f64 },
}

impl IdealTarget {
    /// Re-center a band on a blended benchmark, keeping its width. Floors are
    /// product constants and stay as configured.
    pub fn recentered(&self, benchmark: f64) -> IdealTarget {
        match *self {
            IdealTarget::Range { low, high } => {
                let half = (high - low) / 2.0;
                IdealTarget::Range {
                    low: (benchmark - half).max(0.0),
                    high: benchmark + half,
                }
            }
            IdealTarget::Min { min } => IdealTarget::Min { min },
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            IdealTarget::Range { low, high } => format!("{:.2}-{:.2}", low, high),
            IdealTarget::Min { min } => format!("at least {:.2}", min),
        }
    }
}

/// One rubric item: a measured signal, its weight within the category, and
/// its ideal target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub weight: f64,
    #[serde(flatten)]
    pub target: IdealTarget,
}

impl MetricSpec {
    fn range(name: &str, weight: f64, low: f64, high: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            target: IdealTarget::Range { low, high },
        }
    }

    fn min(name: &str, weight: f64, min: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            target: IdealTarget::Min { min },
        }
    }
}

/// Relative weight of each category in the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub typography: f64,
    pub buttons: f64,
    pub brand_character: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            typography: 0.35,
            buttons: 0.30,
            brand_character: 0.35,
        }
    }
}

impl CategoryWeights {
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Typography => self.typography,
            Category::Buttons => self.buttons,
            Category::BrandCharacter => self.brand_character,
        }
    }

    pub fn sum(&self) -> f64 {
        self.typography + self.buttons + self.brand_character
    }
}

/// Score cut points for the maturity tiers. Scores below `designer_min` are
/// level 1 (Dandelion); scores at or above `tenx_min` are level 4.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCuts {
    pub designer_min: f64,
    pub business_min: f64,
    pub tenx_min: f64,
}

impl Default for LevelCuts {
    fn default() -> Self {
        Self {
            designer_min: 40.0,
            business_min: 60.0,
            tenx_min: 80.0,
        }
    }
}

/// Harmony-rule thresholds. These are hand-tuned heuristics; keeping them in
/// configuration keeps them testable and tunable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyThresholds {
    pub base: u8,
    /// Mean pairwise circular hue distance below which colors are analogous.
    pub analogous_max_mean: f32,
    pub analogous_bonus: i32,
    /// Open interval of hue distances counted as complementary.
    pub complementary_low: f32,
    pub complementary_high: f32,
    pub complementary_bonus: i32,
    pub saturation_range_max: f32,
    pub saturation_bonus: i32,
    pub value_range_max: f32,
    pub value_bonus: i32,
}

impl Default for HarmonyThresholds {
    fn default() -> Self {
        Self {
            base: 50,
            analogous_max_mean: 0.1,
            analogous_bonus: 15,
            complementary_low: 0.45,
            complementary_high: 0.55,
            complementary_bonus: 10,
            saturation_range_max: 0.3,
            saturation_bonus: 10,
            value_range_max: 0.3,
            value_bonus: 10,
        }
    }
}

/// Color-profiler knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub clusters: usize,
    pub max_samples: usize,
    pub restarts: usize,
    pub iterations: usize,
    /// Clusters below this share of sampled pixels are dropped, 0-100.
    pub min_presence_pct: f32,
    pub harmony: HarmonyThresholds,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            clusters: 5,
            max_samples: 10_000,
            restarts: 10,
            iterations: 10,
            min_presence_pct: 5.0,
            harmony: HarmonyThresholds::default(),
        }
    }
}

/// Typography-profiler knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// Tokens below this OCR confidence are discarded, 0-100.
    pub confidence_threshold: f32,
    /// Plausible font-size range; sizes at or outside the bounds are noise.
    pub min_size: f32,
    pub max_size: f32,
    /// A size above `heading_factor * avg` counts as a heading.
    pub heading_factor: f32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 30.0,
            min_size: 5.0,
            max_size: 200.0,
            heading_factor: 1.5,
        }
    }
}

/// Button-profiler knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Minimum tappable edge length in pixels.
    pub min_tap_px: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { min_tap_px: 44.0 }
    }
}

/// Top-example selection knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Ranked entries kept per category.
    pub top_n: usize,
    /// Cap per highlight-tag pool; larger pools are randomly sampled.
    pub tag_cap: usize,
    /// Typography bar: heading-to-body scale band.
    pub typography_scale_low: f64,
    pub typography_scale_high: f64,
    /// Buttons bar: either strong signal clears it.
    pub touch_friendly_min: f64,
    pub hierarchy_min: f64,
    /// Brand-character bar: either strong signal clears it.
    pub harmony_min: f64,
    pub golden_ratio_min: f64,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            tag_cap: 8,
            typography_scale_low: 2.5,
            typography_scale_high: 4.0,
            touch_friendly_min: 80.0,
            hierarchy_min: 80.0,
            harmony_min: 75.0,
            golden_ratio_min: 80.0,
        }
    }
}

/// Per-category rubric items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryMetrics {
    pub typography: Vec<MetricSpec>,
    pub buttons: Vec<MetricSpec>,
    pub brand_character: Vec<MetricSpec>,
}

impl Default for CategoryMetrics {
    fn default() -> Self {
        Self {
            typography: vec![
                MetricSpec::range(metric::SIZE_RATIO, 0.5, 0.1, 0.4),
                MetricSpec::range(metric::TEXT_BLOCK_COUNT, 0.2, 10.0, 50.0),
                MetricSpec::range(metric::HEADING_COUNT, 0.3, 2.0, 10.0),
            ],
            buttons: vec![
                MetricSpec::range(metric::BUTTON_COUNT, 0.2, 3.0, 13.0),
                MetricSpec::min(metric::TOUCH_FRIENDLY_PCT, 0.4, 80.0),
                MetricSpec::min(metric::HIERARCHY_SCORE, 0.4, 70.0),
            ],
            brand_character: vec![
                MetricSpec::min(metric::COLOR_HARMONY, 0.4, 75.0),
                MetricSpec::range(metric::WHITE_SPACE_PCT, 0.3, 25.0, 55.0),
                MetricSpec::min(metric::GOLDEN_RATIO_SCORE, 0.3, 60.0),
            ],
        }
    }
}

impl CategoryMetrics {
    pub fn for_category(&self, category: Category) -> &[MetricSpec] {
        match category {
            Category::Typography => &self.typography,
            Category::Buttons => &self.buttons,
            Category::BrandCharacter => &self.brand_character,
        }
    }
}

/// The full rubric configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    pub category_weights: CategoryWeights,
    pub levels: LevelCuts,
    pub metrics: CategoryMetrics,
    pub color: ColorConfig,
    pub typography: TypographyConfig,
    pub buttons: ButtonConfig,
    pub showcase: ShowcaseConfig,
}

const WEIGHT_TOLERANCE: f64 = 1e-3;

impl RubricConfig {
    /// Load from a TOML file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DqsError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            DqsError::Config(format!("Invalid config ({}): {}", path.display(), e))
        })
    }

    /// Fail-fast validation, run before any scoring begins.
    pub fn validate(&self) -> Result<()> {
        let category_sum = self.category_weights.sum();
        if (category_sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(DqsError::Config(format!(
                "category weights sum to {:.3}, expected 1.0",
                category_sum
            )));
        }

        for category in Category::all() {
            let specs = self.metrics.for_category(category);
            if specs.is_empty() {
                return Err(DqsError::Config(format!(
                    "{} has no rubric metrics",
                    category
                )));
            }
            let sum: f64 = specs.iter().map(|m| m.weight).sum();
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(DqsError::Config(format!(
                    "{} metric weights sum to {:.3}, expected 1.0",
                    category, sum
                )));
            }
            for spec in specs {
                if spec.weight < 0.0 {
                    return Err(DqsError::Config(format!(
                        "{} metric '{}' has negative weight",
                        category, spec.name
                    )));
                }
                if let IdealTarget::Range { low, high } = spec.target {
                    if high < low {
                        return Err(DqsError::Config(format!(
                            "{} metric '{}' has inverted ideal range ({} > {})",
                            category, spec.name, low, high
                        )));
                    }
                }
            }
        }

        let cuts = &self.levels;
        if !(cuts.designer_min < cuts.business_min && cuts.business_min < cuts.tenx_min) {
            return Err(DqsError::Config(format!(
                "level cuts must increase: {} < {} < {} failed",
                cuts.designer_min, cuts.business_min, cuts.tenx_min
            )));
        }
        if cuts.designer_min < 0.0 {
            return Err(DqsError::Config(
                "level cuts must be non-negative".to_string(),
            ));
        }

        if self.color.clusters == 0 || self.color.restarts == 0 || self.color.iterations == 0 {
            return Err(DqsError::Config(
                "color profiler needs clusters, restarts and iterations >= 1".to_string(),
            ));
        }
        if self.color.min_presence_pct < 0.0 || self.typography.confidence_threshold < 0.0 {
            return Err(DqsError::Config(
                "profiler thresholds must be non-negative".to_string(),
            ));
        }
        if self.typography.max_size <= self.typography.min_size {
            return Err(DqsError::Config(
                "typography max_size must exceed min_size".to_string(),
            ));
        }
        if self.showcase.top_n == 0 || self.showcase.tag_cap == 0 {
            return Err(DqsError::Config(
                "showcase caps must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        RubricConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn rejects_category_weights_not_summing_to_one() {
        let mut cfg = RubricConfig::default();
        cfg.category_weights.typography = 0.5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("category weights"));
    }

    #[test]
    fn rejects_metric_weights_not_summing_to_one() {
        let mut cfg = RubricConfig::default();
        cfg.metrics.typography[0].weight = 0.9;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("typography metric weights"));
    }

    #[test]
    fn rejects_non_increasing_level_cuts() {
        let mut cfg = RubricConfig::default();
        cfg.levels.business_min = 40.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("level cuts"));
    }

    #[test]
    fn rejects_negative_thresholds() {
        let mut cfg = RubricConfig::default();
        cfg.typography.confidence_threshold = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: RubricConfig = toml::from_str(
            r#"
            [levels]
            designer_min = 35.0
            "#,
        )
        .expect("partial config parses");
        assert_eq!(cfg.levels.designer_min, 35.0);
        assert_eq!(cfg.levels.business_min, 60.0);
        assert_eq!(cfg.color.clusters, 5);
        cfg.validate().expect("still valid");
    }

    #[test]
    fn metric_target_parses_range_and_min_shapes() {
        let cfg: RubricConfig = toml::from_str(
            r#"
            [[metrics.typography]]
            name = "size_ratio"
            weight = 0.6
            low = 0.05
            high = 0.35

            [[metrics.typography]]
            name = "heading_count"
            weight = 0.4
            min = 2.0
            "#,
        )
        .expect("explicit metrics parse");
        assert_eq!(cfg.metrics.typography.len(), 2);
        assert_eq!(
            cfg.metrics.typography[0].target,
            IdealTarget::Range { low: 0.05, high: 0.35 }
        );
        assert_eq!(cfg.metrics.typography[1].target, IdealTarget::Min { min: 2.0 });
    }

    #[test]
    fn recentering_keeps_band_width_and_leaves_floors() {
        let band = IdealTarget::Range { low: 10.0, high: 50.0 };
        assert_eq!(
            band.recentered(40.0),
            IdealTarget::Range { low: 20.0, high: 60.0 }
        );
        let floor = IdealTarget::Min { min: 80.0 };
        assert_eq!(floor.recentered(90.0), IdealTarget::Min { min: 80.0 });
    }
}
