//! Reference standards: blended per-metric benchmarks that scoring compares
//! against.
//!
//! The builder merges up to two independently aggregated design populations
//! (a curated reference set and a general library) on top of hardcoded
//! defaults. It runs once per batch; the result is read-only configuration
//! for the scoring engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Category, DesignMetrics};

/// Canonical metric names shared by standards, rubric and aggregates.
pub mod metric {
    pub const SIZE_RATIO: &str = "size_ratio";
    pub const TEXT_BLOCK_COUNT: &str = "text_block_count";
    pub const HEADING_COUNT: &str = "heading_count";
    pub const BUTTON_COUNT: &str = "button_count";
    pub const TOUCH_FRIENDLY_PCT: &str = "touch_friendly_pct";
    pub const HIERARCHY_SCORE: &str = "hierarchy_score";
    pub const COLOR_HARMONY: &str = "color_harmony";
    pub const WHITE_SPACE_PCT: &str = "white_space_pct";
    pub const GOLDEN_RATIO_SCORE: &str = "golden_ratio_score";
}

/// Per-category metric averages from one design population.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationAggregate {
    pub sample_count: usize,
    pub metrics: BTreeMap<Category, BTreeMap<String, f64>>,
}

/// Blended benchmark values, one per metric per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStandards {
    pub categories: BTreeMap<Category, BTreeMap<String, f64>>,
}

impl ReferenceStandards {
    pub fn get(&self, category: Category, name: &str) -> Option<f64> {
        self.categories.get(&category).and_then(|m| m.get(name)).copied()
    }
}

/// Builds [`ReferenceStandards`] from whatever populations are present.
#[derive(Debug, Clone, Copy)]
pub struct StandardsBuilder {
    /// Weight of the already-loaded value when blending in the second
    /// population. The first-loaded population dominates at this weight
    /// regardless of which population is "better".
    pub primary_weight: f64,
}

impl Default for StandardsBuilder {
    fn default() -> Self {
        Self { primary_weight: 0.7 }
    }
}

impl StandardsBuilder {
    /// Defaults -> overwrite with the reference population's averages ->
    /// blend the library population at `primary_weight / 1-primary_weight`.
    /// Absent populations are tolerated; the result is always complete.
    pub fn build(
        &self,
        reference: Option<&PopulationAggregate>,
        library: Option<&PopulationAggregate>,
    ) -> ReferenceStandards {
        let mut categories = default_standards();

        if let Some(population) = reference {
            for (category, averages) in &population.metrics {
                let entry = categories.entry(*category).or_default();
                for (name, value) in averages {
                    entry.insert(name.clone(), *value);
                }
            }
        }

        if let Some(population) = library {
            for (category, averages) in &population.metrics {
                let entry = categories.entry(*category).or_default();
                for (name, value) in averages {
                    match entry.get(name).copied() {
                        Some(current) => {
                            let blended = self.primary_weight * current
                                + (1.0 - self.primary_weight) * value;
                            entry.insert(name.clone(), blended);
                        }
                        None => {
                            entry.insert(name.clone(), *value);
                        }
                    }
                }
            }
        }

        ReferenceStandards { categories }
    }
}

fn default_standards() -> BTreeMap<Category, BTreeMap<String, f64>> {
    let mut categories = BTreeMap::new();

    let mut typography = BTreeMap::new();
    typography.insert(metric::SIZE_RATIO.to_string(), 0.25);
    typography.insert(metric::TEXT_BLOCK_COUNT.to_string(), 30.0);
    typography.insert(metric::HEADING_COUNT.to_string(), 6.0);
    categories.insert(Category::Typography, typography);

    let mut buttons = BTreeMap::new();
    buttons.insert(metric::BUTTON_COUNT.to_string(), 8.0);
    buttons.insert(metric::TOUCH_FRIENDLY_PCT.to_string(), 85.0);
    buttons.insert(metric::HIERARCHY_SCORE.to_string(), 70.0);
    categories.insert(Category::Buttons, buttons);

    let mut brand = BTreeMap::new();
    brand.insert(metric::COLOR_HARMONY.to_string(), 70.0);
    brand.insert(metric::WHITE_SPACE_PCT.to_string(), 40.0);
    brand.insert(metric::GOLDEN_RATIO_SCORE.to_string(), 60.0);
    categories.insert(Category::BrandCharacter, brand);

    categories
}

/// Average the available signals of a profiled population into a
/// [`PopulationAggregate`]. Designs missing a signal simply do not
/// contribute to that signal's average. Returns `None` for an empty slice.
pub fn aggregate_designs(designs: &[DesignMetrics]) -> Option<PopulationAggregate> {
    if designs.is_empty() {
        return None;
    }

    let mut sums: BTreeMap<Category, BTreeMap<String, (f64, usize)>> = BTreeMap::new();
    let mut add = |category: Category, name: &str, value: f64| {
        let (sum, count) = sums
            .entry(category)
            .or_default()
            .entry(name.to_string())
            .or_insert((0.0, 0));
        *sum += value;
        *count += 1;
    };

    for design in designs {
        if let Some(typography) = &design.typography {
            if typography.sample_count > 0 {
                add(Category::Typography, metric::SIZE_RATIO, f64::from(typography.size_ratio));
                add(
                    Category::Typography,
                    metric::HEADING_COUNT,
                    typography.heading_count as f64,
                );
            }
            add(
                Category::Typography,
                metric::TEXT_BLOCK_COUNT,
                design.text_block_count as f64,
            );
        }
        if let Some(buttons) = &design.buttons {
            add(Category::Buttons, metric::BUTTON_COUNT, buttons.count as f64);
            add(
                Category::Buttons,
                metric::TOUCH_FRIENDLY_PCT,
                f64::from(buttons.touch_friendly_percentage),
            );
            add(
                Category::Buttons,
                metric::HIERARCHY_SCORE,
                f64::from(buttons.hierarchy_score),
            );
        }
        if let Some(color) = &design.color {
            if !color.colors.is_empty() {
                add(
                    Category::BrandCharacter,
                    metric::COLOR_HARMONY,
                    f64::from(color.harmony_score),
                );
            }
        }
        if let Some(white_space) = design.layout.white_space_percentage {
            add(
                Category::BrandCharacter,
                metric::WHITE_SPACE_PCT,
                f64::from(white_space),
            );
        }
        if let Some(golden) = design.layout.golden_ratio_score {
            add(
                Category::BrandCharacter,
                metric::GOLDEN_RATIO_SCORE,
                f64::from(golden),
            );
        }
    }

    let metrics = sums
        .into_iter()
        .map(|(category, entries)| {
            let averages = entries
                .into_iter()
                .map(|(name, (sum, count))| (name, sum / count as f64))
                .collect();
            (category, averages)
        })
        .collect();

    Some(PopulationAggregate {
        sample_count: designs.len(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ButtonSignals, ColorProfile, ColorSample, SizeAnalysis};

    fn aggregate_with(category: Category, name: &str, value: f64) -> PopulationAggregate {
        let mut metrics: BTreeMap<Category, BTreeMap<String, f64>> = BTreeMap::new();
        metrics.entry(category).or_default().insert(name.to_string(), value);
        PopulationAggregate {
            sample_count: 1,
            metrics,
        }
    }

    #[test]
    fn defaults_cover_every_rubric_metric() {
        let standards = StandardsBuilder::default().build(None, None);
        for category in Category::all() {
            assert!(
                !standards.categories[&category].is_empty(),
                "{category} should have default benchmarks"
            );
        }
        assert!(standards.get(Category::Typography, metric::SIZE_RATIO).is_some());
        assert!(standards.get(Category::Buttons, metric::HIERARCHY_SCORE).is_some());
        assert!(standards.get(Category::BrandCharacter, metric::GOLDEN_RATIO_SCORE).is_some());
    }

    #[test]
    fn reference_population_overwrites_defaults() {
        let reference = aggregate_with(Category::Buttons, metric::BUTTON_COUNT, 12.0);
        let standards = StandardsBuilder::default().build(Some(&reference), None);
        assert_eq!(standards.get(Category::Buttons, metric::BUTTON_COUNT), Some(12.0));
        // Untouched metrics keep their defaults.
        assert_eq!(
            standards.get(Category::Buttons, metric::TOUCH_FRIENDLY_PCT),
            Some(85.0)
        );
    }

    #[test]
    fn library_population_blends_seventy_thirty() {
        let reference = aggregate_with(Category::Typography, metric::HEADING_COUNT, 80.0);
        let library = aggregate_with(Category::Typography, metric::HEADING_COUNT, 50.0);
        let standards =
            StandardsBuilder::default().build(Some(&reference), Some(&library));
        let blended = standards
            .get(Category::Typography, metric::HEADING_COUNT)
            .unwrap();
        assert!((blended - 71.0).abs() < 1e-9, "0.7*80 + 0.3*50 = 71, got {blended}");
    }

    #[test]
    fn library_alone_blends_against_defaults() {
        let library = aggregate_with(Category::BrandCharacter, metric::WHITE_SPACE_PCT, 60.0);
        let standards = StandardsBuilder::default().build(None, Some(&library));
        let blended = standards
            .get(Category::BrandCharacter, metric::WHITE_SPACE_PCT)
            .unwrap();
        // 0.7 * default 40 + 0.3 * 60
        assert!((blended - 46.0).abs() < 1e-9);
    }

    #[test]
    fn aggregate_designs_averages_available_signals() {
        let mut a = DesignMetrics::new("a", "A");
        a.typography = Some(SizeAnalysis {
            min_size: 10.0,
            max_size: 40.0,
            avg_size: 18.0,
            common_sizes: vec![(10.0, 3)],
            size_ratio: 0.4,
            heading_count: 2,
            heading_scale: 2.5,
            sample_count: 5,
        });
        a.text_block_count = 5;
        a.buttons = Some(ButtonSignals {
            count: 10,
            touch_friendly_percentage: 90.0,
            hierarchy_score: 80.0,
        });

        let mut b = DesignMetrics::new("b", "B");
        b.buttons = Some(ButtonSignals {
            count: 6,
            touch_friendly_percentage: 70.0,
            hierarchy_score: 60.0,
        });
        b.color = Some(ColorProfile {
            colors: vec![ColorSample::from_rgb([10, 20, 30], 60.0)],
            harmony_score: 80,
            dominant_color: None,
        });

        let aggregate = aggregate_designs(&[a, b]).expect("non-empty population");
        assert_eq!(aggregate.sample_count, 2);
        let buttons = &aggregate.metrics[&Category::Buttons];
        assert!((buttons[metric::BUTTON_COUNT] - 8.0).abs() < 1e-9);
        assert!((buttons[metric::TOUCH_FRIENDLY_PCT] - 80.0).abs() < 1e-9);
        // Only one design contributed typography.
        let typography = &aggregate.metrics[&Category::Typography];
        assert!((typography[metric::SIZE_RATIO] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn aggregate_of_empty_population_is_none() {
        assert!(aggregate_designs(&[]).is_none());
    }
}
