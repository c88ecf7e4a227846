//! Top-example selection: curated exemplar sets per category and per
//! free-text highlight tag.
//!
//! Category pools are gated by a disjunction of strong signals, ranked by a
//! category-weighted composite score, and truncated to a configured top-N
//! with ties broken by id for reproducibility. Highlight-tag pools above the
//! cap are reduced by random sampling rather than score rank, so open-ended
//! tags do not always surface the same top performers.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::ShowcaseConfig;
use crate::types::{Category, DesignMetrics, Evaluation};

/// Ranking record for one exemplar design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleEntry {
    pub id: String,
    pub score: f32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One design's metrics together with its evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDesign {
    pub metrics: DesignMetrics,
    pub evaluation: Evaluation,
}

/// The curated example sets for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseSets {
    pub categories: BTreeMap<Category, Vec<ExampleEntry>>,
    pub tags: BTreeMap<String, Vec<ExampleEntry>>,
}

/// Build the curated sets. `seed` fixes the highlight-tag sampling for
/// reproducible runs; the capping stays random by design to diversify
/// open-ended tags.
pub fn build_showcase(
    designs: &[ScoredDesign],
    config: &ShowcaseConfig,
    seed: Option<u64>,
) -> ShowcaseSets {
    let mut categories = BTreeMap::new();
    for category in Category::all() {
        categories.insert(category, top_for_category(designs, category, config));
    }

    ShowcaseSets {
        categories,
        tags: tag_pools(designs, config, seed),
    }
}

fn top_for_category(
    designs: &[ScoredDesign],
    category: Category,
    config: &ShowcaseConfig,
) -> Vec<ExampleEntry> {
    let mut entries: Vec<ExampleEntry> = designs
        .iter()
        .filter(|design| clears_bar(design, category, config))
        .map(|design| entry_for(design, composite_score(design, category)))
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries.truncate(config.top_n);
    entries
}

/// The bar is a disjunction: any one strong signal admits the design.
fn clears_bar(design: &ScoredDesign, category: Category, config: &ShowcaseConfig) -> bool {
    let metrics = &design.metrics;
    match category {
        Category::Typography => metrics
            .typography
            .as_ref()
            .filter(|t| t.sample_count > 0)
            .map(|t| {
                let scale = f64::from(t.heading_scale);
                scale >= config.typography_scale_low && scale <= config.typography_scale_high
            })
            .unwrap_or(false),
        Category::Buttons => metrics
            .buttons
            .map(|b| {
                f64::from(b.touch_friendly_percentage) >= config.touch_friendly_min
                    || f64::from(b.hierarchy_score) >= config.hierarchy_min
            })
            .unwrap_or(false),
        Category::BrandCharacter => {
            let harmonious = metrics
                .color
                .as_ref()
                .filter(|c| !c.colors.is_empty())
                .map(|c| f64::from(c.harmony_score) >= config.harmony_min)
                .unwrap_or(false);
            let proportioned = metrics
                .layout
                .golden_ratio_score
                .map(|g| f64::from(g) >= config.golden_ratio_min)
                .unwrap_or(false);
            harmonious || proportioned
        }
    }
}

/// Composite ranking score: the category's own score dominates, the overall
/// score breaks quality apart within the category.
fn composite_score(design: &ScoredDesign, category: Category) -> f32 {
    let category_score = design
        .evaluation
        .category_scores
        .get(&category)
        .copied()
        .unwrap_or(0.0);
    0.75 * category_score + 0.25 * design.evaluation.overall.score
}

fn entry_for(design: &ScoredDesign, score: f32) -> ExampleEntry {
    ExampleEntry {
        id: design.metrics.id.clone(),
        score,
        title: design.metrics.title.clone(),
        url: design.metrics.url.clone(),
        source: design.metrics.source.clone(),
    }
}

fn tag_pools(
    designs: &[ScoredDesign],
    config: &ShowcaseConfig,
    seed: Option<u64>,
) -> BTreeMap<String, Vec<ExampleEntry>> {
    let mut pools: BTreeMap<String, Vec<ExampleEntry>> = BTreeMap::new();
    for design in designs {
        for tag in &design.metrics.tags {
            pools
                .entry(tag.clone())
                .or_default()
                .push(entry_for(design, design.evaluation.overall.score));
        }
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for pool in pools.values_mut() {
        pool.sort_by(|a, b| a.id.cmp(&b.id));
        if pool.len() > config.tag_cap {
            let chosen = rand::seq::index::sample(&mut rng, pool.len(), config.tag_cap);
            let mut sampled: Vec<ExampleEntry> =
                chosen.into_iter().map(|i| pool[i].clone()).collect();
            sampled.sort_by(|a, b| a.id.cmp(&b.id));
            *pool = sampled;
        }
    }

    pools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RubricConfig;
    use crate::standards::StandardsBuilder;
    use crate::scoring::ScoringEngine;
    use crate::types::{ButtonSignals, SizeAnalysis};

    fn scored(id: &str, touch: f32, hierarchy: f32, tags: &[&str]) -> ScoredDesign {
        let mut metrics = DesignMetrics::new(id, format!("Design {id}"));
        metrics.buttons = Some(ButtonSignals {
            count: 8,
            touch_friendly_percentage: touch,
            hierarchy_score: hierarchy,
        });
        metrics.tags = tags.iter().map(|t| t.to_string()).collect();

        let config = RubricConfig::default();
        let standards = StandardsBuilder::default().build(None, None);
        let engine = ScoringEngine::new(&config, &standards).unwrap();
        let evaluation = engine.evaluate(&metrics);
        ScoredDesign {
            metrics,
            evaluation,
        }
    }

    #[test]
    fn category_selection_respects_cap_and_ordering() {
        let designs: Vec<ScoredDesign> = (0..9)
            .map(|i| scored(&format!("d{i}"), 80.0 + f32::from(i as u8), 85.0, &[]))
            .collect();
        let config = ShowcaseConfig::default();
        let sets = build_showcase(&designs, &config, Some(3));

        let buttons = &sets.categories[&Category::Buttons];
        assert_eq!(buttons.len(), config.top_n);
        for pair in buttons.windows(2) {
            assert!(pair[0].score >= pair[1].score, "ranking must be descending");
        }
    }

    #[test]
    fn ties_break_deterministically_by_id() {
        let designs = vec![
            scored("beta", 90.0, 85.0, &[]),
            scored("alpha", 90.0, 85.0, &[]),
        ];
        let sets = build_showcase(&designs, &ShowcaseConfig::default(), Some(3));
        let buttons = &sets.categories[&Category::Buttons];
        assert_eq!(buttons[0].id, "alpha");
        assert_eq!(buttons[1].id, "beta");
    }

    #[test]
    fn bar_is_a_disjunction_of_strong_signals() {
        // Weak touch share but strong hierarchy still clears the bar.
        let admitted = scored("in", 30.0, 92.0, &[]);
        // Both signals weak: filtered out.
        let rejected = scored("out", 30.0, 40.0, &[]);
        let sets = build_showcase(
            &[admitted, rejected],
            &ShowcaseConfig::default(),
            Some(3),
        );
        let buttons = &sets.categories[&Category::Buttons];
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].id, "in");
    }

    #[test]
    fn typography_bar_uses_the_heading_scale_band() {
        let mut design = scored("typo", 10.0, 10.0, &[]);
        design.metrics.typography = Some(SizeAnalysis {
            min_size: 12.0,
            max_size: 42.0,
            avg_size: 16.0,
            common_sizes: vec![(14.0, 10)],
            size_ratio: 0.2,
            heading_count: 4,
            heading_scale: 3.0,
            sample_count: 20,
        });
        design.metrics.text_block_count = 20;
        let sets = build_showcase(&[design], &ShowcaseConfig::default(), Some(3));
        assert_eq!(sets.categories[&Category::Typography].len(), 1);
    }

    #[test]
    fn oversized_tag_pool_samples_exactly_the_cap_from_the_pool() {
        let designs: Vec<ScoredDesign> = (0..20)
            .map(|i| scored(&format!("d{i:02}"), 90.0, 85.0, &["Animation"]))
            .collect();
        let config = ShowcaseConfig::default();
        let sets = build_showcase(&designs, &config, Some(11));

        let pool = &sets.tags["Animation"];
        assert_eq!(pool.len(), config.tag_cap);
        for entry in pool {
            assert!(
                designs.iter().any(|d| d.metrics.id == entry.id),
                "sampled entries must come from the original pool"
            );
        }
    }

    #[test]
    fn small_tag_pools_are_kept_whole() {
        let designs = vec![
            scored("a", 90.0, 85.0, &["Storytelling"]),
            scored("b", 90.0, 85.0, &["Storytelling"]),
        ];
        let sets = build_showcase(&designs, &ShowcaseConfig::default(), Some(5));
        assert_eq!(sets.tags["Storytelling"].len(), 2);
    }

    #[test]
    fn seeded_tag_sampling_is_reproducible() {
        let designs: Vec<ScoredDesign> = (0..20)
            .map(|i| scored(&format!("d{i:02}"), 90.0, 85.0, &["Hero"]))
            .collect();
        let config = ShowcaseConfig::default();
        let a = build_showcase(&designs, &config, Some(99));
        let b = build_showcase(&designs, &config, Some(99));
        let ids = |sets: &ShowcaseSets| {
            sets.tags["Hero"].iter().map(|e| e.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
    }
}
