//! End-to-end library flow: profilers -> aggregates -> standards -> engine.

use std::collections::BTreeMap;

use dqs_lib::standards::metric;
use dqs_lib::{
    aggregate_designs, ButtonSignals, Category, ChecklistOutcome, ColorProfile, ColorSample,
    DesignMetrics, LayoutSignals, MaturityLevel, PopulationAggregate, RubricConfig, ScoringEngine,
    SizeAnalysis, StandardsBuilder,
};

fn metrics(id: &str, size_ratio: f32, harmony: u8, touch: f32) -> DesignMetrics {
    let mut m = DesignMetrics::new(id, format!("Design {id}"));
    m.typography = Some(SizeAnalysis {
        min_size: 11.0,
        max_size: 44.0,
        avg_size: 17.0,
        common_sizes: vec![(14.0, 9), (17.0, 6), (32.0, 3)],
        size_ratio,
        heading_count: 5,
        heading_scale: 2.6,
        sample_count: 22,
    });
    m.text_block_count = 28;
    m.buttons = Some(ButtonSignals {
        count: 7,
        touch_friendly_percentage: touch,
        hierarchy_score: 78.0,
    });
    m.color = Some(ColorProfile {
        colors: vec![
            ColorSample::from_rgb([245, 245, 245], 55.0),
            ColorSample::from_rgb([20, 90, 200], 30.0),
        ],
        harmony_score: harmony,
        dominant_color: Some(ColorSample::from_rgb([245, 245, 245], 55.0)),
    });
    m.layout = LayoutSignals {
        white_space_percentage: Some(38.0),
        golden_ratio_score: Some(66.0),
    };
    m
}

fn aggregate_with(category: Category, name: &str, value: f64) -> PopulationAggregate {
    let mut metrics_map: BTreeMap<Category, BTreeMap<String, f64>> = BTreeMap::new();
    metrics_map
        .entry(category)
        .or_default()
        .insert(name.to_string(), value);
    PopulationAggregate {
        sample_count: 50,
        metrics: metrics_map,
    }
}

#[test]
fn rerunning_scoring_on_the_same_inputs_is_byte_identical() {
    let config = RubricConfig::default();
    let standards = StandardsBuilder::default().build(
        Some(&aggregate_with(Category::Typography, metric::SIZE_RATIO, 0.3)),
        Some(&aggregate_with(Category::Typography, metric::SIZE_RATIO, 0.2)),
    );
    let engine = ScoringEngine::new(&config, &standards).unwrap();

    let design = metrics("determinism", 0.28, 82, 88.0);
    let first = serde_json::to_vec(&engine.evaluate(&design)).unwrap();
    let second = serde_json::to_vec(&engine.evaluate(&design)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn standards_blend_feeds_directly_into_scoring_targets() {
    // Blended size-ratio benchmark: 0.7*0.3 + 0.3*0.2 = 0.27. The rubric band
    // (width 0.3) re-centers on it, so a 0.27 ratio sits exactly in band.
    let config = RubricConfig::default();
    let standards = StandardsBuilder::default().build(
        Some(&aggregate_with(Category::Typography, metric::SIZE_RATIO, 0.3)),
        Some(&aggregate_with(Category::Typography, metric::SIZE_RATIO, 0.2)),
    );
    let engine = ScoringEngine::new(&config, &standards).unwrap();

    let evaluation = engine.evaluate(&metrics("blend", 0.27, 82, 88.0));
    assert_eq!(
        evaluation.categories[&Category::Typography].checklist[metric::SIZE_RATIO],
        ChecklistOutcome::Pass
    );
}

#[test]
fn population_pipeline_aggregates_then_scores() {
    let population: Vec<DesignMetrics> = (0..10)
        .map(|i| metrics(&format!("lib{i}"), 0.2 + (i as f32) * 0.01, 75, 85.0))
        .collect();
    let aggregate = aggregate_designs(&population).expect("population aggregates");

    let standards = StandardsBuilder::default().build(Some(&aggregate), None);
    let engine = ScoringEngine::new(&RubricConfig::default(), &standards).unwrap();

    let evaluation = engine.evaluate(&metrics("candidate", 0.24, 82, 90.0));
    assert!(evaluation.overall.score > 0.0);
    assert!(evaluation.overall.score <= 100.0);
    assert_eq!(evaluation.categories.len(), 3);
}

#[test]
fn level_boundaries_follow_configured_cuts() {
    let cuts = RubricConfig::default().levels;
    for (score, expected_rank) in [
        (0.0, 1),
        (39.9, 1),
        (40.0, 2),
        (59.9, 2),
        (60.0, 3),
        (79.9, 3),
        (80.0, 4),
        (100.0, 4),
    ] {
        assert_eq!(
            MaturityLevel::from_score(score, &cuts).rank(),
            expected_rank,
            "score {score}"
        );
    }
}

#[test]
fn evaluation_serializes_as_a_nested_document() {
    let standards = StandardsBuilder::default().build(None, None);
    let engine = ScoringEngine::new(&RubricConfig::default(), &standards).unwrap();
    let evaluation = engine.evaluate(&metrics("doc", 0.25, 82, 90.0));

    let value: serde_json::Value = serde_json::to_value(&evaluation).unwrap();
    assert!(value["overall"]["score"].is_number());
    assert!(value["overall"]["levelName"].is_string());
    assert!(value["categories"]["typography"]["checklist"].is_object());
    assert!(value["categoryScores"]["brand_character"].is_number());

    let back: dqs_lib::Evaluation = serde_json::from_value(value).unwrap();
    assert_eq!(back.design_id, "doc");
}
