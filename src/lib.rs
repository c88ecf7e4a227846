//! Design Quality Scorer (DQS) Library
//!
//! A library that turns web page screenshots into structured design-quality
//! profiles and scores them against a four-level maturity rubric.
//!
//! # Module Overview
//!
//! - [`profilers`] - Per-design signal extraction (color, typography, buttons)
//! - [`standards`] - Blended reference benchmarks from design populations
//! - [`scoring`] - Fit curves, category/overall scores, levels and feedback
//! - [`showcase`] - Curated top-example selection
//! - [`pipeline`] - Batch orchestration across designs
//! - [`config`] - Rubric configuration and validation
//! - [`types`] - Core data types and the Evaluation record
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dqs_lib::{RubricConfig, ScoringEngine, StandardsBuilder, DesignMetrics};
//!
//! # fn example() -> dqs_lib::Result<()> {
//! let config = RubricConfig::default();
//! let standards = StandardsBuilder::default().build(None, None);
//! let engine = ScoringEngine::new(&config, &standards)?;
//!
//! let metrics = DesignMetrics::new("landing", "Landing Page");
//! let evaluation = engine.evaluate(&metrics);
//! println!("{} scored {}", evaluation.title, evaluation.overall.score);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod image_loader;
pub mod ocr;
pub mod output;
pub mod pipeline;
pub mod profilers;
pub mod scoring;
pub mod showcase;
pub mod standards;
pub mod types;

pub use config::{
    ButtonConfig, CategoryWeights, ColorConfig, HarmonyThresholds, IdealTarget, LevelCuts,
    MetricSpec, RubricConfig, ShowcaseConfig, TypographyConfig,
};
pub use error::{DqsError, ErrorCategory, ErrorPayload, Result};
pub use image_loader::{load_image, ImageLoadError};
pub use output::{
    BatchOutput, DqsOutput, ErrorOutput, ScoreOutput, ShowcaseOutput, DQS_OUTPUT_VERSION,
};
pub use pipeline::{
    profile_design, run_batch, BatchManifest, BatchOptions, BatchReport, DesignFailure,
    DesignInput,
};
pub use profilers::{harmony_score, ButtonProfiler, ColorProfiler, TypographyProfiler};
pub use scoring::{fit_score, MetricAssessment, ScoringEngine};
pub use showcase::{build_showcase, ExampleEntry, ScoredDesign, ShowcaseSets};
pub use standards::{
    aggregate_designs, PopulationAggregate, ReferenceStandards, StandardsBuilder,
};
pub use types::{
    BoundingBox, ButtonSignals, Category, CategoryEvaluation, ChecklistOutcome, ColorProfile,
    ColorSample, DesignMetrics, Evaluation, LayoutSignals, MaturityLevel, OverallResult,
    SizeAnalysis, TextBlock,
};
