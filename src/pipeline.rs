//! Batch orchestration: profile every design, freeze the reference
//! standards, then score.
//!
//! Profiling is CPU-bound and independent per design, so designs run on
//! blocking workers bounded to the available cores. The standards builder is
//! strictly sequential and completes before any design is scored against it.
//! One design's failure is isolated: it is reported alongside the successes
//! and never corrupts the aggregates or other designs' results.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::warn;

use crate::config::RubricConfig;
use crate::error::{DqsError, Result};
use crate::profilers::{ButtonProfiler, ColorProfiler, TypographyProfiler};
use crate::scoring::ScoringEngine;
use crate::showcase::{build_showcase, ScoredDesign, ShowcaseSets};
use crate::standards::{PopulationAggregate, ReferenceStandards, StandardsBuilder};
use crate::types::{BoundingBox, ButtonSignals, DesignMetrics, LayoutSignals, TextBlock};

/// One design's inputs, as handed over by the out-of-scope capture tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignInput {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Screenshot path; color profiling is skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
    /// Pre-extracted OCR text blocks; when absent and the `ocr` feature is
    /// enabled, text is extracted from the screenshot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_blocks: Vec<TextBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonSignals>,
    /// Raw clickable-element rectangles, used when `buttons` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickable_boxes: Option<Vec<BoundingBox>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_space_percentage: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golden_ratio_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// The batch hand-off document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchManifest {
    pub designs: Vec<DesignInput>,
}

/// Knobs for one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Worker bound; defaults to available parallelism.
    pub concurrency: Option<usize>,
    /// Fixed seed for color clustering and tag sampling.
    pub seed: Option<u64>,
    /// Attempt OCR for designs without supplied text blocks.
    pub run_ocr: bool,
}

/// A design that could not be profiled at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFailure {
    pub id: String,
    pub message: String,
}

/// Everything one batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub standards: ReferenceStandards,
    pub designs: Vec<ScoredDesign>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DesignFailure>,
    pub showcase: ShowcaseSets,
}

/// Profile one design's raw inputs into [`DesignMetrics`].
///
/// Input-missing conditions degrade to neutral signals with a recorded
/// warning; they never abort the design or the batch.
pub fn profile_design(
    input: &DesignInput,
    config: &RubricConfig,
    seed: Option<u64>,
    run_ocr: bool,
) -> DesignMetrics {
    let title = if input.title.is_empty() {
        input.id.clone()
    } else {
        input.title.clone()
    };
    let mut metrics = DesignMetrics::new(input.id.clone(), title);
    metrics.url = input.url.clone();
    metrics.source = input.source.clone();
    metrics.tags = input.tags.clone();

    match &input.screenshot {
        Some(path) => {
            let profiler = ColorProfiler::new(config.color.clone(), seed);
            let profile = profiler.profile_path(path);
            if profile.colors.is_empty() && profile.harmony_score == 0 {
                metrics
                    .warnings
                    .push(format!("color profile degraded for {}", path.display()));
            }
            metrics.color = Some(profile);
        }
        None => {
            warn!(design = %input.id, "no screenshot supplied; skipping color profiling");
            metrics.warnings.push("no screenshot supplied".to_string());
        }
    }

    let mut blocks = input.text_blocks.clone();
    if blocks.is_empty() && run_ocr {
        if let Some(path) = &input.screenshot {
            match crate::ocr::extract_text_blocks(path, &crate::ocr::OcrOptions::default()) {
                Ok(extracted) => blocks = extracted,
                Err(e) => {
                    warn!(design = %input.id, error = %e, "OCR unavailable; typography degraded to neutral");
                    metrics.warnings.push(format!("ocr failed: {e}"));
                }
            }
        }
    }

    let typography = TypographyProfiler::new(config.typography);
    let (analysis, retained) = typography.profile(&blocks);
    metrics.text_block_count = retained;
    metrics.typography = Some(analysis);

    metrics.buttons = match (input.buttons, &input.clickable_boxes) {
        (Some(signals), _) => Some(signals.clamped()),
        (None, Some(boxes)) => Some(ButtonProfiler::new(config.buttons).from_elements(boxes)),
        (None, None) => None,
    };

    metrics.layout = LayoutSignals {
        white_space_percentage: input.white_space_percentage,
        golden_ratio_score: input.golden_ratio_score,
    };

    metrics
}

/// Run a full batch: profile concurrently, build standards once, score every
/// design against the frozen standards, and curate the showcase sets.
///
/// Configuration problems are fatal before any work begins; per-design
/// failures are collected without blocking the rest.
pub async fn run_batch(
    manifest: BatchManifest,
    config: RubricConfig,
    reference: Option<PopulationAggregate>,
    library: Option<PopulationAggregate>,
    options: BatchOptions,
) -> Result<BatchReport> {
    config.validate()?;

    let workers = options
        .concurrency
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1);

    let semaphore = Arc::new(Semaphore::new(workers));
    let config = Arc::new(config);

    let mut handles = Vec::with_capacity(manifest.designs.len());
    for input in manifest.designs {
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        let seed = options.seed;
        let run_ocr = options.run_ocr;
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore never closed");
            let id = input.id.clone();
            let result = tokio::task::spawn_blocking(move || {
                profile_design(&input, &config, seed, run_ocr)
            })
            .await;
            (id, result)
        }));
    }

    let mut profiled = Vec::new();
    let mut failures = Vec::new();
    for joined in futures::future::join_all(handles).await {
        match joined {
            Ok((_, Ok(metrics))) => profiled.push(metrics),
            Ok((id, Err(join_err))) => failures.push(DesignFailure {
                id,
                message: format!("profiling worker failed: {join_err}"),
            }),
            Err(join_err) => {
                return Err(DqsError::Unknown(format!(
                    "batch task unexpectedly aborted: {join_err}"
                )))
            }
        }
    }

    // Read-after-write barrier: standards are complete before any scoring.
    let standards = StandardsBuilder::default().build(reference.as_ref(), library.as_ref());
    let engine = ScoringEngine::new(&config, &standards)?;

    let scored: Vec<ScoredDesign> = profiled
        .into_iter()
        .map(|metrics| ScoredDesign {
            evaluation: engine.evaluate(&metrics),
            metrics,
        })
        .collect();

    let showcase = build_showcase(&scored, &config.showcase, options.seed);

    Ok(BatchReport {
        standards,
        designs: scored,
        failures,
        showcase,
    })
}
