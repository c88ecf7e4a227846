//! Font-size distribution analysis over OCR text blocks.
//!
//! Token box height stands in for font size. Sizes outside the plausible
//! range are OCR noise (stray marks, full-page artifacts) and are excluded
//! before statistics.

use std::collections::BTreeMap;

use crate::config::TypographyConfig;
use crate::types::{SizeAnalysis, TextBlock};

#[derive(Debug, Clone, Copy, Default)]
pub struct TypographyProfiler {
    pub config: TypographyConfig,
}

impl TypographyProfiler {
    pub fn new(config: TypographyConfig) -> Self {
        Self { config }
    }

    /// Drop blank tokens and tokens below the confidence threshold.
    pub fn filter_blocks<'a>(&self, blocks: &'a [TextBlock]) -> Vec<&'a TextBlock> {
        blocks
            .iter()
            .filter(|b| !b.text.trim().is_empty())
            .filter(|b| b.confidence >= self.config.confidence_threshold)
            .collect()
    }

    /// Compute the size distribution of already-filtered blocks. A design
    /// with no usable text yields the neutral analysis rather than failing.
    pub fn analyze(&self, blocks: &[&TextBlock]) -> SizeAnalysis {
        let sizes: Vec<f32> = blocks
            .iter()
            .map(|b| b.size)
            .filter(|s| *s > self.config.min_size && *s < self.config.max_size)
            .collect();

        if sizes.is_empty() {
            return SizeAnalysis::neutral();
        }

        let min_size = sizes.iter().copied().fold(f32::INFINITY, f32::min);
        let max_size = sizes.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let avg_size = sizes.iter().sum::<f32>() / sizes.len() as f32;

        let heading_threshold = self.config.heading_factor * avg_size;
        let heading_sizes: Vec<f32> = sizes
            .iter()
            .copied()
            .filter(|s| *s > heading_threshold)
            .collect();
        let body_sizes: Vec<f32> = sizes
            .iter()
            .copied()
            .filter(|s| *s <= heading_threshold)
            .collect();

        let heading_count = heading_sizes.len();
        let size_ratio = heading_count as f32 / sizes.len() as f32;
        let heading_scale = if heading_sizes.is_empty() || body_sizes.is_empty() {
            0.0
        } else {
            let heading_mean = heading_sizes.iter().sum::<f32>() / heading_sizes.len() as f32;
            let body_mean = body_sizes.iter().sum::<f32>() / body_sizes.len() as f32;
            heading_mean / body_mean
        };

        SizeAnalysis {
            min_size,
            max_size,
            avg_size,
            common_sizes: common_sizes(&sizes, 3),
            size_ratio,
            heading_count,
            heading_scale,
            sample_count: sizes.len(),
        }
    }

    /// Filter and analyze in one step.
    pub fn profile(&self, blocks: &[TextBlock]) -> (SizeAnalysis, usize) {
        let retained = self.filter_blocks(blocks);
        let analysis = self.analyze(&retained);
        (analysis, retained.len())
    }
}

/// The `top` most frequent sizes, bucketed to whole pixels. Ties are broken
/// by the smaller size for reproducibility.
fn common_sizes(sizes: &[f32], top: usize) -> Vec<(f32, usize)> {
    let mut buckets: BTreeMap<i64, usize> = BTreeMap::new();
    for size in sizes {
        *buckets.entry(size.round() as i64).or_insert(0) += 1;
    }

    let mut ranked: Vec<(f32, usize)> = buckets
        .into_iter()
        .map(|(bucket, count)| (bucket as f32, count))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
    });
    ranked.truncate(top);
    ranked
}
