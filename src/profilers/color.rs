//! Dominant-palette extraction and harmony scoring.
//!
//! Pixels are sampled uniformly at random (bounded at `max_samples`), then
//! clustered with a k-means pass restarted from several random seedings; the
//! lowest-inertia run wins. Cluster shares become percentages, centers are
//! converted to HSV for the rule-based harmony score.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::config::{ColorConfig, HarmonyThresholds};
use crate::types::{ColorProfile, ColorSample};

#[derive(Debug, Clone)]
pub struct ColorProfiler {
    pub config: ColorConfig,
    /// Fixed RNG seed for reproducible sampling and clustering.
    pub seed: Option<u64>,
}

impl Default for ColorProfiler {
    fn default() -> Self {
        Self {
            config: ColorConfig::default(),
            seed: None,
        }
    }
}

impl ColorProfiler {
    pub fn new(config: ColorConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }

    /// Profile the image at `path`. Decode failures degrade to an empty
    /// profile and are logged; color analysis must never abort a design's
    /// evaluation.
    pub fn profile_path(&self, path: &Path) -> ColorProfile {
        match crate::image_loader::load_image(path) {
            Ok(img) => self.profile_image(&img),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "image decode failed; color profile degraded to empty");
                ColorProfile::empty()
            }
        }
    }

    pub fn profile_image(&self, img: &DynamicImage) -> ColorProfile {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let samples = sample_pixels(img, self.config.max_samples, &mut rng);
        if samples.is_empty() {
            warn!("image has no pixels; color profile degraded to empty");
            return ColorProfile::empty();
        }

        let (centers, counts) = best_clustering(
            &samples,
            self.config.clusters,
            self.config.restarts,
            self.config.iterations,
            &mut rng,
        );

        let total = samples.len() as f32;
        let mut colors: Vec<ColorSample> = centers
            .iter()
            .zip(&counts)
            .map(|(center, count)| {
                let rgb = [
                    center[0].round().clamp(0.0, 255.0) as u8,
                    center[1].round().clamp(0.0, 255.0) as u8,
                    center[2].round().clamp(0.0, 255.0) as u8,
                ];
                ColorSample::from_rgb(rgb, *count as f32 / total * 100.0)
            })
            .filter(|sample| sample.percentage >= self.config.min_presence_pct)
            .collect();

        colors.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.hex.cmp(&b.hex))
        });

        let harmony = harmony_score(&colors, &self.config.harmony);
        let dominant = colors.first().cloned();

        ColorProfile {
            colors,
            harmony_score: harmony,
            dominant_color: dominant,
        }
    }
}

/// Rule-based palette pleasantness, 0-100.
///
/// Starts at the neutral base and awards bonuses for analogous hues, a
/// complementary pair, and tight saturation/value ranges. Fewer than two
/// retained colors is insufficient signal and scores exactly the base.
pub fn harmony_score(colors: &[ColorSample], thresholds: &HarmonyThresholds) -> u8 {
    if colors.len() < 2 {
        return thresholds.base;
    }

    let hues: Vec<f32> = colors
        .iter()
        .map(|c| (c.hsv.0 / 360.0).rem_euclid(1.0))
        .collect();
    let saturations: Vec<f32> = colors.iter().map(|c| c.hsv.1 / 100.0).collect();
    let values: Vec<f32> = colors.iter().map(|c| c.hsv.2 / 100.0).collect();

    let mut distances = Vec::new();
    for i in 0..hues.len() {
        for j in (i + 1)..hues.len() {
            let d = (hues[i] - hues[j]).abs();
            distances.push(d.min(1.0 - d));
        }
    }

    let mut score = i32::from(thresholds.base);

    let mean_distance: f32 = distances.iter().sum::<f32>() / distances.len() as f32;
    if mean_distance < thresholds.analogous_max_mean {
        score += thresholds.analogous_bonus;
    }

    if distances
        .iter()
        .any(|d| *d > thresholds.complementary_low && *d < thresholds.complementary_high)
    {
        score += thresholds.complementary_bonus;
    }

    if spread(&saturations) < thresholds.saturation_range_max {
        score += thresholds.saturation_bonus;
    }
    if spread(&values) < thresholds.value_range_max {
        score += thresholds.value_bonus;
    }

    score.clamp(0, 100) as u8
}

fn spread(values: &[f32]) -> f32 {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    max - min
}

/// Uniform random pixel sample, capped at `max_samples`. Color distribution
/// is assumed spatially uniform enough for sampling to preserve shares.
fn sample_pixels(img: &DynamicImage, max_samples: usize, rng: &mut StdRng) -> Vec<[f32; 3]> {
    let (w, h) = img.dimensions();
    let total = u64::from(w) * u64::from(h);
    if total == 0 {
        return Vec::new();
    }

    let mut samples = Vec::new();
    if total <= max_samples as u64 {
        for y in 0..h {
            for x in 0..w {
                let p = img.get_pixel(x, y).0;
                samples.push([f32::from(p[0]), f32::from(p[1]), f32::from(p[2])]);
            }
        }
    } else {
        samples.reserve(max_samples);
        for _ in 0..max_samples {
            let x = rng.gen_range(0..w);
            let y = rng.gen_range(0..h);
            let p = img.get_pixel(x, y).0;
            samples.push([f32::from(p[0]), f32::from(p[1]), f32::from(p[2])]);
        }
    }
    samples
}

/// Run k-means `restarts` times from random seedings and keep the run with
/// the lowest inertia.
fn best_clustering(
    samples: &[[f32; 3]],
    k: usize,
    restarts: usize,
    iterations: usize,
    rng: &mut StdRng,
) -> (Vec<[f32; 3]>, Vec<usize>) {
    let mut best: Option<(Vec<[f32; 3]>, Vec<usize>, f32)> = None;

    for _ in 0..restarts.max(1) {
        let run = kmeans(samples, k, iterations, rng);
        match &best {
            Some((_, _, inertia)) if run.2 >= *inertia => {}
            _ => best = Some(run),
        }
    }

    let (centers, counts, _) = best.expect("at least one clustering run");
    (centers, counts)
}

fn kmeans(
    samples: &[[f32; 3]],
    k: usize,
    iterations: usize,
    rng: &mut StdRng,
) -> (Vec<[f32; 3]>, Vec<usize>, f32) {
    let k = k.clamp(1, samples.len());

    let mut centers: Vec<[f32; 3]> = rand::seq::index::sample(rng, samples.len(), k)
        .into_iter()
        .map(|i| samples[i])
        .collect();
    let mut assignments = vec![0usize; samples.len()];

    for _ in 0..iterations {
        for (si, sample) in samples.iter().enumerate() {
            assignments[si] = nearest(sample, &centers);
        }

        let mut accum = vec![[0.0f32; 3]; k];
        let mut counts = vec![0usize; k];
        for (si, sample) in samples.iter().enumerate() {
            let c = assignments[si];
            accum[c][0] += sample[0];
            accum[c][1] += sample[1];
            accum[c][2] += sample[2];
            counts[c] += 1;
        }
        for (ci, count) in counts.iter().enumerate() {
            if *count > 0 {
                let n = *count as f32;
                centers[ci] = [accum[ci][0] / n, accum[ci][1] / n, accum[ci][2] / n];
            }
        }
    }

    let mut counts = vec![0usize; k];
    let mut inertia = 0.0f32;
    for sample in samples {
        let c = nearest(sample, &centers);
        counts[c] += 1;
        inertia += distance2(sample, &centers[c]);
    }

    (centers, counts, inertia)
}

fn nearest(sample: &[f32; 3], centers: &[[f32; 3]]) -> usize {
    let mut best = 0usize;
    let mut best_d = f32::INFINITY;
    for (ci, center) in centers.iter().enumerate() {
        let d = distance2(sample, center);
        if d < best_d {
            best_d = d;
            best = ci;
        }
    }
    best
}

fn distance2(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
