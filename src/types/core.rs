//! Core types used throughout the DQS library.
//!
//! This module contains the fundamental data structures:
//! - [`Category`] - The three scored rubric categories
//! - [`ColorSample`] / [`ColorProfile`] - Dominant palette analysis
//! - [`TextBlock`] / [`SizeAnalysis`] - OCR-derived typography signals
//! - [`ButtonSignals`] - Interactive-element scoring contract
//! - [`DesignMetrics`] - One design's collected raw signals

use std::fmt;

use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

/// A scored rubric category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Typography,
    Buttons,
    BrandCharacter,
}

impl Category {
    pub const fn all() -> [Category; 3] {
        [
            Category::Typography,
            Category::Buttons,
            Category::BrandCharacter,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Typography => "typography",
            Category::Buttons => "buttons",
            Category::BrandCharacter => "brand_character",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rectangle bounds for an element, in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One dominant color of a design, with its share of sampled pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorSample {
    /// `#RRGGBB`
    pub hex: String,
    pub rgb: [u8; 3],
    /// (hue 0-360, saturation 0-100, value 0-100)
    pub hsv: (f32, f32, f32),
    /// Share of sampled pixels assigned to this color, 0-100.
    pub percentage: f32,
}

impl ColorSample {
    pub fn from_rgb(rgb: [u8; 3], percentage: f32) -> Self {
        let srgb = Srgb::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        );
        let hsv = Hsv::from_color(srgb);
        Self {
            hex: format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]),
            rgb,
            hsv: (
                hsv.hue.into_positive_degrees(),
                hsv.saturation * 100.0,
                hsv.value * 100.0,
            ),
            percentage,
        }
    }
}

/// Dominant-palette profile for one design.
///
/// Retained samples are ordered by percentage descending and filtered at the
/// minimum-presence threshold, so their percentages need not sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProfile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorSample>,
    /// Heuristic palette pleasantness, 0-100.
    pub harmony_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<ColorSample>,
}

impl ColorProfile {
    /// The degraded profile produced when decoding or clustering fails.
    pub fn empty() -> Self {
        Self {
            colors: Vec::new(),
            harmony_score: 0,
            dominant_color: None,
        }
    }
}

/// A recognized text region, produced by an external OCR capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    /// Recognition confidence, 0-100.
    pub confidence: f32,
    /// Font-size proxy: pixel height of the token box.
    pub size: f32,
    pub position: BoundingBox,
}

/// Font-size distribution derived from retained text blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeAnalysis {
    pub min_size: f32,
    pub max_size: f32,
    pub avg_size: f32,
    /// The 3 most frequent sizes as (size, count), by count descending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_sizes: Vec<(f32, usize)>,
    /// Share of heading-sized text among all filtered sizes (0-1).
    pub size_ratio: f32,
    /// Number of sizes above the heading threshold.
    pub heading_count: usize,
    /// Mean heading size over mean body size; 0 when either group is empty.
    pub heading_scale: f32,
    /// Number of sizes that survived the plausibility filter.
    pub sample_count: usize,
}

impl SizeAnalysis {
    /// The neutral analysis for a design with no usable text.
    pub fn neutral() -> Self {
        Self {
            min_size: 0.0,
            max_size: 0.0,
            avg_size: 0.0,
            common_sizes: Vec::new(),
            size_ratio: 0.0,
            heading_count: 0,
            heading_scale: 0.0,
            sample_count: 0,
        }
    }
}

/// Interaction-profiler scoring contract.
///
/// The signals may be supplied by an external element detector or derived
/// from raw clickable boxes via `ButtonProfiler::from_elements`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSignals {
    pub count: usize,
    /// Share of interactive elements meeting the minimum tappable size, 0-100.
    pub touch_friendly_percentage: f32,
    /// Visual differentiation between primary and secondary actions, 0-100.
    pub hierarchy_score: f32,
}

impl ButtonSignals {
    /// Clamp externally supplied percentages into their documented ranges.
    pub fn clamped(self) -> Self {
        Self {
            count: self.count,
            touch_friendly_percentage: self.touch_friendly_percentage.clamp(0.0, 100.0),
            hierarchy_score: self.hierarchy_score.clamp(0.0, 100.0),
        }
    }
}

/// Externally computed layout signals consumed by brand-character scoring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSignals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_space_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golden_ratio_score: Option<f32>,
}

/// One design's collected raw signals, as produced by the profilers.
///
/// Every signal is optional: scoring works from whatever is present and marks
/// dependent checklist items indeterminate for the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetrics {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<SizeAnalysis>,
    /// Retained text blocks after confidence filtering.
    pub text_block_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonSignals>,
    #[serde(default)]
    pub layout: LayoutSignals,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Degradations encountered while profiling (decode failures etc.).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DesignMetrics {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            source: None,
            color: None,
            typography: None,
            text_block_count: 0,
            buttons: None,
            layout: LayoutSignals::default(),
            tags: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
