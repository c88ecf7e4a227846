//! Per-design signal extraction.
//!
//! Each profiler runs independently on one design's inputs:
//! - [`ColorProfiler`] - dominant palette + harmony from raw pixels
//! - [`TypographyProfiler`] - font-size distribution from OCR text blocks
//! - [`ButtonProfiler`] - interaction signals from clickable-element boxes

mod buttons;
mod color;
mod typography;

pub use buttons::ButtonProfiler;
pub use color::{harmony_score, ColorProfiler};
pub use typography::TypographyProfiler;
