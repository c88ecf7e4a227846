//! Interaction signals derived from clickable-element boxes.
//!
//! The scoring engine only depends on the [`ButtonSignals`] contract; when a
//! collaborator supplies raw element rectangles instead of aggregates, this
//! profiler derives the contract values from them.

use crate::config::ButtonConfig;
use crate::types::{BoundingBox, ButtonSignals};

#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonProfiler {
    pub config: ButtonConfig,
}

impl ButtonProfiler {
    pub fn new(config: ButtonConfig) -> Self {
        Self { config }
    }

    /// Derive signals from clickable-element rectangles.
    ///
    /// Touch-friendliness is the share of elements whose both edges meet the
    /// minimum tappable size. Hierarchy compares the largest ("primary")
    /// element against the median element area: identical sizing scores 0,
    /// a primary twice the median area scores 100.
    pub fn from_elements(&self, elements: &[BoundingBox]) -> ButtonSignals {
        if elements.is_empty() {
            return ButtonSignals::default();
        }

        let count = elements.len();
        let friendly = elements
            .iter()
            .filter(|b| b.width >= self.config.min_tap_px && b.height >= self.config.min_tap_px)
            .count();
        let touch_friendly_percentage = friendly as f32 / count as f32 * 100.0;

        let mut areas: Vec<f32> = elements.iter().map(|b| b.width * b.height).collect();
        areas.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let hierarchy_score = if count < 2 {
            0.0
        } else {
            let largest = areas[0];
            let median = areas[areas.len() / 2];
            if median <= 0.0 {
                0.0
            } else {
                ((largest / median - 1.0) * 100.0).clamp(0.0, 100.0)
            }
        };

        ButtonSignals {
            count,
            touch_friendly_percentage,
            hierarchy_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f32, height: f32) -> BoundingBox {
        BoundingBox {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn empty_elements_yield_zero_signals() {
        let signals = ButtonProfiler::default().from_elements(&[]);
        assert_eq!(signals.count, 0);
        assert_eq!(signals.touch_friendly_percentage, 0.0);
        assert_eq!(signals.hierarchy_score, 0.0);
    }

    #[test]
    fn touch_friendly_share_counts_both_edges() {
        // 48x48 passes; 48x30 fails on height; 120x60 passes.
        let signals = ButtonProfiler::default().from_elements(&[
            rect(48.0, 48.0),
            rect(48.0, 30.0),
            rect(120.0, 60.0),
        ]);
        assert_eq!(signals.count, 3);
        assert!((signals.touch_friendly_percentage - 66.666_67).abs() < 0.01);
    }

    #[test]
    fn uniform_buttons_score_zero_hierarchy() {
        let signals =
            ButtonProfiler::default().from_elements(&[rect(80.0, 44.0), rect(80.0, 44.0)]);
        assert_eq!(signals.hierarchy_score, 0.0);
    }

    #[test]
    fn prominent_primary_button_scores_full_hierarchy() {
        // Primary is 4x the median area.
        let signals = ButtonProfiler::default().from_elements(&[
            rect(200.0, 88.0),
            rect(100.0, 44.0),
            rect(100.0, 44.0),
        ]);
        assert_eq!(signals.hierarchy_score, 100.0);
    }

    #[test]
    fn single_element_has_no_hierarchy_signal() {
        let signals = ButtonProfiler::default().from_elements(&[rect(300.0, 80.0)]);
        assert_eq!(signals.count, 1);
        assert_eq!(signals.hierarchy_score, 0.0);
        assert_eq!(signals.touch_friendly_percentage, 100.0);
    }
}
