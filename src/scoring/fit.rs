//! Per-metric fit scoring against an ideal target.

use crate::config::IdealTarget;

/// 0-100 fit of a raw value against its target.
///
/// Maximal at/within the ideal band, degrading linearly outside it; the
/// fall-off scale for a band is its width. Monotonic on each side of the
/// band and clamped to [0, 100].
pub fn fit_score(value: f64, target: &IdealTarget) -> f64 {
    match *target {
        IdealTarget::Range { low, high } => {
            if value >= low && value <= high {
                return 100.0;
            }
            let span = if high > low { high - low } else { low.abs().max(1.0) };
            let distance = if value < low { low - value } else { value - high };
            (100.0 * (1.0 - distance / span)).clamp(0.0, 100.0)
        }
        IdealTarget::Min { min } => {
            if value >= min || min <= 0.0 {
                return 100.0;
            }
            (100.0 * value / min).clamp(0.0, 100.0)
        }
    }
}

/// Normalized distance outside the ideal band; 0 when inside. Used to rank
/// improvements worst-first.
pub fn gap(value: f64, target: &IdealTarget) -> f64 {
    match *target {
        IdealTarget::Range { low, high } => {
            if value >= low && value <= high {
                return 0.0;
            }
            let span = if high > low { high - low } else { low.abs().max(1.0) };
            let distance = if value < low { low - value } else { value - high };
            distance / span
        }
        IdealTarget::Min { min } => {
            if value >= min || min <= 0.0 {
                0.0
            } else {
                (min - value) / min
            }
        }
    }
}
