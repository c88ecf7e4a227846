//! Qualitative feedback derived from metric assessments.
//!
//! Strengths come from metrics inside their ideal band; improvements are
//! ranked by how far outside the band the metric sits, worst first. The full
//! ranked list is returned; presentation layers truncate for display.

use crate::config::IdealTarget;
use crate::standards::metric;

use super::engine::MetricAssessment;

pub fn from_assessments(assessments: &[MetricAssessment]) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut out_of_band: Vec<&MetricAssessment> = Vec::new();

    for assessment in assessments {
        match assessment.fit {
            Some(fit) if fit >= 100.0 => {
                strengths.push(describe_strength(assessment));
            }
            Some(_) => out_of_band.push(assessment),
            None => {}
        }
    }

    out_of_band.sort_by(|a, b| {
        b.gap
            .partial_cmp(&a.gap)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let improvements = out_of_band.iter().map(|a| describe_improvement(a)).collect();
    (strengths, improvements)
}

fn describe_strength(assessment: &MetricAssessment) -> String {
    let value = assessment.value.unwrap_or_default();
    match assessment.name.as_str() {
        metric::SIZE_RATIO => format!(
            "Heading-to-body balance is on target ({:.0}% of text reads as headings)",
            value * 100.0
        ),
        metric::TEXT_BLOCK_COUNT => {
            format!("Text volume is comfortable ({value:.0} blocks)")
        }
        metric::HEADING_COUNT => {
            format!("Headings structure the page well ({value:.0} headings)")
        }
        metric::BUTTON_COUNT => {
            format!("Call-to-action count is focused ({value:.0} buttons)")
        }
        metric::TOUCH_FRIENDLY_PCT => format!(
            "Tap targets are comfortably sized ({value:.0}% touch friendly)"
        ),
        metric::HIERARCHY_SCORE => format!(
            "Primary actions stand out clearly (hierarchy {value:.0})"
        ),
        metric::COLOR_HARMONY => {
            format!("Color palette is harmonious (harmony {value:.0})")
        }
        metric::WHITE_SPACE_PCT => {
            format!("White space is well balanced ({value:.0}%)")
        }
        metric::GOLDEN_RATIO_SCORE => format!(
            "Layout proportions are pleasing (golden-ratio {value:.0})"
        ),
        other => format!("{other} is within the ideal band ({value:.1})"),
    }
}

fn describe_improvement(assessment: &MetricAssessment) -> String {
    let value = assessment.value.unwrap_or_default();
    let ideal = assessment.target.describe();
    match assessment.name.as_str() {
        metric::SIZE_RATIO => {
            let direction = band_direction(value, &assessment.target);
            format!(
                "Rework the type scale: {:.0}% of text reads as headings, {direction} the {ideal} ideal",
                value * 100.0
            )
        }
        metric::TEXT_BLOCK_COUNT => format!(
            "Adjust text density: {value:.0} blocks, ideal {ideal}"
        ),
        metric::HEADING_COUNT => format!(
            "Restructure headings: {value:.0} found, ideal {ideal}"
        ),
        metric::BUTTON_COUNT => format!(
            "Rebalance calls to action: {value:.0} buttons, ideal {ideal}"
        ),
        metric::TOUCH_FRIENDLY_PCT => format!(
            "Enlarge tap targets: {value:.0}% of buttons are touch friendly, ideal {ideal}"
        ),
        metric::HIERARCHY_SCORE => format!(
            "Differentiate primary from secondary actions: hierarchy {value:.0}, ideal {ideal}"
        ),
        metric::COLOR_HARMONY => format!(
            "Tighten the color palette: harmony {value:.0}, ideal {ideal}"
        ),
        metric::WHITE_SPACE_PCT => format!(
            "Rebalance white space: {value:.0}%, ideal {ideal}"
        ),
        metric::GOLDEN_RATIO_SCORE => format!(
            "Review layout proportions: golden-ratio {value:.0}, ideal {ideal}"
        ),
        other => format!("Adjust {other}: {value:.1}, ideal {ideal}"),
    }
}

fn band_direction(value: f64, target: &IdealTarget) -> &'static str {
    match *target {
        IdealTarget::Range { low, .. } if value < low => "below",
        IdealTarget::Range { .. } => "above",
        IdealTarget::Min { .. } => "below",
    }
}
