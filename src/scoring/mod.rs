//! Scoring & leveling: fit curves, category and overall scores, maturity
//! levels, checklists and qualitative feedback.

mod engine;
mod feedback;
mod fit;

pub use engine::{MetricAssessment, ScoringEngine};
pub use fit::{fit_score, gap};
