//! Data model for design profiling and scoring.

mod core;
mod evaluation;

pub use self::core::{
    BoundingBox, ButtonSignals, Category, ColorProfile, ColorSample, DesignMetrics, LayoutSignals,
    SizeAnalysis, TextBlock,
};
pub use self::evaluation::{
    CategoryEvaluation, ChecklistOutcome, Evaluation, MaturityLevel, OverallResult,
};
