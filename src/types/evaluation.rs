//! Evaluation records: the durable output of one scoring pass.
//!
//! An [`Evaluation`] is created once per design and never mutated afterward.
//! It serializes as a nested key-value document for storage and display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LevelCuts;

use super::core::Category;

/// One of the four ordered design-maturity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Dandelion,
    Designer,
    Business,
    TenXDesigner,
}

impl MaturityLevel {
    /// Map a 0-100 score onto a tier. The cut points form a total,
    /// non-overlapping partition of the score range.
    pub fn from_score(score: f64, cuts: &LevelCuts) -> Self {
        if score >= cuts.tenx_min {
            MaturityLevel::TenXDesigner
        } else if score >= cuts.business_min {
            MaturityLevel::Business
        } else if score >= cuts.designer_min {
            MaturityLevel::Designer
        } else {
            MaturityLevel::Dandelion
        }
    }

    pub const fn rank(self) -> u8 {
        match self {
            MaturityLevel::Dandelion => 1,
            MaturityLevel::Designer => 2,
            MaturityLevel::Business => 3,
            MaturityLevel::TenXDesigner => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MaturityLevel::Dandelion => "Dandelion",
            MaturityLevel::Designer => "Designer",
            MaturityLevel::Business => "Business",
            MaturityLevel::TenXDesigner => "10x Designer",
        }
    }
}

/// Outcome of one rubric checklist item.
///
/// `Indeterminate` is a first-class variant: a missing input signal must not
/// silently read as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistOutcome {
    Pass,
    Fail,
    Indeterminate,
}

/// Per-category scoring detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEvaluation {
    pub level: u8,
    pub level_name: String,
    pub checklist: BTreeMap<String, ChecklistOutcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    /// Full ranked list, worst gap first; presentation layers truncate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

/// Overall scoring summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub score: f32,
    pub level: u8,
    pub level_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

/// The durable scoring artifact for one design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub design_id: String,
    pub title: String,
    pub overall: OverallResult,
    pub categories: BTreeMap<Category, CategoryEvaluation>,
    pub category_scores: BTreeMap<Category, f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuts() -> LevelCuts {
        LevelCuts::default()
    }

    #[test]
    fn level_mapping_partitions_the_score_range() {
        assert_eq!(MaturityLevel::from_score(0.0, &cuts()), MaturityLevel::Dandelion);
        assert_eq!(
            MaturityLevel::from_score(39.999, &cuts()),
            MaturityLevel::Dandelion
        );
        assert_eq!(MaturityLevel::from_score(40.0, &cuts()), MaturityLevel::Designer);
        assert_eq!(MaturityLevel::from_score(59.999, &cuts()), MaturityLevel::Designer);
        assert_eq!(MaturityLevel::from_score(60.0, &cuts()), MaturityLevel::Business);
        assert_eq!(MaturityLevel::from_score(79.999, &cuts()), MaturityLevel::Business);
        assert_eq!(
            MaturityLevel::from_score(80.0, &cuts()),
            MaturityLevel::TenXDesigner
        );
        assert_eq!(
            MaturityLevel::from_score(100.0, &cuts()),
            MaturityLevel::TenXDesigner
        );
    }

    #[test]
    fn level_never_decreases_as_score_increases() {
        let mut previous = MaturityLevel::Dandelion;
        for step in 0..=1000 {
            let score = f64::from(step) * 0.1;
            let level = MaturityLevel::from_score(score, &cuts());
            assert!(level >= previous, "level regressed at score {score}");
            previous = level;
        }
    }

    #[test]
    fn level_names_match_ranks() {
        assert_eq!(MaturityLevel::Dandelion.rank(), 1);
        assert_eq!(MaturityLevel::TenXDesigner.rank(), 4);
        assert_eq!(MaturityLevel::TenXDesigner.name(), "10x Designer");
    }

    #[test]
    fn checklist_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&ChecklistOutcome::Indeterminate).unwrap();
        assert_eq!(json, "\"indeterminate\"");
    }
}
