//! Versioned JSON output schemas for the CLI.

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::pipeline::{BatchReport, DesignFailure};
use crate::showcase::{ScoredDesign, ShowcaseSets};
use crate::standards::ReferenceStandards;
use crate::types::DesignMetrics;
use crate::types::Evaluation;

/// Schema version for output payloads.
pub const DQS_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DqsOutput {
    Score(ScoreOutput),
    Batch(BatchOutput),
    Showcase(ShowcaseOutput),
    Error(ErrorOutput),
}

/// Output of `dqs score`: one design's metrics and evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutput {
    pub version: String,
    pub metrics: DesignMetrics,
    pub evaluation: Evaluation,
    pub standards: ReferenceStandards,
}

/// Output of `dqs batch`: the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub version: String,
    pub standards: ReferenceStandards,
    pub designs: Vec<ScoredDesign>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DesignFailure>,
    pub showcase: ShowcaseSets,
}

impl BatchOutput {
    pub fn from_report(report: BatchReport) -> Self {
        Self {
            version: DQS_OUTPUT_VERSION.to_string(),
            standards: report.standards,
            designs: report.designs,
            failures: report.failures,
            showcase: report.showcase,
        }
    }
}

/// Output of `dqs showcase`: curated example sets only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseOutput {
    pub version: String,
    pub showcase: ShowcaseSets,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DesignFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, ErrorPayload};

    #[test]
    fn error_output_serializes_with_mode_tag() {
        let output = DqsOutput::Error(ErrorOutput {
            version: DQS_OUTPUT_VERSION.to_string(),
            message: Some("bad rubric".to_string()),
            error: ErrorPayload::new(
                ErrorCategory::Config,
                "bad rubric".to_string(),
                "Fix the weights.",
            ),
        });
        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"config\""));
    }
}
