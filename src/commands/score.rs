use std::path::PathBuf;
use std::process::ExitCode;

use dqs_lib::output::DQS_OUTPUT_VERSION;
use dqs_lib::{
    run_batch, BatchManifest, BatchOptions, DesignInput, DqsError, DqsOutput, RubricConfig,
    ScoreOutput,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

use super::load_aggregate;

/// Run the score command: one design in, one evaluation out.
#[allow(clippy::too_many_arguments)]
pub async fn run_score(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: Option<PathBuf>,
    design: Option<PathBuf>,
    reference_aggregate: Option<PathBuf>,
    library_aggregate: Option<PathBuf>,
    seed: Option<u64>,
    ocr: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match RubricConfig::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };

    let design_input = match resolve_design(input, design) {
        Ok(d) => d,
        Err(err) => return render_error(err, format, output),
    };

    let reference = match load_aggregate(reference_aggregate.as_deref()) {
        Ok(agg) => agg,
        Err(err) => return render_error(err, format, output),
    };
    let library = match load_aggregate(library_aggregate.as_deref()) {
        Ok(agg) => agg,
        Err(err) => return render_error(err, format, output),
    };

    if verbose {
        eprintln!("Profiling design '{}'\u{2026}", design_input.id);
    }

    let manifest = BatchManifest {
        designs: vec![design_input],
    };
    let options = BatchOptions {
        concurrency: Some(1),
        seed,
        run_ocr: ocr,
    };
    let report = match run_batch(manifest, config, reference, library, options).await {
        Ok(report) => report,
        Err(err) => return render_error(err, format, output),
    };

    let Some(scored) = report.designs.into_iter().next() else {
        let failure = report
            .failures
            .into_iter()
            .next()
            .map(|f| f.message)
            .unwrap_or_else(|| "design produced no result".to_string());
        return render_error(DqsError::Profiling(failure), format, output);
    };

    if verbose {
        eprintln!(
            "Scored '{}': {} ({})",
            scored.evaluation.title, scored.evaluation.overall.score, scored.evaluation.overall.level_name
        );
    }

    let body = DqsOutput::Score(ScoreOutput {
        version: DQS_OUTPUT_VERSION.to_string(),
        metrics: scored.metrics,
        evaluation: scored.evaluation,
        standards: report.standards,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DqsError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

fn resolve_design(
    input: Option<PathBuf>,
    design: Option<PathBuf>,
) -> Result<DesignInput, DqsError> {
    if let Some(path) = design {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            DqsError::Config(format!("Failed to read design input {}: {}", path.display(), e))
        })?;
        return serde_json::from_str(&raw).map_err(|e| {
            DqsError::Config(format!("Invalid design input ({}): {}", path.display(), e))
        });
    }

    let Some(screenshot) = input else {
        return Err(DqsError::Config(
            "score requires --input SCREENSHOT or --design JSON".to_string(),
        ));
    };

    let id = screenshot
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("design")
        .to_string();
    Ok(DesignInput {
        id: id.clone(),
        title: id,
        url: None,
        source: None,
        screenshot: Some(screenshot),
        text_blocks: Vec::new(),
        buttons: None,
        clickable_boxes: None,
        white_space_percentage: None,
        golden_ratio_score: None,
        tags: Vec::new(),
    })
}
