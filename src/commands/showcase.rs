use std::path::PathBuf;
use std::process::ExitCode;

use dqs_lib::output::DQS_OUTPUT_VERSION;
use dqs_lib::{
    run_batch, BatchOptions, DqsError, DqsOutput, RubricConfig, ShowcaseOutput,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

use super::{load_aggregate, load_manifest};

/// Run the showcase command: score a manifest and emit only the curated sets.
#[allow(clippy::too_many_arguments)]
pub async fn run_showcase(
    config_path: Option<PathBuf>,
    verbose: bool,
    manifest_path: PathBuf,
    reference_aggregate: Option<PathBuf>,
    library_aggregate: Option<PathBuf>,
    top: Option<usize>,
    tag_cap: Option<usize>,
    seed: Option<u64>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let mut config = match RubricConfig::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    if let Some(top) = top {
        config.showcase.top_n = top;
    }
    if let Some(cap) = tag_cap {
        config.showcase.tag_cap = cap;
    }

    let manifest = match load_manifest(&manifest_path) {
        Ok(manifest) => manifest,
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
        eprintln!(
            "Curating top {} per category from {} designs\u{2026}",
            config.showcase.top_n,
            manifest.designs.len()
        );
    }

    let options = BatchOptions {
        concurrency: None,
        seed,
        run_ocr: false,
    };
    let report = match run_batch(manifest, config, reference, library, options).await {
        Ok(report) => report,
        Err(err) => return render_error(err, format, output),
    };

    let body = DqsOutput::Showcase(ShowcaseOutput {
        version: DQS_OUTPUT_VERSION.to_string(),
        showcase: report.showcase,
        failures: report.failures,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DqsError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
