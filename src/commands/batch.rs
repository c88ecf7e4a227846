use std::path::PathBuf;
use std::process::ExitCode;

use dqs_lib::{run_batch, BatchOptions, BatchOutput, DqsError, DqsOutput, RubricConfig};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

use super::{load_aggregate, load_manifest};

/// Run the batch command: profile, score and curate a whole manifest.
#[allow(clippy::too_many_arguments)]
pub async fn run_batch_command(
    config_path: Option<PathBuf>,
    verbose: bool,
    manifest_path: PathBuf,
    reference_aggregate: Option<PathBuf>,
    library_aggregate: Option<PathBuf>,
    concurrency: Option<usize>,
    seed: Option<u64>,
    ocr: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match RubricConfig::load(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };

    let manifest = match load_manifest(&manifest_path) {
        Ok(manifest) => manifest,
        Err(err) => return render_error(err, format, output),
    };
    if verbose {
        eprintln!("Loaded manifest with {} designs\u{2026}", manifest.designs.len());
    }

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
            "Reference population: {}; library population: {}",
            if reference.is_some() { "loaded" } else { "absent (defaults)" },
            if library.is_some() { "loaded" } else { "absent (defaults)" }
        );
    }

    let options = BatchOptions {
        concurrency,
        seed,
        run_ocr: ocr,
    };
    let report = match run_batch(manifest, config, reference, library, options).await {
        Ok(report) => report,
        Err(err) => return render_error(err, format, output),
    };

    if verbose {
        eprintln!(
            "Scored {} designs ({} failures)",
            report.designs.len(),
            report.failures.len()
        );
    }

    let body = DqsOutput::Batch(BatchOutput::from_report(report));
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DqsError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
