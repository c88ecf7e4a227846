mod cli;
mod commands;
mod formatting;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cli::Commands;
use commands::{run_batch_command, run_score, run_showcase};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();

    match args.command {
        Commands::Score {
            input,
            design,
            reference_aggregate,
            library_aggregate,
            seed,
            ocr,
            format,
            output,
        } => {
            run_score(
                args.config,
                args.verbose,
                input,
                design,
                reference_aggregate,
                library_aggregate,
                seed,
                ocr,
                format,
                output,
            )
            .await
        }
        Commands::Batch {
            manifest,
            reference_aggregate,
            library_aggregate,
            concurrency,
            seed,
            ocr,
            format,
            output,
        } => {
            run_batch_command(
                args.config,
                args.verbose,
                manifest,
                reference_aggregate,
                library_aggregate,
                concurrency,
                seed,
                ocr,
                format,
                output,
            )
            .await
        }
        Commands::Showcase {
            manifest,
            reference_aggregate,
            library_aggregate,
            top,
            tag_cap,
            seed,
            format,
            output,
        } => {
            run_showcase(
                args.config,
                args.verbose,
                manifest,
                reference_aggregate,
                library_aggregate,
                top,
                tag_cap,
                seed,
                format,
                output,
            )
            .await
        }
    }
}
