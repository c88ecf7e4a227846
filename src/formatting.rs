use std::path::PathBuf;
use std::process::ExitCode;

use dqs_lib::output::DQS_OUTPUT_VERSION;
use dqs_lib::{DqsError, DqsOutput, ErrorOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &DqsOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = render(body, format)?;
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

/// Render an error payload and return the fatal exit code.
pub fn render_error(err: DqsError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let payload = err.to_payload();
    let body = DqsOutput::Error(ErrorOutput {
        version: DQS_OUTPUT_VERSION.to_string(),
        message: Some(payload.message.clone()),
        error: payload,
    });

    let content =
        render(&body, format).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    match output {
        Some(path) => {
            if let Err(write_err) = std::fs::write(&path, &content) {
                eprintln!("Failed to write error output: {}", write_err);
                println!("{content}");
            }
        }
        None => println!("{content}"),
    }

    // Exit code 2 is reserved for fatal errors.
    ExitCode::from(2)
}

fn render(
    body: &DqsOutput,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(body)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(body)?,
    };
    Ok(content)
}
