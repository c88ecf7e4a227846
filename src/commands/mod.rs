mod batch;
mod score;
mod showcase;

pub use batch::run_batch_command;
pub use score::run_score;
pub use showcase::run_showcase;

use std::path::Path;

use dqs_lib::{BatchManifest, DqsError, PopulationAggregate};

/// Load the batch manifest JSON.
pub(crate) fn load_manifest(path: &Path) -> Result<BatchManifest, DqsError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DqsError::Config(format!("Failed to read manifest {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| DqsError::Config(format!("Invalid manifest ({}): {}", path.display(), e)))
}

/// Load an optional pre-aggregated population summary.
pub(crate) fn load_aggregate(
    path: Option<&Path>,
) -> Result<Option<PopulationAggregate>, DqsError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DqsError::Config(format!("Failed to read aggregate {}: {}", path.display(), e))
    })?;
    let aggregate = serde_json::from_str(&raw)
        .map_err(|e| DqsError::Config(format!("Invalid aggregate ({}): {}", path.display(), e)))?;
    Ok(Some(aggregate))
}
