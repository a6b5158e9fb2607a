use dome_kernel::DomeConfig;
use serde::Deserialize;
use tracing::debug;

use crate::errors::LoadError;
use crate::metadata::ProjectMetadata;
use crate::save::{FORMAT_NAME, FORMAT_VERSION};

/// The top-level file structure for deserialization. The summary is not
/// read back; it is recomputed from the configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DomeSnapshotRaw {
    pub format: String,
    pub version: u32,
    pub project: ProjectMetadata,
    pub config: DomeConfig,
}

/// Deserialize a snapshot from a JSON string.
///
/// Validates the format identifier, the version and the stored parameters.
/// Returns the configuration and project metadata.
pub fn load_snapshot(json: &str) -> Result<(DomeConfig, ProjectMetadata), LoadError> {
    let raw: DomeSnapshotRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_NAME {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    raw.config.validate()?;
    debug!(project = %raw.project.name, "snapshot loaded");
    Ok((raw.config, raw.project))
}
