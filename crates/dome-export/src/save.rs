use dome_kernel::{AngleSource, DomeConfig, DomeModel, DomeStats};
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::metadata::ProjectMetadata;

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// Format identifier written into every snapshot.
pub const FORMAT_NAME: &str = "geodome";

/// The top-level file structure.
#[derive(Debug, Clone, Serialize)]
pub struct DomeSnapshot {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Project metadata.
    pub project: ProjectMetadata,
    /// The parameters; the dome is rebuilt from these on load.
    pub config: DomeConfig,
    /// Computed figures, for readers that do not run the engine.
    pub summary: SnapshotSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub stats: DomeStats,
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub label: String,
    /// `#rrggbb`
    pub color: String,
    pub length: f64,
    pub count: usize,
    pub bevel: f64,
    pub miter: f64,
    pub angle_source: AngleSource,
}

impl SnapshotSummary {
    pub fn from_model(model: &DomeModel) -> Self {
        Self {
            stats: model.stats,
            types: model
                .types
                .iter()
                .map(|ty| TypeSummary {
                    label: ty.label.clone(),
                    color: ty.color.hex(),
                    length: ty.length,
                    count: ty.count,
                    bevel: ty.angles.bevel,
                    miter: ty.angles.miter,
                    angle_source: ty.angles.source,
                })
                .collect(),
        }
    }
}

/// Serialize a dome to a pretty-printed JSON string. The project's
/// modification time is set to now.
pub fn save_snapshot(model: &DomeModel, metadata: &ProjectMetadata) -> Result<String, ExportError> {
    let file = DomeSnapshot {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION,
        project: metadata.touched(),
        config: model.config.clone(),
        summary: SnapshotSummary::from_model(model),
    };
    serde_json::to_string_pretty(&file).map_err(|e| ExportError::Serialization(e.to_string()))
}
