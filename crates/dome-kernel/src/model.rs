//! The dome pipeline: base solid → subdivision → cut → struts → types →
//! angles → statistics.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::angles::assign_angles;
use crate::config::DomeConfig;
use crate::cut::{cut, CutPlane};
use crate::error::DomeError;
use crate::geometry::Point3d;
use crate::stats::{compute_stats, DomeStats};
use crate::struts::{classify, extract_struts, Strut, StrutType};
use crate::subdivision::subdivide;

/// Everything derived from one [`DomeConfig`]. Rebuilt from scratch whenever
/// the configuration changes; never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomeModel {
    pub config: DomeConfig,
    pub nodes: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
    pub struts: Vec<Strut>,
    /// Longest first; `struts[i].type_index` indexes this list.
    pub types: Vec<StrutType>,
    pub stats: DomeStats,
}

impl DomeModel {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// `V - E + F`: 2 for a closed sphere, 1 for a dome with one rim.
    pub fn euler_characteristic(&self) -> i64 {
        self.nodes.len() as i64 - self.struts.len() as i64 + self.faces.len() as i64
    }

    /// Struts with a single adjacent face, i.e. those along the cut.
    pub fn boundary_edge_count(&self) -> usize {
        self.struts.iter().filter(|s| !s.is_interior()).count()
    }

    pub fn strut_type(&self, label: &str) -> Option<&StrutType> {
        self.types.iter().find(|t| t.label == label)
    }

    /// Endpoints of a strut.
    pub fn strut_endpoints(&self, strut: &Strut) -> (Point3d, Point3d) {
        (self.nodes[strut.nodes.0], self.nodes[strut.nodes.1])
    }
}

/// Build a dome from `config`. The configuration is validated first; a cut
/// that leaves no faces gives an empty model rather than an error.
#[instrument(skip(config), fields(
    polyhedron = %config.polyhedron,
    frequency = config.frequency,
    cut_fraction = config.cut_fraction,
    radius = config.radius,
))]
pub fn build_dome(config: &DomeConfig) -> Result<DomeModel, DomeError> {
    config.validate()?;

    let radius = config.radius;
    let tol = &config.tolerance;

    let solid = config.polyhedron.base_solid(radius)?;
    let sphere = subdivide(
        &solid,
        config.frequency,
        radius,
        tol.node_merge_distance(radius),
    )?;

    let slack = tol.cut_distance(radius, config.frequency);
    let plane = CutPlane::from_fraction(radius, config.cut_fraction, slack);
    let kept = cut(&sphere.nodes, &sphere.faces, &plane);

    let mut struts = extract_struts(&kept.nodes, &kept.faces);
    let mut types = classify(&mut struts, tol.length_distance(radius));
    assign_angles(&kept.nodes, &kept.faces, &struts, &mut types);

    let stats = compute_stats(
        &kept.nodes,
        &kept.faces,
        &struts,
        &config.beam,
        slack,
        config.nominal_height(),
    );

    info!(
        nodes = stats.node_count,
        faces = stats.face_count,
        struts = stats.strut_count,
        types = types.len(),
        "dome built"
    );

    Ok(DomeModel {
        config: config.clone(),
        nodes: kept.nodes,
        faces: kept.faces,
        struts,
        types,
        stats,
    })
}
