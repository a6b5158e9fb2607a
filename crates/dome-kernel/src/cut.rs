//! Horizontal cut of the subdivided sphere.
//!
//! This is an inclusion rule, not a clip: a face survives only if all three
//! of its nodes lie on or above the cut plane (less a small tolerance). The
//! dome therefore ends on the nearest whole ring of faces and no new geometry
//! is created along the cut.

use tracing::{debug, instrument, warn};

use crate::geometry::Point3d;

/// The plane `y = height`, with `tolerance` of slack below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    pub height: f64,
    pub tolerance: f64,
}

impl CutPlane {
    /// Plane for `cut_fraction` of a sphere of `radius`: `-r·(2c - 1)`.
    pub fn from_fraction(radius: f64, cut_fraction: f64, tolerance: f64) -> Self {
        Self {
            height: -radius * (2.0 * cut_fraction - 1.0),
            tolerance,
        }
    }

    pub fn keeps(&self, p: &Point3d) -> bool {
        p.y >= self.height - self.tolerance
    }
}

/// Faces and nodes left after the cut. Node indices are compacted so that
/// only nodes used by a retained face remain, in input order.
#[derive(Debug, Clone, Default)]
pub struct CutResult {
    pub nodes: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

/// Faces whose three nodes are all kept by `plane`.
pub fn retain_faces(nodes: &[Point3d], faces: &[[usize; 3]], plane: &CutPlane) -> Vec<[usize; 3]> {
    faces
        .iter()
        .filter(|face| face.iter().all(|&i| plane.keeps(&nodes[i])))
        .copied()
        .collect()
}

/// Apply the cut and drop the nodes no retained face references.
#[instrument(skip(nodes, faces), fields(nodes = nodes.len(), faces = faces.len()))]
pub fn cut(nodes: &[Point3d], faces: &[[usize; 3]], plane: &CutPlane) -> CutResult {
    let kept = retain_faces(nodes, faces, plane);
    if kept.is_empty() {
        warn!(height = plane.height, "cut removed every face; dome is empty");
        return CutResult::default();
    }

    let mut used = vec![false; nodes.len()];
    for face in &kept {
        for &i in face {
            used[i] = true;
        }
    }

    let mut remap = vec![usize::MAX; nodes.len()];
    let mut compact = Vec::new();
    for (old, p) in nodes.iter().enumerate() {
        if used[old] {
            remap[old] = compact.len();
            compact.push(*p);
        }
    }

    let faces: Vec<[usize; 3]> = kept.iter().map(|f| f.map(|i| remap[i])).collect();
    debug!(
        kept_faces = faces.len(),
        kept_nodes = compact.len(),
        "cut applied"
    );
    CutResult {
        nodes: compact,
        faces,
    }
}
