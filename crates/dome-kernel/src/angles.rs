//! Cut angles for each strut type.
//!
//! Bevel: half the dihedral angle between the two faces meeting at a strut.
//! Miter: `90° - α`, where `α` is the angle at the strut's first endpoint
//! between the strut and the third corner of its first face.
//!
//! These are the usual hub-less approximations; they ignore the beam's
//! cross-section orientation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point3d, Vec3};
use crate::struts::{Strut, StrutType};

/// Where a type's angles came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleSource {
    /// Measured on a strut with two adjacent faces.
    Interior,
    /// Every member lies on the cut boundary; bevel is reported as 0°.
    #[default]
    Rim,
}

/// Angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CutAngles {
    pub bevel: f64,
    pub miter: f64,
    pub source: AngleSource,
}

/// Outward unit normal of a face wound counter-clockwise from outside.
pub fn face_normal(nodes: &[Point3d], face: &[usize; 3]) -> Option<Vec3> {
    let [a, b, c] = face.map(|i| nodes[i]);
    (b - a).cross(&(c - a)).normalized()
}

/// Angles measured on one strut.
pub fn strut_angles(nodes: &[Point3d], faces: &[[usize; 3]], strut: &Strut) -> CutAngles {
    let first = &faces[strut.faces.0];
    let miter = miter_angle(nodes, first, strut.nodes);

    let dihedral = strut.faces.1.and_then(|second| {
        let n1 = face_normal(nodes, first)?;
        let n2 = face_normal(nodes, &faces[second])?;
        Some(n1.angle_to(&n2))
    });

    match dihedral {
        Some(theta) => CutAngles {
            bevel: (theta / 2.0).to_degrees(),
            miter,
            source: AngleSource::Interior,
        },
        None => CutAngles {
            bevel: 0.0,
            miter,
            source: AngleSource::Rim,
        },
    }
}

fn miter_angle(nodes: &[Point3d], face: &[usize; 3], (a, b): (usize, usize)) -> f64 {
    let Some(&third) = face.iter().find(|&&i| i != a && i != b) else {
        return 0.0;
    };
    let along = nodes[b] - nodes[a];
    let across = nodes[third] - nodes[a];
    90.0 - along.angle_to(&across).to_degrees()
}

/// Fill in `angles` for every type from its first interior member, or its
/// first member when it has none.
pub fn assign_angles(
    nodes: &[Point3d],
    faces: &[[usize; 3]],
    struts: &[Strut],
    types: &mut [StrutType],
) {
    for ty in types.iter_mut() {
        let representative = ty
            .members
            .iter()
            .map(|&m| &struts[m])
            .find(|s| s.is_interior())
            .or_else(|| ty.members.first().map(|&m| &struts[m]));

        if let Some(strut) = representative {
            ty.angles = strut_angles(nodes, faces, strut);
        }
        debug!(
            label = %ty.label,
            bevel = ty.angles.bevel,
            miter = ty.angles.miter,
            source = ?ty.angles.source,
            "type angles"
        );
    }
}
