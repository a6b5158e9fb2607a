//! Base polyhedra inscribed in a sphere.
//!
//! Both solids are built pole-up: one vertex at `(0, r, 0)`, one at
//! `(0, -r, 0)`. With that orientation every even frequency puts a ring of
//! nodes exactly on the equator, which is what a hemisphere cut relies on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::DomeError;
use crate::geometry::Point3d;

/// The base solids a dome can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polyhedron {
    Icosahedron,
    Octahedron,
}

impl Polyhedron {
    pub const ALL: [Polyhedron; 2] = [Polyhedron::Icosahedron, Polyhedron::Octahedron];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Icosahedron => "icosahedron",
            Self::Octahedron => "octahedron",
        }
    }

    /// Edge length of the solid inscribed in the unit sphere.
    pub fn unit_edge_length(&self) -> f64 {
        match self {
            Self::Icosahedron => 4.0 / (10.0 + 2.0 * 5f64.sqrt()).sqrt(),
            Self::Octahedron => std::f64::consts::SQRT_2,
        }
    }

    fn unit_solid(&self) -> BaseSolid {
        match self {
            Self::Icosahedron => unit_icosahedron(),
            Self::Octahedron => unit_octahedron(),
        }
    }

    /// The solid inscribed in a sphere of `radius`.
    #[instrument]
    pub fn base_solid(&self, radius: f64) -> Result<BaseSolid, DomeError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(DomeError::InvalidParameter {
                parameter: "radius",
                expected: "positive and finite",
                value: radius,
            });
        }
        let unit = self.unit_solid();
        let solid = unit.scaled_to(radius)?;
        debug!(
            vertices = solid.vertices.len(),
            faces = solid.faces.len(),
            "base solid generated"
        );
        Ok(solid)
    }
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Polyhedron {
    type Err = DomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icosahedron" | "ico" | "icosa" => Ok(Self::Icosahedron),
            "octahedron" | "oct" | "octa" => Ok(Self::Octahedron),
            other => Err(DomeError::UnknownPolyhedron(other.to_string())),
        }
    }
}

/// Vertices on a sphere plus triangular faces wound counter-clockwise from
/// outside.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSolid {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

impl BaseSolid {
    fn new(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        let faces = faces
            .into_iter()
            .map(|face| orient_outward(&vertices, face))
            .collect();
        Self { vertices, faces }
    }

    fn scaled_to(&self, radius: f64) -> Result<Self, DomeError> {
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                v.projected_to_sphere(radius).ok_or_else(|| {
                    DomeError::DegenerateGeometry("base vertex at the origin".into())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            vertices,
            faces: self.faces.clone(),
        })
    }

    pub fn edge_count(&self) -> usize {
        // Closed triangulated surface: every edge is shared by two faces.
        self.faces.len() * 3 / 2
    }
}

/// Swap two corners if needed so `(b-a)×(c-a)` points away from the origin.
pub fn orient_outward(points: &[Point3d], face: [usize; 3]) -> [usize; 3] {
    let [a, b, c] = face;
    let normal = (points[b] - points[a]).cross(&(points[c] - points[a]));
    let centroid = points[a].to_vec3() + points[b].to_vec3() + points[c].to_vec3();
    if normal.dot(&centroid) < 0.0 {
        [a, c, b]
    } else {
        face
    }
}

fn unit_icosahedron() -> BaseSolid {
    // Rings sit at latitude ±atan(1/2): height 1/√5, ring radius 2/√5.
    let h = 1.0 / 5f64.sqrt();
    let ring = 2.0 * h;
    let step = std::f64::consts::TAU / 5.0;

    let mut vertices = Vec::with_capacity(12);
    vertices.push(Point3d::new(0.0, 1.0, 0.0));
    for k in 0..5 {
        let theta = step * k as f64;
        vertices.push(Point3d::new(ring * theta.cos(), h, ring * theta.sin()));
    }
    for k in 0..5 {
        let theta = step * k as f64 + step / 2.0;
        vertices.push(Point3d::new(ring * theta.cos(), -h, ring * theta.sin()));
    }
    vertices.push(Point3d::new(0.0, -1.0, 0.0));

    let top = 0;
    let upper = |k: usize| 1 + k % 5;
    let lower = |k: usize| 6 + k % 5;
    let bottom = 11;

    let mut faces = Vec::with_capacity(20);
    for k in 0..5 {
        faces.push([top, upper(k + 1), upper(k)]);
        faces.push([upper(k), upper(k + 1), lower(k)]);
        faces.push([lower(k), upper(k + 1), lower(k + 1)]);
        faces.push([bottom, lower(k), lower(k + 1)]);
    }

    BaseSolid::new(vertices, faces)
}

fn unit_octahedron() -> BaseSolid {
    let vertices = vec![
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(0.0, 0.0, 1.0),
        Point3d::new(-1.0, 0.0, 0.0),
        Point3d::new(0.0, 0.0, -1.0),
        Point3d::new(0.0, -1.0, 0.0),
    ];
    let mut faces = Vec::with_capacity(8);
    for k in 0..4 {
        let a = 1 + k;
        let b = 1 + (k + 1) % 4;
        faces.push([0, b, a]);
        faces.push([5, a, b]);
    }
    BaseSolid::new(vertices, faces)
}
