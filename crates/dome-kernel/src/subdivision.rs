//! Class-I ("V") subdivision of a base solid.
//!
//! Each base face `(A, B, C)` is covered by a barycentric grid with `v`
//! segments per edge, the grid points are pushed out onto the sphere, and
//! points shared by neighbouring faces are merged through [`NodeIndex`].
//!
//! ```text
//! v = 2        v = 3
//!   /\           /\
//!  /\/\         /\/\
//!              /\/\/\
//! ```

use tracing::{debug, instrument, warn};

use crate::error::DomeError;
use crate::geometry::Point3d;
use crate::solids::BaseSolid;
use crate::spatial::NodeIndex;

/// Grid of one subdivided face, before any merging with its neighbours.
#[derive(Debug, Clone)]
pub struct FaceGrid {
    pub frequency: u32,
    /// Row-major: row `i` holds `j = 0..=v-i`.
    pub points: Vec<Point3d>,
    /// Small triangles as indices into `points`, wound like the parent face.
    pub triangles: Vec<[usize; 3]>,
}

impl FaceGrid {
    /// Position of grid point `(i, j)` in `points`.
    pub fn index(&self, i: usize, j: usize) -> usize {
        grid_index(self.frequency as usize, i, j)
    }
}

/// Rows before `i` hold `(v+1) + v + ... + (v+2-i)` points.
fn grid_index(v: usize, i: usize, j: usize) -> usize {
    i * (v + 1) - i * i.saturating_sub(1) / 2 + j
}

pub fn grid_point_count(frequency: u32) -> usize {
    let v = frequency as usize;
    (v + 1) * (v + 2) / 2
}

/// Subdivide the triangle `abc` and project the grid onto the sphere of
/// `radius`: `point(i, j) = normalize(A·(v-i-j) + B·i + C·j) · radius`.
pub fn subdivide_face(
    a: &Point3d,
    b: &Point3d,
    c: &Point3d,
    frequency: u32,
    radius: f64,
) -> Result<FaceGrid, DomeError> {
    if frequency < 1 {
        return Err(DomeError::InvalidFrequency(frequency));
    }
    let v = frequency as usize;
    let (va, vb, vc) = (a.to_vec3(), b.to_vec3(), c.to_vec3());

    let mut points = Vec::with_capacity(grid_point_count(frequency));
    for i in 0..=v {
        for j in 0..=(v - i) {
            let weighted = va * (v - i - j) as f64 + vb * i as f64 + vc * j as f64;
            let p = Point3d::from_vec3(weighted)
                .projected_to_sphere(radius)
                .ok_or_else(|| {
                    DomeError::DegenerateGeometry(format!(
                        "grid point ({i}, {j}) coincides with the sphere center"
                    ))
                })?;
            points.push(p);
        }
    }

    let mut triangles = Vec::with_capacity(v * v);
    // Upright triangles: two corners on row i.
    for i in 0..v {
        for j in 0..(v - i) {
            triangles.push([
                grid_index(v, i, j),
                grid_index(v, i + 1, j),
                grid_index(v, i, j + 1),
            ]);
        }
    }
    // Inverted triangles: two corners on row i + 1.
    for i in 0..v.saturating_sub(1) {
        for j in 0..(v - 1 - i) {
            triangles.push([
                grid_index(v, i + 1, j),
                grid_index(v, i + 1, j + 1),
                grid_index(v, i, j + 1),
            ]);
        }
    }

    Ok(FaceGrid {
        frequency,
        points,
        triangles,
    })
}

/// Subdivided sphere with merged nodes.
#[derive(Debug, Clone)]
pub struct GeodesicSphere {
    pub nodes: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

/// Subdivide every face of `solid` and merge points closer than
/// `merge_distance` into shared nodes.
#[instrument(skip(solid), fields(base_faces = solid.faces.len()))]
pub fn subdivide(
    solid: &BaseSolid,
    frequency: u32,
    radius: f64,
    merge_distance: f64,
) -> Result<GeodesicSphere, DomeError> {
    if frequency < 1 {
        return Err(DomeError::InvalidFrequency(frequency));
    }

    let per_face = grid_point_count(frequency);
    let mut index = NodeIndex::with_capacity(merge_distance, solid.faces.len() * per_face / 2);
    let mut faces = Vec::with_capacity(solid.faces.len() * (frequency as usize).pow(2));
    let mut collapsed = 0usize;

    for face in &solid.faces {
        let [a, b, c] = face.map(|i| solid.vertices[i]);
        let grid = subdivide_face(&a, &b, &c, frequency, radius)?;
        let global: Vec<usize> = grid.points.iter().map(|p| index.insert(*p)).collect();

        for tri in &grid.triangles {
            let mapped = tri.map(|local| global[local]);
            if mapped[0] == mapped[1] || mapped[1] == mapped[2] || mapped[0] == mapped[2] {
                collapsed += 1;
                continue;
            }
            faces.push(mapped);
        }
    }

    if collapsed > 0 {
        warn!(collapsed, merge_distance, "triangles collapsed by node merging");
        return Err(DomeError::DegenerateGeometry(format!(
            "{collapsed} triangles collapsed by node merging; merge distance {merge_distance} is too large for {frequency}V"
        )));
    }

    let nodes = index.into_points();
    debug!(nodes = nodes.len(), faces = faces.len(), "subdivision complete");
    Ok(GeodesicSphere { nodes, faces })
}
