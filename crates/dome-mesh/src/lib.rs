use std::fmt::Write as _;

use dome_kernel::angles::face_normal;
use dome_kernel::geometry::{Point3d, Vec3};
use dome_kernel::DomeModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for &idx in &other.indices {
            self.indices.push(idx + offset);
        }
    }
}

/// One flat-shaded triangle: its own three vertices, all carrying the face
/// normal.
pub fn tessellate_face(nodes: &[Point3d], face: &[usize; 3]) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let Some(normal) = face_normal(nodes, face) else {
        return mesh;
    };
    let [a, b, c] = face.map(|i| mesh.add_vertex(nodes[i], normal));
    mesh.add_triangle(a, b, c);
    mesh
}

/// Flat-shaded cover panels of the dome, one triangle per retained face.
pub fn cover_mesh(model: &DomeModel) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for face in &model.faces {
        mesh.merge(&tessellate_face(&model.nodes, face));
    }
    debug!(triangles = mesh.triangle_count(), "cover mesh built");
    mesh
}

/// Line segments with a per-vertex color, two vertices per strut.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineSet {
    /// Segment endpoints [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex colors [r, g, b, ...] in 0..=1
    pub colors: Vec<f32>,
}

impl LineSet {
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }

    pub fn add_segment(&mut self, a: Point3d, b: Point3d, color: [f32; 3]) {
        for p in [a, b] {
            self.positions.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            self.colors.extend_from_slice(&color);
        }
    }
}

/// Every strut as a segment colored by its type.
pub fn strut_lines(model: &DomeModel) -> LineSet {
    let mut lines = LineSet::default();
    for strut in &model.struts {
        let (a, b) = model.strut_endpoints(strut);
        let color = model.types[strut.type_index].color.to_f32();
        lines.add_segment(a, b, color);
    }
    lines
}

/// Wavefront OBJ text for a mesh: `v`, `vn`, then `f v//vn` lines.
pub fn mesh_to_obj(mesh: &TriangleMesh, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    let _ = writeln!(out, "o {name}");
    for p in mesh.positions.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    for t in mesh.indices.chunks_exact(3) {
        // OBJ indices are 1-based.
        let (a, b, c) = (t[0] + 1, t[1] + 1, t[2] + 1);
        let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dome_kernel::{build_dome, DomeConfig, Polyhedron};

    fn hemisphere() -> DomeModel {
        build_dome(&DomeConfig::hemisphere(Polyhedron::Icosahedron, 2, 1.0)).unwrap()
    }

    #[test]
    fn test_cover_mesh_counts() {
        let model = hemisphere();
        let mesh = cover_mesh(&model);
        assert_eq!(mesh.triangle_count(), 40);
        assert_eq!(mesh.vertex_count(), 120);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_cover_normals_point_outward() {
        let mesh = cover_mesh(&hemisphere());
        for (p, n) in mesh.positions.chunks_exact(3).zip(mesh.normals.chunks_exact(3)) {
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn test_strut_lines_colored_by_type() {
        let model = hemisphere();
        let lines = strut_lines(&model);
        assert_eq!(lines.segment_count(), 65);
        assert_eq!(lines.colors.len(), lines.positions.len());
        let a_color = model.types[0].color.to_f32();
        let first_a = model.struts.iter().position(|s| s.type_index == 0).unwrap();
        assert_eq!(&lines.colors[first_a * 6..first_a * 6 + 3], &a_color);
    }

    #[test]
    fn test_obj_output() {
        let mesh = cover_mesh(&hemisphere());
        let obj = mesh_to_obj(&mesh, "dome");
        assert!(obj.contains("o dome"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 120);
        assert_eq!(obj.lines().filter(|l| l.starts_with("vn ")).count(), 120);
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 40);
        assert!(obj.contains("f 1//1 2//2 3//3"));
    }

    #[test]
    fn test_empty_model_gives_empty_buffers() {
        let model = build_dome(&DomeConfig::new(Polyhedron::Icosahedron, 1, 0.05, 1.0)).unwrap();
        assert_eq!(cover_mesh(&model).triangle_count(), 0);
        assert_eq!(strut_lines(&model).segment_count(), 0);
    }
}
