use serde::{Deserialize, Serialize};
use std::ops::Sub;

use super::vector::Vec3;

/// A point in 3D Euclidean space. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }

    /// Distance from the origin.
    pub fn norm(&self) -> f64 {
        self.to_vec3().length()
    }

    /// Distance from the vertical (y) axis, i.e. the radius in the ground plane.
    pub fn planar_radius(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Central projection onto the sphere of `radius` around the origin.
    ///
    /// Returns `None` for the origin itself, which has no direction.
    pub fn projected_to_sphere(&self, radius: f64) -> Option<Self> {
        self.to_vec3()
            .normalized()
            .map(|dir| Self::from_vec3(dir * radius))
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Area of the triangle `abc` by Heron's formula.
pub fn triangle_area(a: &Point3d, b: &Point3d, c: &Point3d) -> f64 {
    let la = b.distance_to(c);
    let lb = a.distance_to(c);
    let lc = a.distance_to(b);
    let s = (la + lb + lc) * 0.5;
    // Rounding can push a sliver triangle slightly negative.
    (s * (s - la) * (s - lb) * (s - lc)).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point3d::new(1.0, 0.0, 0.0);
        let b = Point3d::new(4.0, 0.0, 0.0);
        assert!((a.distance_to(&b) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_midpoint() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(2.0, 4.0, 6.0);
        let m = a.midpoint(&b);
        assert!((m.x - 1.0).abs() < 1e-12);
        assert!((m.y - 2.0).abs() < 1e-12);
        assert!((m.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_sub_gives_vector() {
        let a = Point3d::new(3.0, 4.0, 5.0);
        let b = Point3d::new(1.0, 1.0, 1.0);
        let v = a - b;
        assert!((v.x - 2.0).abs() < 1e-12);
        assert!((v.y - 3.0).abs() < 1e-12);
        assert!((v.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_projection_lands_on_sphere() {
        let p = Point3d::new(1.0, 2.0, -2.0);
        let q = p.projected_to_sphere(6.0).unwrap();
        assert!((q.norm() - 6.0).abs() < 1e-12);
        // Direction is preserved.
        assert!((q.x - 2.0).abs() < 1e-12);
        assert!((q.y - 4.0).abs() < 1e-12);
        assert!((q.z + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_projection_of_origin_is_none() {
        assert!(Point3d::ORIGIN.projected_to_sphere(1.0).is_none());
    }

    #[test]
    fn test_planar_radius_ignores_height() {
        let p = Point3d::new(3.0, 100.0, 4.0);
        assert!((p.planar_radius() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_heron_right_triangle() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(3.0, 0.0, 0.0);
        let c = Point3d::new(0.0, 4.0, 0.0);
        assert!((triangle_area(&a, &b, &c) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_heron_degenerate_is_zero() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(1.0, 0.0, 0.0);
        let c = Point3d::new(2.0, 0.0, 0.0);
        assert!(triangle_area(&a, &b, &c).abs() < 1e-9);
    }
}
