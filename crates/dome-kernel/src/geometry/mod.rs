pub mod point;
pub mod vector;

pub use point::{triangle_area, Point3d};
pub use vector::Vec3;
