//! Geodesic dome engine: builds the subdivided sphere, cuts it, and turns its
//! edges into a classified list of struts with cut angles and statistics.
//!
//! The engine is a pure function of [`DomeConfig`]:
//!
//! ```no_run
//! use dome_kernel::{build_dome, DomeConfig, Polyhedron};
//!
//! let config = DomeConfig::hemisphere(Polyhedron::Icosahedron, 3, 3.0);
//! let model = build_dome(&config).unwrap();
//! for ty in &model.types {
//!     println!("{} {:.3} m × {}", ty.label, ty.length, ty.count);
//! }
//! ```

pub mod angles;
pub mod config;
pub mod cut;
pub mod error;
pub mod geometry;
pub mod model;
pub mod solids;
pub mod spatial;
pub mod stats;
pub mod struts;
pub mod subdivision;

pub use angles::{AngleSource, CutAngles};
pub use config::{BeamSection, DomeConfig, Tolerances};
pub use error::DomeError;
pub use geometry::{Point3d, Vec3};
pub use model::{build_dome, DomeModel};
pub use solids::Polyhedron;
pub use stats::DomeStats;
pub use struts::{Rgb, Strut, StrutType, PALETTE};
