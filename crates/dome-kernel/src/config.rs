//! Dome parameters and tolerance settings.
//!
//! Every field has a default so partial configuration files deserialize.
//! Lengths are in model units (meters by convention); the beam section is in
//! millimeters, the unit of the cutting list.

use serde::{Deserialize, Serialize};

use crate::error::DomeError;
use crate::solids::Polyhedron;

/// Tolerances, each expressed as a fraction of the dome radius so the same
/// settings behave identically at any scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Grid points closer than this merge into one node.
    pub node_merge: f64,
    /// Struts whose lengths differ by less than this share a type.
    pub length: f64,
    /// Slack below the cut plane so boundary nodes are kept reliably.
    pub cut: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            node_merge: 1e-4,
            length: 1e-5,
            cut: 0.01,
        }
    }
}

impl Tolerances {
    pub fn node_merge_distance(&self, radius: f64) -> f64 {
        self.node_merge * radius
    }

    pub fn length_distance(&self, radius: f64) -> f64 {
        self.length * radius
    }

    /// Slack below the cut plane, capped at a fraction of the spacing
    /// between node rings at `frequency` so it never reaches the next ring.
    pub fn cut_distance(&self, radius: f64, frequency: u32) -> f64 {
        let ring_gap = CUT_RING_FRACTION * radius / f64::from(frequency.max(1));
        (self.cut * radius).min(ring_gap)
    }
}

/// Largest cut slack as a fraction of `r / frequency`. Node rings near the
/// equator are at least `0.89·r / frequency` apart on either base solid.
const CUT_RING_FRACTION: f64 = 0.25;

/// Largest node merge distance as a fraction of the sub-edge length
/// `edge / frequency`. The shortest strut of a subdivided face is above
/// `0.5·edge / frequency`.
const MERGE_EDGE_FRACTION: f64 = 0.25;

/// Rectangular cross-section of the timber used for every strut (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamSection {
    pub width: f64,
    pub thickness: f64,
}

impl Default for BeamSection {
    fn default() -> Self {
        Self {
            width: 45.0,
            thickness: 90.0,
        }
    }
}

impl BeamSection {
    /// Cross-section area in square model units (mm converted to m).
    pub fn area(&self) -> f64 {
        (self.width / 1000.0) * (self.thickness / 1000.0)
    }
}

/// Full input of the dome pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomeConfig {
    pub polyhedron: Polyhedron,
    /// Number of segments each base edge is split into.
    pub frequency: u32,
    /// Fraction of the sphere's height kept; 0.5 is a hemisphere.
    pub cut_fraction: f64,
    pub radius: f64,
    pub beam: BeamSection,
    pub tolerance: Tolerances,
}

impl Default for DomeConfig {
    fn default() -> Self {
        Self {
            polyhedron: Polyhedron::Icosahedron,
            frequency: 3,
            cut_fraction: 0.5,
            radius: 3.0,
            beam: BeamSection::default(),
            tolerance: Tolerances::default(),
        }
    }
}

impl DomeConfig {
    pub fn new(polyhedron: Polyhedron, frequency: u32, cut_fraction: f64, radius: f64) -> Self {
        Self {
            polyhedron,
            frequency,
            cut_fraction,
            radius,
            ..Self::default()
        }
    }

    /// Full sphere, no cut.
    pub fn sphere(polyhedron: Polyhedron, frequency: u32, radius: f64) -> Self {
        Self::new(polyhedron, frequency, 1.0, radius)
    }

    /// Half sphere cut at the equator.
    pub fn hemisphere(polyhedron: Polyhedron, frequency: u32, radius: f64) -> Self {
        Self::new(polyhedron, frequency, 0.5, radius)
    }

    /// Height of the cut plane: `-r` keeps everything, `0` is the equator.
    pub fn cut_height(&self) -> f64 {
        -self.radius * (2.0 * self.cut_fraction - 1.0)
    }

    /// Design height the parameters ask for, `2·r·c`.
    pub fn nominal_height(&self) -> f64 {
        2.0 * self.radius * self.cut_fraction
    }

    /// Reject out-of-range parameters before any geometry is built.
    pub fn validate(&self) -> Result<(), DomeError> {
        if self.frequency < 1 {
            return Err(DomeError::InvalidFrequency(self.frequency));
        }
        // Negated comparisons so NaN is rejected too.
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(invalid("radius", "positive and finite", self.radius));
        }
        if !(self.cut_fraction > 0.0 && self.cut_fraction <= 1.0) {
            return Err(invalid("cut_fraction", "in (0, 1]", self.cut_fraction));
        }
        if !(self.beam.width > 0.0) || !self.beam.width.is_finite() {
            return Err(invalid("beam.width", "positive and finite", self.beam.width));
        }
        if !(self.beam.thickness > 0.0) || !self.beam.thickness.is_finite() {
            return Err(invalid("beam.thickness", "positive and finite", self.beam.thickness));
        }
        let tol = &self.tolerance;
        if !(tol.node_merge > 0.0) || !tol.node_merge.is_finite() {
            return Err(invalid("tolerance.node_merge", "positive and finite", tol.node_merge));
        }
        if tol.node_merge >= self.max_node_merge() {
            return Err(invalid(
                "tolerance.node_merge",
                "below a quarter of the sub-edge length at this frequency",
                tol.node_merge,
            ));
        }
        if !(tol.length > 0.0) || !tol.length.is_finite() {
            return Err(invalid("tolerance.length", "positive and finite", tol.length));
        }
        if !(tol.cut >= 0.0) || !tol.cut.is_finite() {
            return Err(invalid("tolerance.cut", "zero or positive and finite", tol.cut));
        }
        Ok(())
    }

    /// Upper bound (exclusive, relative to the radius) for
    /// `tolerance.node_merge`: a quarter of the sub-edge length at this
    /// frequency.
    pub fn max_node_merge(&self) -> f64 {
        MERGE_EDGE_FRACTION * self.polyhedron.unit_edge_length() / f64::from(self.frequency.max(1))
    }
}

fn invalid(parameter: &'static str, expected: &'static str, value: f64) -> DomeError {
    DomeError::InvalidParameter {
        parameter,
        expected,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DomeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let config = DomeConfig {
            frequency: 0,
            ..DomeConfig::default()
        };
        assert_eq!(config.validate(), Err(DomeError::InvalidFrequency(0)));
    }

    #[test]
    fn test_bad_radius_rejected() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = DomeConfig {
                radius,
                ..DomeConfig::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(DomeError::InvalidParameter { parameter: "radius", .. })
                ),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn test_cut_fraction_bounds() {
        for cut in [0.0, -0.2, 1.0001, f64::NAN] {
            let config = DomeConfig {
                cut_fraction: cut,
                ..DomeConfig::default()
            };
            assert!(config.validate().is_err(), "cut {cut} should be rejected");
        }
        let full = DomeConfig {
            cut_fraction: 1.0,
            ..DomeConfig::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_beam_dimensions_checked() {
        let config = DomeConfig {
            beam: BeamSection {
                width: 0.0,
                thickness: 90.0,
            },
            ..DomeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DomeError::InvalidParameter { parameter: "beam.width", .. })
        ));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let mut config = DomeConfig::default();
        config.beam.width = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(DomeError::InvalidParameter { parameter: "beam.width", .. })
        ));

        let mut config = DomeConfig::default();
        config.beam.thickness = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(DomeError::InvalidParameter { parameter: "beam.thickness", .. })
        ));

        let mut config = DomeConfig::default();
        config.tolerance.length = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(DomeError::InvalidParameter { parameter: "tolerance.length", .. })
        ));

        let mut config = DomeConfig::default();
        config.tolerance.cut = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(DomeError::InvalidParameter { parameter: "tolerance.cut", .. })
        ));
    }

    #[test]
    fn test_node_merge_limited_by_grid_spacing() {
        for node_merge in [0.35, f64::INFINITY, f64::NAN] {
            let mut config = DomeConfig::sphere(Polyhedron::Icosahedron, 4, 1.0);
            config.tolerance.node_merge = node_merge;
            assert!(
                matches!(
                    config.validate(),
                    Err(DomeError::InvalidParameter { parameter: "tolerance.node_merge", .. })
                ),
                "node_merge {node_merge} should be rejected"
            );
        }

        // Sub-edges of an icosahedron at 4V are about 0.26 r long.
        let mut config = DomeConfig::sphere(Polyhedron::Icosahedron, 4, 1.0);
        config.tolerance.node_merge = 0.05;
        assert!(config.validate().is_ok());
        config.frequency = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cut_slack_shrinks_with_frequency() {
        let tol = Tolerances::default();
        assert!((tol.cut_distance(2.0, 2) - 0.02).abs() < 1e-12);
        assert!((tol.cut_distance(2.0, 25) - 0.02).abs() < 1e-12);
        assert!((tol.cut_distance(2.0, 100) - 0.005).abs() < 1e-12);
        assert!((tol.cut_distance(1.0, 120) - 0.25 / 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_cut_height() {
        let half = DomeConfig::hemisphere(Polyhedron::Icosahedron, 2, 2.0);
        assert!(half.cut_height().abs() < 1e-12);
        let full = DomeConfig::sphere(Polyhedron::Icosahedron, 2, 2.0);
        assert!((full.cut_height() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DomeConfig = toml::from_str("frequency = 4\nradius = 2.5\n").unwrap();
        assert_eq!(config.frequency, 4);
        assert!((config.radius - 2.5).abs() < 1e-12);
        assert_eq!(config.polyhedron, Polyhedron::Icosahedron);
        assert_eq!(config.beam, BeamSection::default());
    }

    #[test]
    fn test_beam_area_in_square_meters() {
        let beam = BeamSection {
            width: 100.0,
            thickness: 50.0,
        };
        assert!((beam.area() - 0.005).abs() < 1e-12);
    }
}
