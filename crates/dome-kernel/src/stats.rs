//! Aggregate figures of a built dome.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::BeamSection;
use crate::geometry::{triangle_area, Point3d};
use crate::struts::Strut;

/// Summary statistics. Every field is zero for an empty dome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DomeStats {
    pub strut_count: usize,
    pub total_length: f64,
    pub node_count: usize,
    pub face_count: usize,
    /// `max y - min y` over the nodes.
    pub height: f64,
    /// Height the parameters ask for, `2·r·c`. Differs from `height` when
    /// the cut falls between node rings.
    pub nominal_height: f64,
    /// Mean distance from the vertical axis of the lowest ring of nodes.
    pub ground_radius: f64,
    pub ground_area: f64,
    /// Sum of the flat triangle areas of the retained faces.
    pub cover_area: f64,
    /// Timber volume: total strut length × beam section.
    pub beam_volume: f64,
}

/// Compute statistics. `ring_tolerance` decides which nodes count as the
/// lowest ring.
pub fn compute_stats(
    nodes: &[Point3d],
    faces: &[[usize; 3]],
    struts: &[Strut],
    beam: &BeamSection,
    ring_tolerance: f64,
    nominal_height: f64,
) -> DomeStats {
    if faces.is_empty() {
        return DomeStats::default();
    }

    let total_length: f64 = struts.iter().map(|s| s.length).sum();

    let (min_y, max_y) = nodes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });

    let ground: Vec<f64> = nodes
        .iter()
        .filter(|p| p.y - min_y <= ring_tolerance)
        .map(Point3d::planar_radius)
        .collect();
    let ground_radius = if ground.is_empty() {
        0.0
    } else {
        ground.iter().sum::<f64>() / ground.len() as f64
    };

    let cover_area = faces
        .iter()
        .map(|[a, b, c]| triangle_area(&nodes[*a], &nodes[*b], &nodes[*c]))
        .sum();

    DomeStats {
        strut_count: struts.len(),
        total_length,
        node_count: nodes.len(),
        face_count: faces.len(),
        height: max_y - min_y,
        nominal_height,
        ground_radius,
        ground_area: PI * ground_radius * ground_radius,
        cover_area,
        beam_volume: total_length * beam.area(),
    }
}
