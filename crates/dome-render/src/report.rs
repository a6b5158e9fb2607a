use std::fmt::Write as _;

use dome_kernel::{AngleSource, DomeModel};

/// Plain-text summary: parameters, statistics and the strut table.
pub fn format_report(model: &DomeModel) -> String {
    let c = &model.config;
    let s = &model.stats;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Geodesic dome: {} {}V, cut {:.2}, radius {:.3} m, beam {}x{} mm",
        c.polyhedron, c.frequency, c.cut_fraction, c.radius, c.beam.width, c.beam.thickness
    );
    if model.is_empty() {
        out.push_str("The cut leaves no complete face; nothing to build.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  nodes {}  faces {}  struts {}  types {}",
        s.node_count,
        s.face_count,
        s.strut_count,
        model.types.len()
    );
    let _ = writeln!(
        out,
        "  height {:.3} m (nominal {:.3} m)  ground radius {:.3} m  ground area {:.2} m2",
        s.height, s.nominal_height, s.ground_radius, s.ground_area
    );
    let _ = writeln!(
        out,
        "  cover area {:.2} m2  total strut length {:.2} m  timber {:.3} m3",
        s.cover_area, s.total_length, s.beam_volume
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<5} {:>11} {:>5} {:>8} {:>8}  {:<8}",
        "Type", "Length (mm)", "Qty", "Bevel", "Miter", "Color"
    );
    for ty in &model.types {
        let rim = if ty.angles.source == AngleSource::Rim { " rim" } else { "" };
        let _ = writeln!(
            out,
            "{:<5} {:>11.1} {:>5} {:>7.2}\u{b0} {:>7.2}\u{b0}  {}{}",
            ty.label,
            ty.length * 1000.0,
            ty.count,
            ty.angles.bevel,
            ty.angles.miter,
            ty.color.hex(),
            rim
        );
    }
    out
}
