//! SVG wireframe of a dome: shaded cover panels with struts drawn on top in
//! their type colors, plus a legend.

use std::fmt::Write as _;

use dome_kernel::DomeModel;
use dome_mesh::cover_mesh;

/// Simple isometric projection, y up: 3D -> 2D screen coordinates plus a
/// depth that grows towards the viewer.
pub fn project(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let turn: f64 = 0.6;
    let tilt: f64 = 0.45;
    let rx = x * turn.cos() - z * turn.sin();
    let rz = x * turn.sin() + z * turn.cos();
    let up = y * tilt.cos() - rz * tilt.sin();
    let depth = y * tilt.sin() + rz * tilt.cos();
    (rx, -up, depth)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn dome_to_svg(model: &DomeModel, width: f64, height: f64, title: &str) -> String {
    let title = escape(title);
    if model.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title} (empty)</text>\
             </svg>\n"
        );
    }

    let projected: Vec<(f64, f64, f64)> = model
        .nodes
        .iter()
        .map(|p| project(p.x, p.y, p.z))
        .collect();

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for &(px, py, _) in &projected {
        min_x = min_x.min(px);
        max_x = max_x.max(px);
        min_y = min_y.min(py);
        max_y = max_y.max(py);
    }

    let legend_w = 170.0;
    let padding = 30.0;
    let avail_w = width - 2.0 * padding - legend_w;
    let avail_h = height - 2.0 * padding - 25.0;
    let data_w = (max_x - min_x).max(0.001);
    let data_h = (max_y - min_y).max(0.001);
    let scale = (avail_w / data_w).min(avail_h / data_h);
    let offset_x = padding + (avail_w - data_w * scale) / 2.0;
    let offset_y = padding + 25.0 + (avail_h - data_h * scale) / 2.0;

    let tx = |px: f64| -> f64 { (px - min_x) * scale + offset_x };
    let ty = |py: f64| -> f64 { (py - min_y) * scale + offset_y };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        (width - legend_w) / 2.0
    );

    // Cover panels, far to near, lit by their normal.
    let mesh = cover_mesh(model);
    let vertex = |i: u32| {
        let k = i as usize * 3;
        let p = &mesh.positions[k..k + 3];
        let n = &mesh.normals[k..k + 3];
        (project(p[0] as f64, p[1] as f64, p[2] as f64), [n[0] as f64, n[1] as f64, n[2] as f64])
    };
    let light = (0.3_f64, 0.8_f64, 0.5_f64);
    let light_len = (light.0 * light.0 + light.1 * light.1 + light.2 * light.2).sqrt();
    let mut panels: Vec<(f64, [(f64, f64); 3], f64)> = mesh
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let corners = [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])];
            let depth = corners.iter().map(|((_, _, d), _)| d).sum::<f64>() / 3.0;
            let n = corners[0].1;
            let dot = (n[0] * light.0 + n[1] * light.1 + n[2] * light.2) / light_len;
            let screen = corners.map(|((x, y, _), _)| (tx(x), ty(y)));
            (depth, screen, 0.25 + 0.5 * dot.abs().min(1.0))
        })
        .collect();
    panels.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, [(x0, y0), (x1, y1), (x2, y2)], brightness) in &panels {
        let shade = (90.0 * brightness) as u8;
        let _ = writeln!(
            svg,
            "  <polygon points=\"{x0:.1},{y0:.1} {x1:.1},{y1:.1} {x2:.1},{y2:.1}\" \
             fill=\"rgb({shade},{shade},{})\" fill-opacity=\"0.55\" stroke=\"none\"/>",
            shade.saturating_add(30)
        );
    }

    // Struts, far to near so the front of the dome stays readable.
    let mut order: Vec<usize> = (0..model.struts.len()).collect();
    let strut_depth = |s: usize| {
        let (a, b) = model.struts[s].nodes;
        projected[a].2 + projected[b].2
    };
    order.sort_by(|&a, &b| strut_depth(a).total_cmp(&strut_depth(b)));
    let stroke_width = if model.struts.len() > 300 { 1.0 } else { 1.8 };

    for s in order {
        let (a, b) = model.struts[s].nodes;
        let color = model.types[model.struts[s].type_index].color.hex();
        let (x0, y0) = (tx(projected[a].0), ty(projected[a].1));
        let (x1, y1) = (tx(projected[b].0), ty(projected[b].1));
        let _ = writeln!(
            svg,
            "  <line x1=\"{x0:.1}\" y1=\"{y0:.1}\" x2=\"{x1:.1}\" y2=\"{y1:.1}\" \
             stroke=\"{color}\" stroke-width=\"{stroke_width}\" stroke-linecap=\"round\"/>"
        );
    }

    // Legend.
    let legend_x = width - legend_w;
    for (rank, ty) in model.types.iter().enumerate() {
        let y = padding + 25.0 + rank as f64 * 18.0;
        let _ = writeln!(
            svg,
            "  <rect x=\"{legend_x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n  \
             <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"monospace\" font-size=\"11\" fill=\"#ccd6f6\">{} {:.3} m \u{d7} {}</text>",
            y - 10.0,
            ty.color.hex(),
            legend_x + 18.0,
            y,
            ty.label,
            ty.length,
            ty.count
        );
    }

    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#5a6080\" \
         text-anchor=\"middle\">{} struts, {} nodes, {} types</text>",
        (width - legend_w) / 2.0,
        height - 8.0,
        model.struts.len(),
        model.nodes.len(),
        model.types.len()
    );

    svg.push_str("</svg>\n");
    svg
}
