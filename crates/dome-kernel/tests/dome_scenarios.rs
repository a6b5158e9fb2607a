//! End-to-end dome builds checked against hand-counted figures.

use approx::assert_relative_eq;

use dome_kernel::cut::{retain_faces, CutPlane};
use dome_kernel::subdivision::subdivide;
use dome_kernel::{build_dome, AngleSource, DomeConfig, Polyhedron};

#[test]
fn two_frequency_icosahedron_sphere() {
    let model = build_dome(&DomeConfig::sphere(Polyhedron::Icosahedron, 2, 2.0)).unwrap();

    assert_eq!(model.nodes.len(), 42);
    assert_eq!(model.faces.len(), 80);
    assert_eq!(model.struts.len(), 120);
    assert_eq!(model.euler_characteristic(), 2);
    assert_eq!(model.boundary_edge_count(), 0);

    assert_eq!(model.types.len(), 2);
    let a = &model.types[0];
    let b = &model.types[1];
    assert_eq!((a.label.as_str(), a.count), ("A", 60));
    assert_eq!((b.label.as_str(), b.count), ("B", 60));
    assert!(a.length > b.length);
    assert_relative_eq!(a.length / 2.0, 0.618034, epsilon = 1e-5);
    assert_relative_eq!(b.length / 2.0, 0.546533, epsilon = 1e-5);

    for ty in &model.types {
        assert_eq!(ty.angles.source, AngleSource::Interior);
        assert!(ty.angles.bevel > 0.0 && ty.angles.bevel < 20.0);
    }
}

#[test]
fn two_frequency_icosahedron_hemisphere() {
    let model = build_dome(&DomeConfig::hemisphere(Polyhedron::Icosahedron, 2, 1.0)).unwrap();

    assert_eq!(model.nodes.len(), 26);
    assert_eq!(model.faces.len(), 40);
    assert_eq!(model.struts.len(), 65);
    assert_eq!(model.euler_characteristic(), 1);
    assert_eq!(model.boundary_edge_count(), 10);

    let on_equator = model.nodes.iter().filter(|p| p.y.abs() < 1e-9).count();
    assert_eq!(on_equator, 10);

    assert_eq!(model.types[0].count, 35);
    assert_eq!(model.types[1].count, 30);

    assert_relative_eq!(model.stats.height, 1.0, epsilon = 1e-9);
    assert_relative_eq!(model.stats.nominal_height, 1.0, epsilon = 1e-12);
    assert_relative_eq!(model.stats.ground_radius, 1.0, epsilon = 1e-9);
    assert_relative_eq!(model.stats.ground_area, std::f64::consts::PI, epsilon = 1e-9);
    // Flat facets sit inside the sphere, so the cover is a little under 2πr².
    assert!(model.stats.cover_area < 2.0 * std::f64::consts::PI);
    assert!(model.stats.cover_area > 0.9 * 2.0 * std::f64::consts::PI);
}

#[test]
fn hemisphere_rim_struts_are_long_type() {
    let model = build_dome(&DomeConfig::hemisphere(Polyhedron::Icosahedron, 2, 1.0)).unwrap();
    for strut in model.struts.iter().filter(|s| !s.is_interior()) {
        let (p, q) = model.strut_endpoints(strut);
        assert!(p.y.abs() < 1e-9 && q.y.abs() < 1e-9);
        assert_eq!(model.types[strut.type_index].label, "A");
    }
}

#[test]
fn octahedron_hemisphere_has_square_rim() {
    let model = build_dome(&DomeConfig::hemisphere(Polyhedron::Octahedron, 1, 1.0)).unwrap();
    assert_eq!(model.nodes.len(), 5);
    assert_eq!(model.faces.len(), 4);
    assert_eq!(model.struts.len(), 8);
    assert_eq!(model.boundary_edge_count(), 4);
    // All eight edges are chords of 90°.
    assert_eq!(model.types.len(), 1);
    assert_relative_eq!(model.types[0].length, 2f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn full_cut_keeps_every_face() {
    for polyhedron in Polyhedron::ALL {
        for frequency in 1..=5 {
            let config = DomeConfig::sphere(polyhedron, frequency, 3.0);
            let model = build_dome(&config).unwrap();
            let per_base = (frequency * frequency) as usize;
            let base_faces = match polyhedron {
                Polyhedron::Icosahedron => 20,
                Polyhedron::Octahedron => 8,
            };
            assert_eq!(model.faces.len(), base_faces * per_base);
            assert_eq!(model.euler_characteristic(), 2);
        }
    }
}

#[test]
fn cut_plane_extremes() {
    let solid = Polyhedron::Icosahedron.base_solid(1.0).unwrap();
    let sphere = subdivide(&solid, 3, 1.0, 1e-4).unwrap();

    let below = CutPlane {
        height: -1.5,
        tolerance: 0.0,
    };
    assert_eq!(retain_faces(&sphere.nodes, &sphere.faces, &below).len(), sphere.faces.len());

    let above = CutPlane {
        height: 1.5,
        tolerance: 0.0,
    };
    assert!(retain_faces(&sphere.nodes, &sphere.faces, &above).is_empty());
}

#[test]
fn tiny_cap_is_empty_model() {
    let config = DomeConfig::new(Polyhedron::Icosahedron, 1, 0.05, 2.0);
    let model = build_dome(&config).unwrap();
    assert!(model.is_empty());
    assert!(model.nodes.is_empty());
    assert!(model.struts.is_empty());
    assert!(model.types.is_empty());
    assert_eq!(model.stats.total_length, 0.0);
    assert_eq!(model.stats.cover_area, 0.0);
}

#[test]
fn scaling_radius_scales_lengths() {
    let small = build_dome(&DomeConfig::hemisphere(Polyhedron::Icosahedron, 4, 1.0)).unwrap();
    let large = build_dome(&DomeConfig::hemisphere(Polyhedron::Icosahedron, 4, 5.0)).unwrap();
    assert_eq!(small.types.len(), large.types.len());
    for (s, l) in small.types.iter().zip(&large.types) {
        assert_eq!(s.count, l.count);
        assert_relative_eq!(l.length, 5.0 * s.length, epsilon = 1e-9);
        assert_relative_eq!(l.angles.bevel, s.angles.bevel, epsilon = 1e-9);
    }
}

#[test]
fn default_config_round_trips_through_toml() {
    let config = DomeConfig::default();
    let text = toml::to_string(&config).unwrap();
    let back: DomeConfig = toml::from_str(&text).unwrap();
    assert_eq!(config, back);
}

#[test]
fn high_frequency_hemisphere_stops_at_equator() {
    for (polyhedron, frequency) in [
        (Polyhedron::Icosahedron, 100),
        (Polyhedron::Icosahedron, 120),
        (Polyhedron::Octahedron, 120),
    ] {
        let model = build_dome(&DomeConfig::hemisphere(polyhedron, frequency, 1.0)).unwrap();
        let min_y = model.nodes.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert!(min_y.abs() < 1e-9, "{polyhedron} {frequency}V reaches y = {min_y}");
        assert_eq!(model.euler_characteristic(), 1);
        assert_relative_eq!(model.stats.height, 1.0, epsilon = 1e-9);
        assert_relative_eq!(model.stats.ground_radius, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn oversized_node_merge_is_rejected() {
    let mut config = DomeConfig::sphere(Polyhedron::Icosahedron, 4, 1.0);
    config.tolerance.node_merge = 0.35;
    assert!(build_dome(&config).is_err());

    config.tolerance.node_merge = f64::INFINITY;
    assert!(build_dome(&config).is_err());

    config.tolerance.node_merge = 1e-4;
    let model = build_dome(&config).unwrap();
    assert_eq!(model.nodes.len(), 162);
    assert_eq!(model.faces.len(), 320);
    assert_eq!(model.struts.len(), 480);
}
