/// Errors raised while validating a configuration or building a dome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomeError {
    /// Subdivision frequency below 1.
    #[error("frequency must be at least 1, got {0}")]
    InvalidFrequency(u32),

    /// A dimension, fraction or tolerance outside its allowed range.
    #[error("{parameter} must be {expected}, got {value}")]
    InvalidParameter {
        parameter: &'static str,
        expected: &'static str,
        value: f64,
    },

    /// An unknown polyhedron name was given.
    #[error("unknown polyhedron '{0}' (expected icosahedron or octahedron)")]
    UnknownPolyhedron(String),

    /// A grid point could not be projected onto the sphere.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
