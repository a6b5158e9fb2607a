//! Hash grid used to merge coincident grid points into shared nodes.
//!
//! Points are bucketed by their coordinates quantized to the merge distance.
//! A lookup inspects the 27 cells around the query so two points within the
//! merge distance always meet, even when they straddle a cell boundary.

use std::collections::HashMap;

use crate::geometry::Point3d;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    fn from_position(p: &Point3d, cell_size: f64) -> Self {
        Self {
            x: (p.x / cell_size).floor() as i64,
            y: (p.y / cell_size).floor() as i64,
            z: (p.z / cell_size).floor() as i64,
        }
    }

    fn offset(&self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Deduplicating point store: `insert` returns the index of an existing point
/// within the merge distance, or appends a new one.
#[derive(Debug)]
pub struct NodeIndex {
    grid: HashMap<CellCoord, Vec<usize>>,
    points: Vec<Point3d>,
    cell_size: f64,
    merge_distance_sq: f64,
}

impl NodeIndex {
    pub fn new(merge_distance: f64) -> Self {
        Self::with_capacity(merge_distance, 0)
    }

    pub fn with_capacity(merge_distance: f64, capacity: usize) -> Self {
        Self {
            grid: HashMap::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
            cell_size: merge_distance,
            merge_distance_sq: merge_distance * merge_distance,
        }
    }

    /// Index of the stored point within the merge distance of `p`, if any.
    pub fn find(&self, p: &Point3d) -> Option<usize> {
        let cell = CellCoord::from_position(p, self.cell_size);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.grid.get(&cell.offset(dx, dy, dz)) else {
                        continue;
                    };
                    for &idx in bucket {
                        let d = self.points[idx].distance_squared_to(p);
                        if d <= self.merge_distance_sq && best.map_or(true, |(_, bd)| d < bd) {
                            best = Some((idx, d));
                        }
                    }
                }
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub fn insert(&mut self, p: Point3d) -> usize {
        if let Some(idx) = self.find(&p) {
            return idx;
        }
        let idx = self.points.len();
        self.points.push(p);
        self.grid
            .entry(CellCoord::from_position(&p, self.cell_size))
            .or_default()
            .push(idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point3d> {
        self.points
    }
}
