//! Unique struts and their classification into types by length.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::angles::CutAngles;
use crate::geometry::Point3d;

/// Display color of a strut type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Colors by type rank; wraps when there are more types than entries.
pub const PALETTE: [Rgb; 9] = [
    Rgb(0xe7, 0x4c, 0x3c),
    Rgb(0x2e, 0xcc, 0x71),
    Rgb(0x34, 0x98, 0xdb),
    Rgb(0xf1, 0xc4, 0x0f),
    Rgb(0x9b, 0x59, 0xb6),
    Rgb(0xe6, 0x7e, 0x22),
    Rgb(0x1a, 0xbc, 0x9c),
    Rgb(0x34, 0x49, 0x5e),
    Rgb(0x7f, 0x8c, 0x8d),
];

pub fn type_color(rank: usize) -> Rgb {
    PALETTE[rank % PALETTE.len()]
}

/// Letter label for a type rank: A..Z, then AA, AB, ... like spreadsheet
/// columns.
pub fn type_label(rank: usize) -> String {
    let mut n = rank + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// One physical member: a unique edge of the retained faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strut {
    /// Node indices, smaller first.
    pub nodes: (usize, usize),
    pub length: f64,
    /// Adjacent faces in discovery order. A second face exists for interior
    /// struts only; rim struts along the cut have one.
    pub faces: (usize, Option<usize>),
    /// Rank of the strut's type in [`classify`] order.
    pub type_index: usize,
}

impl Strut {
    pub fn is_interior(&self) -> bool {
        self.faces.1.is_some()
    }
}

/// Collect the unique edges of `faces`, keyed by `(min, max)` node index so
/// an edge met from either neighbour maps to the same strut. Struts keep the
/// order in which they were first met.
#[instrument(skip(nodes, faces), fields(faces = faces.len()))]
pub fn extract_struts(nodes: &[Point3d], faces: &[[usize; 3]]) -> Vec<Strut> {
    let mut by_key: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut struts: Vec<Strut> = Vec::with_capacity(faces.len() * 3 / 2);

    for (face_idx, face) in faces.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (face[k], face[(k + 1) % 3]);
            let key = (a.min(b), a.max(b));
            match by_key.get(&key) {
                Some(&strut_idx) => {
                    let strut = &mut struts[strut_idx];
                    if strut.faces.1.is_none() {
                        strut.faces.1 = Some(face_idx);
                    } else {
                        warn!(?key, face = face_idx, "edge shared by more than two faces; ignoring extra face");
                    }
                }
                None => {
                    by_key.insert(key, struts.len());
                    struts.push(Strut {
                        nodes: key,
                        length: nodes[key.0].distance_to(&nodes[key.1]),
                        faces: (face_idx, None),
                        type_index: 0,
                    });
                }
            }
        }
    }

    debug!(struts = struts.len(), "struts extracted");
    struts
}

/// A class of struts with matching lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrutType {
    pub label: String,
    pub color: Rgb,
    /// Mean length of the members, so `length × count` is their exact sum.
    pub length: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub count: usize,
    /// Indices into the strut list.
    pub members: Vec<usize>,
    pub angles: CutAngles,
}

impl StrutType {
    pub fn total_length(&self) -> f64 {
        self.length * self.count as f64
    }
}

/// Group struts whose lengths are within `tolerance`, longest type first,
/// and write each strut's `type_index`.
///
/// Lengths are walked in descending order; a strut joins the current type
/// while it is within `tolerance` of that type's longest member. Every pair
/// inside a type therefore differs by less than `tolerance`.
#[instrument(skip(struts), fields(struts = struts.len()))]
pub fn classify(struts: &mut [Strut], tolerance: f64) -> Vec<StrutType> {
    let mut order: Vec<usize> = (0..struts.len()).collect();
    order.sort_by(|&a, &b| struts[b].length.total_cmp(&struts[a].length));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut head_length = f64::NAN;
    for idx in order {
        let len = struts[idx].length;
        match groups.last_mut() {
            Some(group) if head_length - len < tolerance => group.push(idx),
            _ => {
                head_length = len;
                groups.push(vec![idx]);
            }
        }
    }

    let types: Vec<StrutType> = groups
        .into_iter()
        .enumerate()
        .map(|(rank, mut members)| {
            members.sort_unstable();
            let mut sum = 0.0;
            let mut min_length = f64::INFINITY;
            let mut max_length = 0.0f64;
            for &m in &members {
                struts[m].type_index = rank;
                let len = struts[m].length;
                sum += len;
                min_length = min_length.min(len);
                max_length = max_length.max(len);
            }
            StrutType {
                label: type_label(rank),
                color: type_color(rank),
                length: sum / members.len() as f64,
                min_length,
                max_length,
                count: members.len(),
                members,
                angles: CutAngles::default(),
            }
        })
        .collect();

    debug!(types = types.len(), "struts classified");
    types
}
