use itertools::Itertools;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use tracing::debug;

/// Leaf capacity of [`KdTree`]. Splitting a full leaf panics when every point
/// in it shares the split coordinate.
const KDTREE_BUCKET_SIZE: usize = 32;

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&a, &b)| {
            let diff = a - b;
            diff * diff
        })
        .fold(0.0, |acc, d| acc + d)
}

/// Largest number of points sharing one coordinate value on any axis.
fn max_axis_multiplicity(coords: &[[f64; 3]]) -> usize {
    (0..3)
        .filter_map(|axis| {
            coords
                .iter()
                .map(|c| (c[axis] + 0.0).to_bits())
                .counts()
                .into_values()
                .max()
        })
        .max()
        .unwrap_or(0)
}

/// Reference points for "is any reference point within r" queries.
///
/// Small sets are scanned linearly; sets at or above the threshold are put in
/// a k-d tree, unless too many points share a coordinate on one axis for the
/// tree to split them. Both strategies compute the squared distance the same
/// way, so the answer never depends on which one was chosen.
pub enum ReferenceSet {
    Empty,
    Linear(Vec<[f64; 3]>),
    Indexed(KdTree<f64, 3>),
}

impl ReferenceSet {
    pub fn new(points: &[Point3<f64>], index_threshold: usize) -> Self {
        if points.is_empty() {
            return ReferenceSet::Empty;
        }
        let coords: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
        if coords.len() < index_threshold {
            return ReferenceSet::Linear(coords);
        }
        let repeats = max_axis_multiplicity(&coords);
        if repeats >= KDTREE_BUCKET_SIZE {
            debug!(
                points = coords.len(),
                repeats, "Reference points share axis coordinates; scanning linearly."
            );
            return ReferenceSet::Linear(coords);
        }
        ReferenceSet::Indexed((&coords).into())
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, ReferenceSet::Indexed(_))
    }

    /// True if some reference point lies at a squared distance `<= radius_sq`.
    pub fn any_within(&self, point: &Point3<f64>, radius_sq: f64) -> bool {
        let query = [point.x, point.y, point.z];
        match self {
            ReferenceSet::Empty => false,
            ReferenceSet::Linear(coords) => coords
                .iter()
                .any(|c| squared_distance(c, &query) <= radius_sq),
            ReferenceSet::Indexed(tree) => {
                tree.nearest_one::<SquaredEuclidean>(&query).distance <= radius_sq
            }
        }
    }
}
