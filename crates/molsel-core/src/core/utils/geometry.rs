use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Returns `None` for an empty point set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let bounds = iter.fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |acc, p| BoundingBox {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        );
        Some(bounds)
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

#[inline]
pub fn distance_squared(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm_squared()
}

/// An oriented parallelepiped given by an origin and three edge vectors.
///
/// A point is inside when its offset from the origin, projected onto each
/// edge direction, lies within `[0, edge length]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelepiped {
    pub origin: Point3<f64>,
    pub edges: [Vector3<f64>; 3],
}

impl Parallelepiped {
    pub fn new(origin: Point3<f64>, edges: [Vector3<f64>; 3]) -> Self {
        Self { origin, edges }
    }

    /// Zero-length edges have no direction and contain nothing.
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let offset = point - self.origin;
        self.edges.iter().all(|edge| {
            let length = edge.norm();
            if length == 0.0 {
                return false;
            }
            let projected = offset.dot(&(edge / length));
            (0.0..=length).contains(&projected)
        })
    }
}
