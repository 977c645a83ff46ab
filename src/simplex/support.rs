use crate::Arbitrary;
use crate::Energy;
use std::cmp::Ordering;

/// A support or party position on the unit interval.
///
/// Wraps f64 under the IEEE total order so that distributions can key
/// BTreeMaps by position and slates can live in BTreeSets. Points are
/// conventionally normalized into [0, 1]; nothing enforces the bounds,
/// but sampling and renormalization always produce them.
#[derive(Copy, Clone, Debug, Default)]
pub struct Point(f64);

impl Point {
    /// absolute distance to another point on the line.
    pub fn distance(&self, other: &Self) -> Energy {
        (self.0 - other.0).abs()
    }
}

/// f64 isomorphism
impl From<f64> for Point {
    fn from(x: f64) -> Self {
        Self(x)
    }
}
impl From<Point> for f64 {
    fn from(point: Point) -> Self {
        point.0
    }
}

/// total order over positions, consistent with Eq
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Eq for Point {}
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Arbitrary for Point {
    fn random() -> Self {
        Self(rand::random::<f64>())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
