use sha2::{Digest, Sha256};

/// A single 3-D coordinate, always float64.
pub type Point3 = [f64; 3];

/// Euclidean distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance; cheaper when only comparisons are needed.
pub fn distance_squared(a: &Point3, b: &Point3) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// An ordered, index-addressable set of 3-D points.
///
/// A point's index is its identity for the rest of the pipeline; coordinates
/// are never used as identity. Downsampling produces a new `PointSet` whose
/// points are reindexed 0..M.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Point3>,
}

impl PointSet {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point3] {
        &self.points
    }

    /// Build a new set from a list of indices into this one.
    ///
    /// Coordinates are carried over exactly; the result is reindexed 0..M in
    /// the order the indices are given.
    pub fn select(&self, indices: &[usize]) -> PointSet {
        let points = indices.iter().map(|&i| self.points[i]).collect();
        PointSet::new(points)
    }

    /// SHA-256 digest of the raw coordinate buffer, hex-encoded.
    ///
    /// Used as the source identity for cache invalidation: two buffers with
    /// identical coordinates in identical order share a digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for p in &self.points {
            for c in p {
                hasher.update(c.to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point3;

    fn index(&self, index: usize) -> &Point3 {
        &self.points[index]
    }
}

impl From<Vec<Point3>> for PointSet {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}
