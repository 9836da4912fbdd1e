mod kdtree;
mod point_set;

#[cfg(test)]
mod tests;

pub use kdtree::{Aabb, Bucket, KdTree};
pub use point_set::{distance, distance_squared, Point3, PointSet};
