//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds as `[min_x, min_y, max_x, max_y]`, the STAC `bbox` order.
    pub fn bounds(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Build a bounding box from a STAC `bbox` array.
    pub fn from_bounds(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Exterior ring of the box as a closed, counter-clockwise polygon.
    ///
    /// Starts at the lower-right corner, then upper-right, upper-left,
    /// lower-left, and repeats the first vertex to close the ring.
    pub fn exterior_ring(&self) -> Vec<[f64; 2]> {
        vec![
            [self.max_x, self.min_y],
            [self.max_x, self.max_y],
            [self.min_x, self.max_y],
            [self.min_x, self.min_y],
            [self.max_x, self.min_y],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_order() {
        let bbox = BoundingBox::new(5.0, -1.0, 6.0, 0.0);
        assert_eq!(bbox.bounds(), [5.0, -1.0, 6.0, 0.0]);
        assert_eq!(BoundingBox::from_bounds(bbox.bounds()), bbox);
    }

    #[test]
    fn test_exterior_ring_is_closed() {
        let ring = BoundingBox::new(5.0, -1.0, 6.0, 0.0).exterior_ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(
            ring,
            vec![[6.0, -1.0], [6.0, 0.0], [5.0, 0.0], [5.0, -1.0], [6.0, -1.0]]
        );
    }
}
