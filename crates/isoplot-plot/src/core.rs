//! Geometry shared by plot records.
//!
//! Bounds are in data coordinates. An empty box has `min > max` and absorbs
//! nothing when expanded into another box.

use glam::DVec2;

/// Axis-aligned bounding box in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: DVec2::splat(f64::INFINITY),
            max: DVec2::splat(f64::NEG_INFINITY),
        }
    }
}

impl BoundingBox {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Bounds of the finite `(x, y)` pairs; empty when none are finite.
    pub fn from_axes(x: &[f64], y: &[f64]) -> Self {
        let mut bounds = Self::default();
        for &value in x.iter().filter(|v| v.is_finite()) {
            bounds.min.x = bounds.min.x.min(value);
            bounds.max.x = bounds.max.x.max(value);
        }
        for &value in y.iter().filter(|v| v.is_finite()) {
            bounds.min.y = bounds.min.y.min(value);
            bounds.max.y = bounds.max.y.max(value);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn expand_by_box(&mut self, other: &BoundingBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}
