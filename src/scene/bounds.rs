//! Axis-aligned bounding boxes for camera framing.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in a single coordinate space.
///
/// Starts out [`Aabb::EMPTY`] (inverted extents) and grows by
/// [`Aabb::expand_point`] / [`Aabb::union`]. A box that never grew, or that
/// collapsed to a single point, reports empty — the fit algorithm treats
/// both as "nothing to fit".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: inverted extents so any expansion produces a valid
    /// box.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box from explicit corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of the given half-extent centered at a point.
    #[must_use]
    pub fn centered_cube(center: Vec3, half_extent: f32) -> Self {
        let h = Vec3::splat(half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Whether the box contains no usable volume: either it never grew
    /// (inverted extents) or it collapsed to a single point on every axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.min.x > self.max.x
            || self.min.y > self.max.y
            || self.min.z > self.max.z
        {
            return true;
        }
        self.min == self.max
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Component-wise extent (`max - min`).
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow to include a point.
    pub fn expand_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to include another box. Unioning with an inverted (never-grown)
    /// box is a no-op.
    pub fn union(&mut self, other: &Self) {
        if other.min.x > other.max.x {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The box enclosing this box's eight corners under an affine
    /// transform. An inverted box stays inverted.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        if self.min.x > self.max.x {
            return Self::EMPTY;
        }
        let mut out = Self::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.expand_point(transform.transform_point3(corner));
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_grown() {
        let mut b = Aabb::EMPTY;
        assert!(b.is_empty());
        b.expand_point(Vec3::ZERO);
        // A single point is degenerate and still counts as empty
        assert!(b.is_empty());
        b.expand_point(Vec3::ONE);
        assert!(!b.is_empty());
        assert_eq!(b.center(), Vec3::splat(0.5));
        assert_eq!(b.size(), Vec3::ONE);
    }

    #[test]
    fn union_ignores_inverted_operand() {
        let mut b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let before = b;
        b.union(&Aabb::EMPTY);
        assert_eq!(b, before);

        let mut e = Aabb::EMPTY;
        e.union(&before);
        assert_eq!(e, before);
    }

    #[test]
    fn transform_rotation_reencloses_corners() {
        let b = Aabb::centered_cube(Vec3::ZERO, 1.0);
        let rot = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let t = b.transformed(&rot);
        // A 45-degree rotated half-extent-1 cube widens to sqrt(2) in x/z,
        // unchanged in y
        let expected = 2.0f32.sqrt();
        assert!((t.max.x - expected).abs() < 1e-5);
        assert!((t.max.z - expected).abs() < 1e-5);
        assert!((t.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn transform_translation_moves_center() {
        let b = Aabb::centered_cube(Vec3::ZERO, 0.5);
        let t =
            b.transformed(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(t.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.size(), Vec3::ONE);
    }
}
