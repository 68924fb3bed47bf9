//! Auto-fit: frame the subject's bounding box without per-asset tuning.

use glam::Vec3;

use super::core::Camera;
use crate::scene::Aabb;

/// Tunables for [`fit_camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Multiplier on the largest box dimension.
    pub distance_scale: f32,
    /// Additive distance margin, so even tiny subjects get breathing room.
    pub margin: f32,
    /// Fixed eye displacement applied after the distance offset, giving a
    /// slight three-quarter view instead of a dead-on shot.
    pub tilt_offset: Vec3,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            distance_scale: 1.6,
            margin: 1.0,
            tilt_offset: Vec3::new(-0.5, 0.7, 0.0),
        }
    }
}

/// Result of a fit attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// Camera was repositioned to frame the box.
    Fitted {
        /// Box center the camera now looks at.
        center: Vec3,
        /// Eye distance along +Z before the tilt offset.
        distance: f32,
    },
    /// Empty or degenerate bounds; the camera was left untouched.
    NothingToFit,
}

/// Reposition `camera` so `bounds` is fully and pleasingly framed.
///
/// Empty bounds (nothing loaded yet, or geometry collapsed to a point) are
/// a reported no-op, not an error. The largest dimension is floored at 1 so
/// a near-zero-volume subject can't produce a zero camera distance. Both
/// eye and target are written before returning, so a caller that only
/// reads the camera between calls never sees a half-applied fit.
pub fn fit_camera(
    bounds: &Aabb,
    params: &FitParams,
    camera: &mut Camera,
) -> FitOutcome {
    if bounds.is_empty() {
        return FitOutcome::NothingToFit;
    }

    let center = bounds.center();
    let size = bounds.size();
    let max_dim = size.x.max(size.y).max(size.z).max(1.0);
    let distance = max_dim * params.distance_scale + params.margin;

    camera.eye = center + Vec3::new(0.0, 0.0, distance) + params.tilt_offset;
    camera.target = center;

    FitOutcome::Fitted { center, distance }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.6,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    fn no_tilt() -> FitParams {
        FitParams {
            tilt_offset: Vec3::ZERO,
            ..FitParams::default()
        }
    }

    #[test]
    fn empty_bounds_leave_camera_untouched() {
        let mut camera = test_camera();
        let before = camera;
        let outcome =
            fit_camera(&Aabb::EMPTY, &FitParams::default(), &mut camera);
        assert_eq!(outcome, FitOutcome::NothingToFit);
        assert_eq!(camera, before);
    }

    #[test]
    fn point_bounds_leave_camera_untouched() {
        let mut camera = test_camera();
        let before = camera;
        let point = Aabb::new(Vec3::splat(3.0), Vec3::splat(3.0));
        let outcome = fit_camera(&point, &FitParams::default(), &mut camera);
        assert_eq!(outcome, FitOutcome::NothingToFit);
        assert_eq!(camera, before);
    }

    #[test]
    fn unit_cube_at_origin_fits_at_2_6() {
        let mut camera = test_camera();
        let cube = Aabb::centered_cube(Vec3::ZERO, 0.5);
        let outcome = fit_camera(&cube, &no_tilt(), &mut camera);

        // max_dim = 1, distance = 1 * 1.6 + 1.0
        assert_eq!(
            outcome,
            FitOutcome::Fitted {
                center: Vec3::ZERO,
                distance: 2.6
            }
        );
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 2.6));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn tiny_subject_uses_floored_dimension() {
        let mut camera = test_camera();
        let speck = Aabb::centered_cube(Vec3::ZERO, 0.01);
        let outcome =
            fit_camera(&speck, &no_tilt(), &mut camera);
        // 0.02 extent floors to 1.0, same distance as a unit cube
        assert_eq!(
            outcome,
            FitOutcome::Fitted {
                center: Vec3::ZERO,
                distance: 2.6
            }
        );
    }

    #[test]
    fn tilt_offset_displaces_eye_only() {
        let mut camera = test_camera();
        let cube = Aabb::centered_cube(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let _ = fit_camera(&cube, &FitParams::default(), &mut camera);

        assert_eq!(camera.eye, Vec3::new(1.0 - 0.5, 2.0 + 0.7, 3.0 + 2.6));
        // Orientation still looks straight at the center
        assert_eq!(camera.target, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn largest_axis_drives_distance() {
        let mut camera = test_camera();
        let slab = Aabb::new(
            Vec3::new(-2.0, -0.1, -0.1),
            Vec3::new(2.0, 0.1, 0.1),
        );
        let outcome = fit_camera(&slab, &no_tilt(), &mut camera);
        assert_eq!(
            outcome,
            FitOutcome::Fitted {
                center: Vec3::ZERO,
                distance: 4.0 * 1.6 + 1.0
            }
        );
    }
}
