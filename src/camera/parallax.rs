//! Parallax mapping: one head-position sample in, one camera pose out.
//!
//! The mapping is a pure function with no smoothing or momentum — every
//! sample fully replaces the previous camera offset, which is what makes
//! the "window" illusion track head motion without lag.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One normalized head-position estimate from the tracking source.
///
/// Components are nominally in `[-1, 1]` but are never clamped: an
/// out-of-range estimate just pushes the camera further, it is not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackingSample {
    /// Horizontal head offset.
    pub x: f32,
    /// Vertical head offset.
    pub y: f32,
    /// Depth (toward/away from the screen) offset.
    pub z: f32,
}

/// The camera pose used when no tracking offset is applied. Immutable
/// after initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralPose {
    /// Baseline eye position.
    pub position: Vec3,
    /// Baseline vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for NeutralPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fovy: 45.0,
        }
    }
}

/// Sensitivity constants for the parallax mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxParams {
    /// Lateral (x/y) gain on the sample.
    pub xy_gain: f32,
    /// Gain on the depth-driven eye dolly.
    pub depth_gain: f32,
    /// Gain on the depth-driven field-of-view change.
    pub fov_gain: f32,
}

impl Default for ParallaxParams {
    fn default() -> Self {
        Self {
            xy_gain: 2.0,
            depth_gain: 0.2,
            fov_gain: 0.1,
        }
    }
}

/// Where the camera looks while parallax tracking is active.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LookAtPolicy {
    /// Reset the look-at target to the world origin on every sample.
    #[default]
    Origin,
    /// Track the fitted subject center once a fit has occurred (world
    /// origin before that).
    FittedCenter,
}

/// Transient camera pose produced by [`map_sample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxPose {
    /// Perturbed eye position.
    pub eye: Vec3,
    /// Perturbed vertical field of view in degrees.
    pub fovy: f32,
}

/// Map one tracking sample to a camera pose around the neutral baseline.
///
/// Pure and stateless: identical inputs produce bit-identical outputs, and
/// sample order carries no history. Lateral motion translates the eye,
/// depth motion dollies the eye along the neutral z and narrows/widens the
/// field of view in opposition, strengthening the depth cue.
#[must_use]
pub fn map_sample(
    sample: TrackingSample,
    neutral: &NeutralPose,
    params: &ParallaxParams,
) -> ParallaxPose {
    ParallaxPose {
        eye: Vec3::new(
            neutral.position.x + sample.x * params.xy_gain,
            neutral.position.y + sample.y * params.xy_gain,
            neutral.position.z * (1.0 - sample.z * params.depth_gain),
        ),
        fovy: neutral.fovy / (1.0 + sample.z * params.fov_gain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (NeutralPose, ParallaxParams) {
        (NeutralPose::default(), ParallaxParams::default())
    }

    #[test]
    fn in_range_samples_stay_within_gain_bounds() {
        let (neutral, params) = defaults();
        let corners = [-1.0f32, -0.5, 0.0, 0.5, 1.0];
        for &x in &corners {
            for &y in &corners {
                for &z in &corners {
                    let pose = map_sample(
                        TrackingSample { x, y, z },
                        &neutral,
                        &params,
                    );
                    assert!(
                        (pose.eye.x - neutral.position.x).abs()
                            <= params.xy_gain
                    );
                    assert!(
                        (pose.eye.y - neutral.position.y).abs()
                            <= params.xy_gain
                    );
                    assert!(
                        (pose.eye.z - neutral.position.z).abs()
                            <= neutral.position.z.abs() * params.depth_gain
                                + 1e-6
                    );
                    assert!(
                        pose.fovy >= neutral.fovy / (1.0 + params.fov_gain)
                    );
                    assert!(
                        pose.fovy <= neutral.fovy / (1.0 - params.fov_gain)
                    );
                }
            }
        }
    }

    #[test]
    fn mapping_is_stateless() {
        let (neutral, params) = defaults();
        let sample = TrackingSample {
            x: 0.3,
            y: -0.7,
            z: 0.42,
        };
        let first = map_sample(sample, &neutral, &params);
        let second = map_sample(sample, &neutral, &params);
        // Bit-identical, not just approximately equal
        assert_eq!(first.eye.to_array(), second.eye.to_array());
        assert_eq!(first.fovy.to_bits(), second.fovy.to_bits());
    }

    #[test]
    fn centered_sample_reproduces_neutral_pose() {
        let (neutral, params) = defaults();
        let pose = map_sample(TrackingSample::default(), &neutral, &params);
        assert_eq!(pose.eye, neutral.position);
        assert_eq!(pose.fovy, neutral.fovy);
    }

    #[test]
    fn out_of_range_samples_are_not_clamped() {
        let (neutral, params) = defaults();
        let pose = map_sample(
            TrackingSample {
                x: 3.0,
                y: 0.0,
                z: 0.0,
            },
            &neutral,
            &params,
        );
        // Formula applies as-is: 0 + 3 * 2
        assert_eq!(pose.eye.x, 6.0);
    }

    #[test]
    fn depth_narrows_field_of_view() {
        let (neutral, params) = defaults();
        let toward = map_sample(
            TrackingSample {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
            &neutral,
            &params,
        );
        assert_eq!(toward.fovy, neutral.fovy / 1.1);
        assert_eq!(toward.eye.z, neutral.position.z * 0.8);
    }
}
