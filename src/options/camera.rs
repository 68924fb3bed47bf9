use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::NeutralPose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and the tracking-neutral baseline pose.
pub struct CameraOptions {
    /// Vertical field of view in degrees at the neutral pose.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Camera eye position when no tracking offset is applied.
    #[schemars(skip)]
    pub neutral_position: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            neutral_position: [0.0, 0.0, 5.0],
        }
    }
}

impl CameraOptions {
    /// The neutral pose these options describe.
    #[must_use]
    pub fn neutral_pose(&self) -> NeutralPose {
        NeutralPose {
            position: Vec3::from_array(self.neutral_position),
            fovy: self.fovy,
        }
    }
}
