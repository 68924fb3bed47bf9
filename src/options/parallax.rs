use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{LookAtPolicy, ParallaxParams};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parallax", inline)]
#[serde(default)]
/// Sensitivity of the head-tracking parallax effect.
pub struct ParallaxOptions {
    /// Lateral (x/y) camera displacement per unit of head offset.
    #[schemars(title = "Lateral Gain", range(min = 0.0, max = 5.0))]
    pub xy_gain: f32,
    /// Depth-driven dolly gain.
    #[schemars(title = "Depth Gain", range(min = 0.0, max = 1.0))]
    pub depth_gain: f32,
    /// Depth-driven field-of-view gain.
    #[schemars(title = "FOV Gain", range(min = 0.0, max = 0.5))]
    pub fov_gain: f32,
    /// Where the camera looks while tracking is active.
    pub look_at: LookAtPolicy,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            xy_gain: 2.0,
            depth_gain: 0.2,
            fov_gain: 0.1,
            look_at: LookAtPolicy::Origin,
        }
    }
}

impl ParallaxOptions {
    /// Mapper constants these options describe.
    #[must_use]
    pub const fn params(&self) -> ParallaxParams {
        ParallaxParams {
            xy_gain: self.xy_gain,
            depth_gain: self.depth_gain,
            fov_gain: self.fov_gain,
        }
    }
}
