use std::time::Duration;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::FitParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Auto-fit", inline)]
#[serde(default)]
/// Camera auto-fit framing parameters.
pub struct FitOptions {
    /// Multiplier on the subject's largest bounding-box dimension.
    #[schemars(title = "Distance Scale", range(min = 1.0, max = 4.0))]
    pub distance_scale: f32,
    /// Additive framing margin.
    #[schemars(title = "Margin", range(min = 0.0, max = 2.0))]
    pub margin: f32,
    /// Fixed eye displacement for a slight three-quarter view.
    #[schemars(skip)]
    pub tilt_offset: [f32; 3],
    /// How long to wait after a streaming load resolves before fitting.
    /// Best-effort: streaming decoders may still be populating geometry
    /// when this fires.
    #[schemars(title = "Settle Delay (ms)", range(min = 0, max = 10_000))]
    pub settle_delay_ms: u64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            distance_scale: 1.6,
            margin: 1.0,
            tilt_offset: [-0.5, 0.7, 0.0],
            settle_delay_ms: 1000,
        }
    }
}

impl FitOptions {
    /// Fit-algorithm constants these options describe.
    #[must_use]
    pub fn params(&self) -> FitParams {
        FitParams {
            distance_scale: self.distance_scale,
            margin: self.margin,
            tilt_offset: Vec3::from_array(self.tilt_offset),
        }
    }

    /// Settle delay as a duration.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
