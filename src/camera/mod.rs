//! Camera state, auto-fit framing, and parallax mapping.

pub mod core;
pub mod fit;
pub mod parallax;

pub use self::core::{Camera, CameraUniform};
pub use self::fit::{fit_camera, FitOutcome, FitParams};
pub use self::parallax::{
    map_sample, LookAtPolicy, NeutralPose, ParallaxParams, ParallaxPose,
    TrackingSample,
};

