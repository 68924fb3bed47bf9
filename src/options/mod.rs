//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera baseline, parallax gains, auto-fit
//! framing, asset paths) are consolidated here. Options serialize to/from
//! TOML for presets; every sub-struct uses `#[serde(default)]` so a
//! partial file overriding one section works.

mod asset;
mod camera;
mod fit;
mod parallax;

use std::path::Path;

pub use asset::AssetOptions;
pub use camera::CameraOptions;
pub use fit::FitOptions;
pub use parallax::ParallaxOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ParawinError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and neutral pose.
    pub camera: CameraOptions,
    /// Parallax sensitivity and look-at policy.
    pub parallax: ParallaxOptions,
    /// Auto-fit framing parameters.
    pub fit: FitOptions,
    /// Subject asset paths and placement.
    pub assets: AssetOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ParawinError::Io`] when the file cannot be read and
    /// [`ParawinError::OptionsParse`] when it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ParawinError> {
        let content = std::fs::read_to_string(path).map_err(ParawinError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ParawinError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ParawinError::OptionsParse`] on serialization failure and
    /// [`ParawinError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ParawinError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ParawinError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ParawinError::Io)?;
        }
        std::fs::write(path, content).map_err(ParawinError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::LookAtPolicy;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[parallax]
xy_gain = 3.5
look_at = "fitted_center"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.parallax.xy_gain, 3.5);
        assert_eq!(opts.parallax.look_at, LookAtPolicy::FittedCenter);
        // Everything else should be default
        assert_eq!(opts.parallax.depth_gain, 0.2);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.fit.distance_scale, 1.6);
        assert_eq!(opts.assets.primary, "splat.ply");
    }

    #[test]
    fn neutral_pose_reflects_camera_options() {
        let mut opts = Options::default();
        opts.camera.neutral_position = [1.0, 2.0, 8.0];
        opts.camera.fovy = 60.0;
        let pose = opts.camera.neutral_pose();
        assert_eq!(pose.position.to_array(), [1.0, 2.0, 8.0]);
        assert_eq!(pose.fovy, 60.0);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("parallax"));
        assert!(props.contains_key("fit"));
        assert!(props.contains_key("assets"));

        // Exposed fields present, skipped fields absent
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
        assert!(camera.get("neutral_position").is_none());

        let fit = &props["fit"]["properties"];
        assert!(fit.get("distance_scale").is_some());
        assert!(fit.get("tilt_offset").is_none());
    }
}
