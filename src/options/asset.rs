use glam::{Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::SceneNode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
/// Subject asset paths and placement.
pub struct AssetOptions {
    /// Preferred subject: splat point-cloud file.
    pub primary: String,
    /// Fallback subject: mesh file.
    pub fallback: String,
    /// Rotation around X in degrees applied to the loaded subject.
    /// Defaults to -90 to convert Blender's Z-up export to Y-up.
    #[schemars(skip)]
    pub subject_rotation_x_deg: f32,
    /// Translation applied to the loaded subject.
    #[schemars(skip)]
    pub subject_offset: [f32; 3],
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            primary: "splat.ply".to_owned(),
            fallback: "model.glb".to_owned(),
            subject_rotation_x_deg: -90.0,
            subject_offset: [0.15, -0.8, 0.0],
        }
    }
}

impl AssetOptions {
    /// Apply the configured placement to a freshly loaded subject node.
    pub fn place_subject(&self, node: &mut SceneNode) {
        node.rotation =
            Quat::from_rotation_x(self.subject_rotation_x_deg.to_radians());
        node.position = Vec3::from_array(self.subject_offset);
    }
}
