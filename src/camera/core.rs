//! Perspective camera state and its GPU-ready uniform snapshot.

use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, look-at target, and
/// projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Combined view-projection matrix (right-handed, [0,1] depth range).
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.projection() * view
    }

    /// Projection matrix alone.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }
}

/// Per-frame camera snapshot handed to the external render surface.
///
/// Rebuilt in full from [`Camera`] once per tick, so the surface never
/// observes a camera whose position and look-at disagree.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub eye: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl CameraUniform {
    /// Identity snapshot, before any camera exists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 3],
            fovy: 45.0,
            forward: [0.0, 0.0, -1.0],
            aspect: 1.0,
        }
    }

    /// Refresh every field from the camera's current state.
    pub fn update(&mut self, camera: &Camera) {
        self.view_proj = camera.view_proj().to_cols_array_2d();
        self.eye = camera.eye.to_array();
        self.fovy = camera.fovy;
        self.forward = camera.forward().to_array();
        self.aspect = camera.aspect;
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
