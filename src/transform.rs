//! Model, view and projection matrices.

use glam::{Mat4, Vec3};

use crate::input::Rotation;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_UP: Vec3 = Vec3::Y;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Rotates about X, then Y, then Z, each applied on the right of the previous result.
pub fn model_matrix(rotation: &Rotation) -> Mat4 {
    Mat4::IDENTITY
        * Mat4::from_rotation_x(rotation.x.to_radians())
        * Mat4::from_rotation_y(rotation.y.to_radians())
        * Mat4::from_rotation_z(rotation.z.to_radians())
}

pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(CAMERA_POSITION, CAMERA_TARGET, CAMERA_UP)
}

pub fn projection_matrix(aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect_ratio, Z_NEAR, Z_FAR)
}

/// The three matrices uploaded for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameTransforms {
    pub fn new(rotation: &Rotation, aspect_ratio: f32) -> Self {
        Self {
            model: model_matrix(rotation),
            view: view_matrix(),
            projection: projection_matrix(aspect_ratio),
        }
    }
}
